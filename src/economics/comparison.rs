use serde::Serialize;

use super::fee_model::{Accent, Chain, FeeModel};
use crate::error::CalcError;

/// Efficiency curve per chain: `max(0, base - fee_ratio * penalty)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EfficiencyCurve {
    pub base_score: f64,
    pub penalty_factor: f64,
}

impl EfficiencyCurve {
    pub fn for_chain(chain: Chain) -> Self {
        let (base_score, penalty_factor) = match chain {
            Chain::Bsv => (95.0, 100.0),
            Chain::Btc => (20.0, 10.0),
            Chain::Eth => (40.0, 8.0),
        };
        Self {
            base_score,
            penalty_factor,
        }
    }

    pub fn score(&self, fee_ratio: f64) -> f64 {
        (self.base_score - fee_ratio * self.penalty_factor).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Best,
    Worst,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainFee {
    pub chain: Chain,
    pub fee_usd: f64,
    pub fee_percentage_of_value: f64,
    pub confirmation_minutes: f64,
    pub efficiency: f64,
    pub handles_micropayments: bool,
    pub standing: Standing,
    pub accent: Accent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeComparison {
    pub transaction_value_usd: f64,
    pub transaction_size_bytes: f64,
    /// Sorted by efficiency, best first.
    pub ranking: Vec<ChainFee>,
    pub savings_usd: f64,
    pub savings_percentage: f64,
}

impl FeeComparison {
    pub fn best(&self) -> Option<&ChainFee> {
        self.ranking.first()
    }

    pub fn worst(&self) -> Option<&ChainFee> {
        self.ranking.last()
    }
}

/// Compares the cost of one transaction on BSV, BTC and ETH.
pub fn compare_fees(value_usd: f64, size_bytes: f64) -> Result<FeeComparison, CalcError> {
    compare_with_models(value_usd, size_bytes, &FeeModel::comparator_set())
}

pub fn compare_with_models(
    value_usd: f64,
    size_bytes: f64,
    models: &[FeeModel],
) -> Result<FeeComparison, CalcError> {
    if !value_usd.is_finite() || value_usd <= 0.0 {
        return Err(CalcError::InvalidValue(value_usd));
    }
    if !size_bytes.is_finite() || size_bytes <= 0.0 {
        return Err(CalcError::InvalidSize(size_bytes));
    }
    if models.is_empty() {
        return Err(CalcError::NoModels);
    }

    let mut ranking: Vec<ChainFee> = models
        .iter()
        .map(|m| {
            let fee_usd = m.fee_usd(size_bytes);
            let fee_ratio = fee_usd / value_usd;
            ChainFee {
                chain: m.chain,
                fee_usd,
                fee_percentage_of_value: fee_ratio * 100.0,
                confirmation_minutes: m.confirmation_minutes,
                efficiency: EfficiencyCurve::for_chain(m.chain).score(fee_ratio),
                handles_micropayments: m.handles_micropayments,
                standing: Standing::Neutral,
                accent: m.chain.accent(),
            }
        })
        .collect();

    for fee in &ranking {
        if !fee.fee_usd.is_finite() {
            return Err(CalcError::Overflow("fee_usd"));
        }
        if !fee.fee_percentage_of_value.is_finite() {
            return Err(CalcError::Overflow("fee_percentage_of_value"));
        }
    }

    // Stable sort: equal scores keep model order, so output is deterministic
    ranking.sort_by(|a, b| {
        b.efficiency
            .partial_cmp(&a.efficiency)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(worst) = ranking.last_mut() {
        worst.standing = Standing::Worst;
    }
    if let Some(best) = ranking.first_mut() {
        best.standing = Standing::Best;
    }

    let mut cmp = FeeComparison {
        transaction_value_usd: value_usd,
        transaction_size_bytes: size_bytes,
        ranking,
        savings_usd: 0.0,
        savings_percentage: 0.0,
    };
    let fees = cmp.best().zip(cmp.worst()).map(|(b, w)| (b.fee_usd, w.fee_usd));
    if let Some((best_fee, worst_fee)) = fees {
        cmp.savings_usd = worst_fee - best_fee;
        if worst_fee != 0.0 {
            cmp.savings_percentage = cmp.savings_usd / worst_fee * 100.0;
        }
    }
    Ok(cmp)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub label: &'static str,
    pub value_usd: f64,
    pub size_bytes: f64,
}

pub fn presets() -> [Preset; 5] {
    [
        Preset { label: "Micropayment", value_usd: 0.10, size_bytes: 200.0 },
        Preset { label: "Small Purchase", value_usd: 5.00, size_bytes: 250.0 },
        Preset { label: "Medium Purchase", value_usd: 50.00, size_bytes: 300.0 },
        Preset { label: "Large Purchase", value_usd: 500.00, size_bytes: 400.0 },
        Preset { label: "Enterprise", value_usd: 5000.00, size_bytes: 500.0 },
    ]
}
