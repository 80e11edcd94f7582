use serde::{Deserialize, Serialize};

use super::FeeModel;
use super::fee_model::Accent;
use crate::error::CalcError;

/// Period the daily volume is projected over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    #[default]
    Day,
    Month,
    Year,
}

impl Timeframe {
    pub fn multiplier(self) -> f64 {
        match self {
            Timeframe::Day => 1.0,
            Timeframe::Month => 30.0,
            Timeframe::Year => 365.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UseCaseCategory {
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "IoT")]
    Iot,
    Content,
    Gaming,
    Data,
}

impl UseCaseCategory {
    pub fn accent(self) -> Accent {
        match self {
            UseCaseCategory::Ai => Accent::Purple,
            UseCaseCategory::Iot => Accent::Blue,
            UseCaseCategory::Content => Accent::Green,
            UseCaseCategory::Gaming => Accent::Orange,
            UseCaseCategory::Data => Accent::Gray,
        }
    }
}

/// A preset micropayment scenario the presenter can pick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UseCaseProfile {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub satoshis_per_tx: f64,
    pub tx_volume_per_day: f64,
    pub category: UseCaseCategory,
    pub accent: Accent,
}

/// Selection id meaning "use the caller's own amount and volume".
pub const CUSTOM_USE_CASE: &str = "custom";

const USE_CASES: [(&str, &str, &str, f64, f64, UseCaseCategory); 5] = [
    (
        "ai-api",
        "AI API Calls",
        "Pay per AI model inference or computation",
        1000.0,
        50_000.0,
        UseCaseCategory::Ai,
    ),
    (
        "content-access",
        "Content Access",
        "Per-article reading or video streaming",
        500.0,
        25_000.0,
        UseCaseCategory::Content,
    ),
    (
        "iot-data",
        "IoT Data Exchange",
        "Sensor data transmission and processing",
        50.0,
        100_000.0,
        UseCaseCategory::Iot,
    ),
    (
        "gaming-rewards",
        "Gaming Rewards",
        "In-game achievements and item trading",
        2500.0,
        75_000.0,
        UseCaseCategory::Gaming,
    ),
    (
        "data-storage",
        "Data Storage",
        "Pay per MB of decentralized storage",
        5000.0,
        15_000.0,
        UseCaseCategory::Data,
    ),
];

pub fn use_cases() -> Vec<UseCaseProfile> {
    USE_CASES
        .iter()
        .map(
            |&(id, display_name, description, sats, volume, category)| UseCaseProfile {
                id,
                display_name,
                description,
                satoshis_per_tx: sats,
                tx_volume_per_day: volume,
                category,
                accent: category.accent(),
            },
        )
        .collect()
}

pub fn find_use_case(id: &str) -> Option<UseCaseProfile> {
    use_cases().into_iter().find(|uc| uc.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub amount_per_tx_satoshis: f64,
    pub tx_volume_per_period: f64,
    #[serde(default)]
    pub timeframe: Timeframe,
}

impl CalculationInput {
    /// Builds the input from a use-case id, or from the custom values when the
    /// selection is `custom`. Missing custom values are rejected.
    pub fn resolve(
        selection: &str,
        custom_amount: Option<f64>,
        custom_volume: Option<f64>,
        timeframe: Timeframe,
    ) -> Result<Self, CalcError> {
        if selection == CUSTOM_USE_CASE {
            return Ok(Self {
                amount_per_tx_satoshis: custom_amount.ok_or(CalcError::InvalidAmount(0.0))?,
                tx_volume_per_period: custom_volume.ok_or(CalcError::InvalidVolume(0.0))?,
                timeframe,
            });
        }
        let uc = find_use_case(selection)
            .ok_or_else(|| CalcError::UnknownUseCase(selection.to_string()))?;
        Ok(Self {
            amount_per_tx_satoshis: uc.satoshis_per_tx,
            tx_volume_per_period: uc.tx_volume_per_day,
            timeframe,
        })
    }

    fn validate(&self) -> Result<(), CalcError> {
        let amount = self.amount_per_tx_satoshis;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CalcError::InvalidAmount(amount));
        }
        let volume = self.tx_volume_per_period;
        if !volume.is_finite() || volume <= 0.0 {
            return Err(CalcError::InvalidVolume(volume));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    pub amount_per_tx_satoshis: f64,
    pub total_volume: f64,
    pub total_revenue_usd: f64,
    pub total_fees_usd: f64,
    pub net_revenue_usd: f64,
    pub fee_percentage: f64,
    pub profit_margin_percentage: f64,
    pub avg_tx_value_usd: f64,
    pub avg_tx_fee_usd: f64,
}

/// Revenue/fee projection for a micropayment business. Pure.
pub fn calculate(input: &CalculationInput, model: &FeeModel) -> Result<CalculationResult, CalcError> {
    input.validate()?;

    let amount = input.amount_per_tx_satoshis;
    let fee_per_tx = model.avg_fee_satoshis();
    let total_volume = input.tx_volume_per_period * input.timeframe.multiplier();

    let total_revenue_usd = model.satoshis_to_usd(amount * total_volume);
    let total_fees_usd = model.satoshis_to_usd(fee_per_tx * total_volume);
    let net_revenue_usd = total_revenue_usd - total_fees_usd;

    let result = CalculationResult {
        amount_per_tx_satoshis: amount,
        total_volume,
        total_revenue_usd,
        total_fees_usd,
        net_revenue_usd,
        fee_percentage: percentage_of(total_fees_usd, total_revenue_usd),
        profit_margin_percentage: percentage_of(net_revenue_usd, total_revenue_usd),
        avg_tx_value_usd: model.satoshis_to_usd(amount),
        avg_tx_fee_usd: model.satoshis_to_usd(fee_per_tx),
    };
    result.ensure_finite()?;
    Ok(result)
}

impl CalculationResult {
    fn ensure_finite(&self) -> Result<(), CalcError> {
        let fields = [
            ("total_volume", self.total_volume),
            ("total_revenue_usd", self.total_revenue_usd),
            ("total_fees_usd", self.total_fees_usd),
            ("net_revenue_usd", self.net_revenue_usd),
            ("fee_percentage", self.fee_percentage),
            ("profit_margin_percentage", self.profit_margin_percentage),
            ("avg_tx_value_usd", self.avg_tx_value_usd),
            ("avg_tx_fee_usd", self.avg_tx_fee_usd),
        ];
        match fields.into_iter().find(|(_, v)| !v.is_finite()) {
            Some((name, _)) => Err(CalcError::Overflow(name)),
            None => Ok(()),
        }
    }
}

fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole * 100.0 }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MicropaymentExample {
    pub description: &'static str,
    pub purpose: &'static str,
    pub amount_satoshis: f64,
    pub usd_value: f64,
    pub fee_satoshis: f64,
    pub fee_usd: f64,
    pub fee_percentage: f64,
    pub profitable: bool,
}

/// Fee share below which a payment is considered viable.
pub const PROFITABLE_FEE_PCT: f64 = 10.0;

/// Canned examples at the standard BSV relay fee.
pub fn micropayment_examples() -> Vec<MicropaymentExample> {
    let model = FeeModel::bsv();
    let fee = model.avg_fee_satoshis();

    [
        ("AI API call", "Pay per API request", 1000.0),
        ("Content view", "Micropayment for article", 100.0),
        ("Data storage", "Store data on-chain", 500.0),
        ("IoT communication", "Device-to-device payment", 50.0),
        ("Timestamp proof", "Prove existence", 25.0),
    ]
    .into_iter()
    .map(|(description, purpose, amount)| {
        let fee_percentage = fee / amount * 100.0;
        MicropaymentExample {
            description,
            purpose,
            amount_satoshis: amount,
            usd_value: model.satoshis_to_usd(amount),
            fee_satoshis: fee,
            fee_usd: model.satoshis_to_usd(fee),
            fee_percentage,
            profitable: fee_percentage < PROFITABLE_FEE_PCT,
        }
    })
    .collect()
}

/// Coarse 0-100 score from the fee-to-amount ratio.
pub fn efficiency_tier(fee: f64, amount: f64) -> u8 {
    if amount <= 0.0 {
        return 20;
    }
    let pct = fee / amount * 100.0;
    match pct {
        p if p < 0.1 => 100,
        p if p < 1.0 => 90,
        p if p < 5.0 => 70,
        p if p < 10.0 => 50,
        _ => 20,
    }
}
