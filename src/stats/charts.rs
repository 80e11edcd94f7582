//! Series shaped for the presentation's charts.

use serde::Serialize;

use super::{AiMetrics, DeepfakeMetrics, Ipv6Stats};
use crate::economics::fee_model::Accent;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiGrowthPoint {
    pub year: u16,
    pub users_millions: u32,
    pub investment_billions: u32,
    pub models: u32,
}

/// Yearly AI growth. The final year tracks the current metrics.
pub fn ai_growth_series(metrics: &AiMetrics) -> Vec<AiGrowthPoint> {
    let mut series: Vec<AiGrowthPoint> = [
        (2020, 0, 50, 10),
        (2021, 0, 75, 25),
        (2022, 0, 120, 45),
        (2023, 100, 150, 85),
    ]
    .into_iter()
    .map(|(year, users_millions, investment_billions, models)| AiGrowthPoint {
        year,
        users_millions,
        investment_billions,
        models,
    })
    .collect();

    series.push(AiGrowthPoint {
        year: 2024,
        users_millions: (metrics.chatgpt_users / 1_000_000) as u32,
        investment_billions: (metrics.ai_investment_usd / 1_000_000_000) as u32,
        models: metrics.ai_models_released,
    });
    series
}

/// Adoption band, mapped to a fixed accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdoptionTier {
    High,
    Moderate,
    Low,
}

impl AdoptionTier {
    pub fn for_pct(pct: f64) -> Self {
        if pct > 50.0 {
            AdoptionTier::High
        } else if pct > 30.0 {
            AdoptionTier::Moderate
        } else {
            AdoptionTier::Low
        }
    }

    pub fn accent(self) -> Accent {
        match self {
            AdoptionTier::High => Accent::Green,
            AdoptionTier::Moderate => Accent::Amber,
            AdoptionTier::Low => Accent::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdoptionPoint {
    pub country: &'static str,
    pub adoption: f64,
    pub tier: AdoptionTier,
    pub accent: Accent,
}

/// Countries sorted by adoption, highest first; `top` limits the count.
pub fn ipv6_adoption_series(stats: &Ipv6Stats, top: Option<usize>) -> Vec<AdoptionPoint> {
    let mut points: Vec<AdoptionPoint> = stats
        .country_adoption
        .iter()
        .map(|c| {
            let tier = AdoptionTier::for_pct(c.adoption_pct);
            AdoptionPoint {
                country: c.country,
                adoption: c.adoption_pct,
                tier,
                accent: tier.accent(),
            }
        })
        .collect();
    points.sort_by(|a, b| {
        b.adoption
            .partial_cmp(&a.adoption)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if let Some(n) = top {
        points.truncate(n);
    }
    points
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustPoint {
    pub year: u16,
    pub trust: f64,
    pub detection: f64,
    pub human: f64,
}

/// Trust and detection decline. The final year tracks the current metrics.
pub fn trust_decline_series(metrics: &DeepfakeMetrics) -> Vec<TrustPoint> {
    let mut series: Vec<TrustPoint> = [
        (2018, 78.0, 95.0, 85.0),
        (2019, 74.0, 92.0, 82.0),
        (2020, 68.0, 88.0, 78.0),
        (2021, 61.0, 84.0, 74.0),
        (2022, 52.0, 79.0, 68.0),
        (2023, 43.0, 76.0, 64.0),
    ]
    .into_iter()
    .map(|(year, trust, detection, human)| TrustPoint {
        year,
        trust,
        detection,
        human,
    })
    .collect();

    series.push(TrustPoint {
        year: 2024,
        trust: metrics.trust_index.round(),
        detection: metrics.detection_accuracy.round(),
        human: metrics.human_accuracy.round(),
    });
    series
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NatLimitation {
    pub aspect: &'static str,
    pub with_nat: u8,
    pub with_ipv6: u8,
}

pub fn nat_limitations() -> Vec<NatLimitation> {
    [
        ("Direct Communication", 15, 95),
        ("P2P Efficiency", 25, 90),
        ("IoT Scalability", 35, 100),
        ("Blockchain P2P", 20, 85),
        ("Edge Computing", 30, 95),
    ]
    .into_iter()
    .map(|(aspect, with_nat, with_ipv6)| NatLimitation {
        aspect,
        with_nat,
        with_ipv6,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_series_ends_with_current_metrics() {
        let s = ai_growth_series(&AiMetrics::default());
        assert_eq!(s.len(), 5);
        let last = s.last().unwrap();
        assert_eq!((last.year, last.users_millions, last.investment_billions, last.models), (2024, 180, 200, 150));
    }

    #[test]
    fn adoption_tiers() {
        assert_eq!(AdoptionTier::for_pct(71.4), AdoptionTier::High);
        assert_eq!(AdoptionTier::for_pct(50.0), AdoptionTier::Moderate);
        assert_eq!(AdoptionTier::for_pct(30.0), AdoptionTier::Low);
        assert_eq!(AdoptionTier::Low.accent(), Accent::Red);
    }

    #[test]
    fn adoption_sorted_and_truncated() {
        let pts = ipv6_adoption_series(&Ipv6Stats::default(), Some(8));
        assert_eq!(pts.len(), 8);
        assert_eq!(pts[0].country, "Belgium");
        assert!(pts.windows(2).all(|w| w[0].adoption >= w[1].adoption));
        // China and Russia fall off the top 8
        assert!(pts.iter().all(|p| p.country != "China"));
    }

    #[test]
    fn trust_series_is_declining() {
        let s = trust_decline_series(&DeepfakeMetrics::default());
        assert_eq!(s.len(), 7);
        assert!(s.windows(2).all(|w| w[0].trust > w[1].trust));
        assert_eq!(s[6].trust, 35.0);
    }

    #[test]
    fn ipv6_beats_nat_everywhere() {
        assert!(nat_limitations().iter().all(|n| n.with_ipv6 > n.with_nat));
    }
}
