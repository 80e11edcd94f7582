use serde::Serialize;

use crate::error::StatsError;

fn percentage(field: &'static str, value: f64) -> Result<(), StatsError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(StatsError::OutOfRange { field, value })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiMetrics {
    pub chatgpt_users: u64,
    pub ai_investment_usd: u64,
    pub ai_models_released: u32,
    pub processing_power_growth_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryAdoption {
    pub country: &'static str,
    pub adoption_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ipv6Stats {
    pub global_adoption: f64,
    pub country_adoption: Vec<CountryAdoption>,
    pub google_traffic: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeepfakeMetrics {
    pub detection_accuracy: f64,
    pub human_accuracy: f64,
    pub trust_index: f64,
    pub incident_reports: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSize {
    pub company: &'static str,
    pub size: &'static str,
    pub cost_usd: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataExploitationStats {
    pub web_scraping_volume_bytes: u64,
    pub compensation_paid_usd: u64,
    pub creators_affected: u64,
    pub dataset_sizes: Vec<DatasetSize>,
}

impl Default for AiMetrics {
    fn default() -> Self {
        Self {
            chatgpt_users: 180_000_000,
            ai_investment_usd: 200_000_000_000,
            ai_models_released: 150,
            processing_power_growth_pct: 300.0,
        }
    }
}

impl Default for Ipv6Stats {
    fn default() -> Self {
        let countries = [
            ("United States", 48.2),
            ("Germany", 65.8),
            ("Belgium", 71.4),
            ("India", 68.9),
            ("France", 52.3),
            ("United Kingdom", 32.1),
            ("Brazil", 44.6),
            ("Japan", 41.8),
            ("China", 3.2),
            ("Russia", 8.4),
        ];
        Self {
            global_adoption: 42.5,
            country_adoption: countries
                .into_iter()
                .map(|(country, adoption_pct)| CountryAdoption {
                    country,
                    adoption_pct,
                })
                .collect(),
            google_traffic: 40.1,
            growth: 8.5,
        }
    }
}

impl Ipv6Stats {
    /// Adoption and traffic shares must lie in `0..=100`.
    pub fn validated(self) -> Result<Self, StatsError> {
        percentage("global_adoption", self.global_adoption)?;
        percentage("google_traffic", self.google_traffic)?;
        for c in &self.country_adoption {
            percentage("adoption_pct", c.adoption_pct)?;
        }
        Ok(self)
    }
}

impl DeepfakeMetrics {
    pub fn validated(self) -> Result<Self, StatsError> {
        percentage("detection_accuracy", self.detection_accuracy)?;
        percentage("human_accuracy", self.human_accuracy)?;
        percentage("trust_index", self.trust_index)?;
        Ok(self)
    }
}

impl Default for DeepfakeMetrics {
    fn default() -> Self {
        Self {
            detection_accuracy: 73.2,
            human_accuracy: 61.8,
            trust_index: 34.7,
            incident_reports: 9847,
        }
    }
}

impl Default for DataExploitationStats {
    fn default() -> Self {
        let datasets = [
            ("OpenAI", "570GB"),
            ("Meta", "1.4TB"),
            ("Google", "2.3TB"),
            ("Microsoft", "825GB"),
            ("Anthropic", "650GB"),
        ];
        Self {
            web_scraping_volume_bytes: 45_000_000_000_000,
            compensation_paid_usd: 0,
            creators_affected: 2_800_000_000,
            dataset_sizes: datasets
                .into_iter()
                .map(|(company, size)| DatasetSize {
                    company,
                    size,
                    cost_usd: 0,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_outside_percent_range_are_rejected() {
        assert!(Ipv6Stats::default().validated().is_ok());
        assert!(DeepfakeMetrics::default().validated().is_ok());

        let mut s = Ipv6Stats::default();
        s.country_adoption[3].adoption_pct = 140.0;
        assert_eq!(
            s.validated(),
            Err(StatsError::OutOfRange {
                field: "adoption_pct",
                value: 140.0
            })
        );

        let d = DeepfakeMetrics {
            trust_index: f64::NAN,
            ..DeepfakeMetrics::default()
        };
        assert!(matches!(
            d.validated(),
            Err(StatsError::OutOfRange { field: "trust_index", .. })
        ));
    }
}
