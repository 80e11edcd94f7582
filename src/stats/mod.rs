pub mod charts;
pub mod competitive;
pub mod models;

use log::warn;

pub use models::{AiMetrics, DataExploitationStats, DeepfakeMetrics, Ipv6Stats};

use crate::error::StatsError;

/// Where presentation statistics come from. A real feed may fail; the
/// built-in source never does.
pub trait StatsSource: Send + Sync {
    fn ai_metrics(&self) -> Result<AiMetrics, StatsError>;
    fn ipv6_stats(&self) -> Result<Ipv6Stats, StatsError>;
    fn deepfake_metrics(&self) -> Result<DeepfakeMetrics, StatsError>;
    fn data_exploitation(&self) -> Result<DataExploitationStats, StatsError>;
}

/// Fixed figures shipped with the presentation.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockStats;

impl StatsSource for MockStats {
    fn ai_metrics(&self) -> Result<AiMetrics, StatsError> {
        Ok(AiMetrics::default())
    }

    fn ipv6_stats(&self) -> Result<Ipv6Stats, StatsError> {
        Ok(Ipv6Stats::default())
    }

    fn deepfake_metrics(&self) -> Result<DeepfakeMetrics, StatsError> {
        Ok(DeepfakeMetrics::default())
    }

    fn data_exploitation(&self) -> Result<DataExploitationStats, StatsError> {
        Ok(DataExploitationStats::default())
    }
}

/// Wraps a source and substitutes the built-in figures whenever it errors,
/// so callers always get something to render.
pub struct StatsProvider {
    source: Box<dyn StatsSource>,
}

impl Default for StatsProvider {
    fn default() -> Self {
        Self::new(Box::new(MockStats))
    }
}

impl StatsProvider {
    pub fn new(source: Box<dyn StatsSource>) -> Self {
        Self { source }
    }

    pub fn ai_metrics(&self) -> AiMetrics {
        or_default(self.source.ai_metrics(), "AI metrics")
    }

    pub fn ipv6_stats(&self) -> Ipv6Stats {
        or_default(
            self.source.ipv6_stats().and_then(Ipv6Stats::validated),
            "IPv6 stats",
        )
    }

    pub fn deepfake_metrics(&self) -> DeepfakeMetrics {
        or_default(
            self.source
                .deepfake_metrics()
                .and_then(DeepfakeMetrics::validated),
            "deepfake metrics",
        )
    }

    pub fn data_exploitation(&self) -> DataExploitationStats {
        or_default(self.source.data_exploitation(), "data exploitation stats")
    }
}

fn or_default<T: Default>(res: Result<T, StatsError>, what: &str) -> T {
    res.unwrap_or_else(|e| {
        warn!("Failed to fetch {what}, using fallback data: {e}");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl StatsSource for Broken {
        fn ai_metrics(&self) -> Result<AiMetrics, StatsError> {
            Err(StatsError::OutOfRange {
                field: "offline",
                value: 0.0,
            })
        }
        fn ipv6_stats(&self) -> Result<Ipv6Stats, StatsError> {
            Err(StatsError::OutOfRange {
                field: "offline",
                value: 0.0,
            })
        }
        fn deepfake_metrics(&self) -> Result<DeepfakeMetrics, StatsError> {
            Err(StatsError::OutOfRange {
                field: "offline",
                value: 0.0,
            })
        }
        fn data_exploitation(&self) -> Result<DataExploitationStats, StatsError> {
            Err(StatsError::OutOfRange {
                field: "offline",
                value: 0.0,
            })
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let p = StatsProvider::default();
        assert_eq!(p.ipv6_stats(), p.ipv6_stats());
        assert_eq!(p.ai_metrics(), p.ai_metrics());
        assert_eq!(p.deepfake_metrics(), p.deepfake_metrics());
        assert_eq!(p.data_exploitation(), p.data_exploitation());
    }

    #[test]
    fn failing_source_falls_back_to_defaults() {
        let p = StatsProvider::new(Box::new(Broken));
        assert_eq!(p.ipv6_stats(), Ipv6Stats::default());
        assert_eq!(p.ai_metrics().chatgpt_users, 180_000_000);
        assert_eq!(p.deepfake_metrics().incident_reports, 9847);
        assert_eq!(p.data_exploitation().compensation_paid_usd, 0);
    }

    struct Skewed;

    impl StatsSource for Skewed {
        fn ai_metrics(&self) -> Result<AiMetrics, StatsError> {
            MockStats.ai_metrics()
        }
        fn ipv6_stats(&self) -> Result<Ipv6Stats, StatsError> {
            Ok(Ipv6Stats {
                global_adoption: 420.0,
                ..Ipv6Stats::default()
            })
        }
        fn deepfake_metrics(&self) -> Result<DeepfakeMetrics, StatsError> {
            Ok(DeepfakeMetrics {
                human_accuracy: -3.0,
                ..DeepfakeMetrics::default()
            })
        }
        fn data_exploitation(&self) -> Result<DataExploitationStats, StatsError> {
            MockStats.data_exploitation()
        }
    }

    #[test]
    fn out_of_range_figures_fall_back_to_defaults() {
        let p = StatsProvider::new(Box::new(Skewed));
        assert_eq!(p.ipv6_stats().global_adoption, 42.5);
        assert_eq!(p.deepfake_metrics(), DeepfakeMetrics::default());
    }

    #[test]
    fn ipv6_defaults() {
        let s = Ipv6Stats::default();
        assert_eq!(s.country_adoption.len(), 10);
        assert_eq!(s.global_adoption, 42.5);
    }
}
