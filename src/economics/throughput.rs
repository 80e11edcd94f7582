use serde::{Deserialize, Serialize};

use super::fee_model::Chain;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputMetrics {
    pub chain: Chain,
    pub current_tps: f64,
    pub theoretical_max_tps: f64,
    pub block_size_bytes: u64,
    pub block_time_seconds: u32,
    pub scalability_label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThroughputView {
    #[default]
    Current,
    Theoretical,
}

/// One bar of the throughput chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputPoint {
    pub chain: Chain,
    pub tps: f64,
    pub block_size_mb: f64,
}

pub fn throughput_table() -> [ThroughputMetrics; 3] {
    [
        ThroughputMetrics {
            chain: Chain::Bsv,
            current_tps: 300.0,
            theoretical_max_tps: 1_000_000.0,
            block_size_bytes: 4_000_000_000,
            block_time_seconds: 600,
            scalability_label: "Unlimited (IPv6 + Teranode)",
        },
        ThroughputMetrics {
            chain: Chain::Btc,
            current_tps: 4.6,
            theoretical_max_tps: 7.0,
            block_size_bytes: 1_000_000,
            block_time_seconds: 600,
            scalability_label: "Limited (1MB blocks)",
        },
        ThroughputMetrics {
            chain: Chain::Eth,
            current_tps: 12.0,
            theoretical_max_tps: 15.0,
            block_size_bytes: 30_000_000,
            block_time_seconds: 12,
            scalability_label: "Limited (Layer 2 required)",
        },
    ]
}

pub fn view(view: ThroughputView) -> Vec<ThroughputPoint> {
    throughput_table()
        .iter()
        .map(|m| ThroughputPoint {
            chain: m.chain,
            tps: match view {
                ThroughputView::Current => m.current_tps,
                ThroughputView::Theoretical => m.theoretical_max_tps,
            },
            block_size_mb: m.block_size_bytes as f64 / 1_000_000.0,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingCapability {
    pub chain: Chain,
    pub max_block_size: &'static str,
    pub transactions_per_second: u64,
    pub data_storage_per_tx: &'static str,
    pub fee_per_mb: &'static str,
}

pub fn scaling_profile() -> [ScalingCapability; 3] {
    [
        ScalingCapability {
            chain: Chain::Bsv,
            max_block_size: "4GB+",
            transactions_per_second: 1_000_000,
            data_storage_per_tx: "Unlimited",
            fee_per_mb: "$0.05",
        },
        ScalingCapability {
            chain: Chain::Btc,
            max_block_size: "1MB",
            transactions_per_second: 7,
            data_storage_per_tx: "80 bytes",
            fee_per_mb: "$15,000",
        },
        ScalingCapability {
            chain: Chain::Eth,
            max_block_size: "~30MB equivalent",
            transactions_per_second: 15,
            data_storage_per_tx: "Limited by gas",
            fee_per_mb: "$8,500",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_fixed() {
        assert_eq!(throughput_table(), throughput_table());
        let bsv = &throughput_table()[0];
        assert_eq!(bsv.chain, Chain::Bsv);
        assert_eq!(bsv.theoretical_max_tps, 1_000_000.0);
    }

    #[test]
    fn theoretical_never_below_current() {
        for m in throughput_table() {
            assert!(m.theoretical_max_tps >= m.current_tps, "{}", m.chain);
        }
    }

    #[test]
    fn views_project_the_right_column() {
        let cur = view(ThroughputView::Current);
        let theo = view(ThroughputView::Theoretical);
        assert_eq!(cur[1].tps, 4.6);
        assert_eq!(theo[1].tps, 7.0);
        assert_eq!(cur[0].block_size_mb, 4000.0);
    }
}
