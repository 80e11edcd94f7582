use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::explorer::ArcNetwork;

/// Runtime settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub explorer: ExplorerSettings,
    pub arc_network: ArcNetwork,
    pub arc_deployment_id: String,
    /// Fixed seed for the mock data RNG; random when absent.
    pub mock_seed: Option<u64>,
    /// Multiplier applied to SPV demo step durations (1.0 = real time).
    pub spv_demo_speed: f64,
}

#[derive(Debug, Clone)]
pub struct ExplorerSettings {
    pub base_url: String,
    pub max_requests_per_sec: usize,
    pub cache_ttl: Duration,
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub timeout: Duration,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.whatsonchain.com/v1/bsv/main".to_string(),
            max_requests_per_sec: 2,
            cache_ttl: Duration::from_secs(30),
            max_attempts: 3,
            backoff_base: Duration::from_millis(1000),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            explorer: ExplorerSettings::default(),
            arc_network: ArcNetwork::Testnet,
            arc_deployment_id: "00000000".to_string(),
            mock_seed: None,
            spv_demo_speed: 1.0,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let d = Settings::default();
        let explorer = ExplorerSettings {
            base_url: env::var("EXPLORER_BASE_URL").unwrap_or(d.explorer.base_url),
            max_requests_per_sec: parse_var("EXPLORER_MAX_RPS")
                .filter(|n| *n > 0)
                .unwrap_or(d.explorer.max_requests_per_sec),
            cache_ttl: parse_var("EXPLORER_CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(d.explorer.cache_ttl),
            max_attempts: parse_var("EXPLORER_MAX_ATTEMPTS")
                .filter(|n| *n > 0)
                .unwrap_or(d.explorer.max_attempts),
            backoff_base: parse_var("EXPLORER_BACKOFF_MS")
                .map(Duration::from_millis)
                .unwrap_or(d.explorer.backoff_base),
            timeout: parse_var("EXPLORER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(d.explorer.timeout),
        };

        Self {
            host: env::var("HOST").unwrap_or(d.host),
            port: parse_var("PORT").unwrap_or(d.port),
            explorer,
            arc_network: parse_var("ARC_NETWORK").unwrap_or(d.arc_network),
            arc_deployment_id: env::var("ARC_DEPLOYMENT_ID").unwrap_or(d.arc_deployment_id),
            mock_seed: parse_var("MOCK_SEED"),
            spv_demo_speed: parse_var::<f64>("SPV_DEMO_SPEED")
                .filter(|s| s.is_finite() && *s >= 0.0)
                .unwrap_or(d.spv_demo_speed),
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
