use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::config::Settings;
use crate::economics::comparison::Preset;
use crate::economics::micropayment::{CUSTOM_USE_CASE, MicropaymentExample, UseCaseProfile};
use crate::economics::throughput::{ThroughputMetrics, ThroughputPoint};
use crate::economics::{CalculationInput, CalculationResult, ThroughputView, Timeframe};
use crate::error::ExplorerError;
use crate::explorer::{ArcClient, ExplorerClient, ExplorerTransaction, Feed};
use crate::spv::SpvDemo;
use crate::stats::charts::{AdoptionPoint, AiGrowthPoint, NatLimitation, TrustPoint};
use crate::stats::{AiMetrics, DeepfakeMetrics, Ipv6Stats, StatsProvider};

/// Shared application state: providers, the SPV demo and the network clients.
pub struct AppState {
    pub settings: Settings,
    pub stats: StatsProvider,
    pub spv_demo: Arc<SpvDemo>,
    pub feed: Feed,
    pub arc: ArcClient,
    /// Seeds ad-hoc proofs and the throwaway signing keys of built transactions.
    pub rng: Mutex<StdRng>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, ExplorerError> {
        let client = ExplorerClient::new(&settings.explorer)?;
        let arc = ArcClient::new(
            settings.arc_network,
            &settings.arc_deployment_id,
            settings.explorer.timeout,
        )?;
        let rng = match settings.mock_seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            stats: StatsProvider::default(),
            spv_demo: Arc::new(SpvDemo::new(settings.mock_seed, settings.spv_demo_speed)),
            feed: Feed::new(client, settings.mock_seed),
            arc,
            rng: Mutex::new(rng),
            settings,
        })
    }
}

/* ---------- Micropayment API Models ---------- */

#[derive(Serialize)]
pub struct UseCasesResponse {
    pub custom_id: &'static str,
    pub use_cases: Vec<UseCaseProfile>,
}

#[derive(Deserialize)]
pub struct CalculateRequest {
    /// Use-case id, or `custom` to take the amount and volume below.
    #[serde(default = "custom_selection")]
    pub use_case: String,
    pub amount_per_tx_satoshis: Option<f64>,
    pub tx_volume_per_period: Option<f64>,
    #[serde(default)]
    pub timeframe: Timeframe,
}

fn custom_selection() -> String {
    CUSTOM_USE_CASE.to_string()
}

#[derive(Serialize)]
pub struct FormattedResult {
    pub amount_per_tx: String,
    pub total_revenue: String,
    pub total_fees: String,
    pub net_revenue: String,
    pub avg_tx_fee: String,
}

#[derive(Serialize)]
pub struct CalculateResponse {
    pub input: CalculationInput,
    pub result: CalculationResult,
    pub formatted: FormattedResult,
    pub efficiency: u8,
}

#[derive(Serialize)]
pub struct ExamplesResponse {
    pub profitable_threshold_pct: f64,
    pub examples: Vec<MicropaymentExample>,
}

/* ---------- Fee / Throughput API Models ---------- */

#[derive(Deserialize)]
pub struct FeeCompareQuery {
    #[serde(default = "default_value_usd")]
    pub value: f64,
    #[serde(default = "default_size_bytes")]
    pub size: f64,
}

fn default_value_usd() -> f64 {
    10.0
}

fn default_size_bytes() -> f64 {
    crate::economics::AVG_TX_SIZE_BYTES
}

#[derive(Serialize)]
pub struct PresetsResponse {
    pub presets: [Preset; 5],
}

#[derive(Deserialize)]
pub struct ThroughputQuery {
    #[serde(default)]
    pub view: ThroughputView,
}

#[derive(Serialize)]
pub struct ThroughputResponse {
    pub view: ThroughputView,
    pub table: [ThroughputMetrics; 3],
    pub points: Vec<ThroughputPoint>,
}

/* ---------- SPV API Models ---------- */

#[derive(Deserialize, Default)]
pub struct ProofRequest {
    pub seed: Option<u64>,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub verified: bool,
    pub computed_root: Option<String>,
}

#[derive(Serialize)]
pub struct DemoStartedResponse {
    pub run_id: uuid::Uuid,
    pub total_duration_ms: u64,
}

/* ---------- Stats API Models ---------- */

#[derive(Serialize)]
pub struct AiStatsResponse {
    pub metrics: AiMetrics,
    pub growth: Vec<AiGrowthPoint>,
}

#[derive(Deserialize)]
pub struct Ipv6Query {
    pub top: Option<usize>,
}

#[derive(Serialize)]
pub struct Ipv6StatsResponse {
    pub stats: Ipv6Stats,
    pub adoption: Vec<AdoptionPoint>,
    pub nat_limitations: Vec<NatLimitation>,
}

#[derive(Serialize)]
pub struct DeepfakeStatsResponse {
    pub metrics: DeepfakeMetrics,
    pub trust_decline: Vec<TrustPoint>,
}

/* ---------- Network API Models ---------- */

#[derive(Deserialize)]
pub struct TransactionsQuery {
    #[serde(default = "default_tx_limit")]
    pub limit: usize,
}

/// Upper bound on `limit` for the transaction feed.
pub const MAX_TX_LIMIT: usize = 50;

fn default_tx_limit() -> usize {
    10
}

#[derive(Serialize)]
pub struct TransactionsResponse {
    pub count: usize,
    pub transactions: Vec<ExplorerTransaction>,
}

#[derive(Deserialize)]
pub struct BroadcastRequest {
    pub raw_tx: String,
}

#[derive(Serialize)]
pub struct BroadcastResponse {
    pub txid: String,
}

/* ---------- Transaction API Models ---------- */

#[derive(Deserialize)]
pub struct MicropaymentTxRequest {
    pub recipient_pkh: String,
    pub amount_satoshis: u64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct TxFeeQuery {
    pub size_bytes: usize,
}

#[derive(Serialize)]
pub struct TxFeeResponse {
    pub size_bytes: usize,
    pub fee_satoshis: u64,
}
