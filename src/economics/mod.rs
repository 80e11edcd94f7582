pub mod comparison;
pub mod fee_model;
pub mod format;
pub mod micropayment;
pub mod throughput;

pub use comparison::compare_fees;
pub use fee_model::FeeModel;
pub use micropayment::{CalculationInput, CalculationResult, Timeframe, calculate};
pub use throughput::{ThroughputView, throughput_table};

/// Satoshis in one coin (BSV/BTC base unit).
pub const SATOSHIS_PER_COIN: f64 = 100_000_000.0;

/// Reference BSV price used by every calculator (USD).
pub const BSV_PRICE_USD: f64 = 50.0;

/// Reference BTC price for the comparator (USD).
pub const BTC_PRICE_USD: f64 = 50_000.0;

/// Typical transaction size used when none is given (bytes).
pub const AVG_TX_SIZE_BYTES: f64 = 250.0;

/// Fee rate behind the micropayment calculator (sat/byte).
pub const MICROPAYMENT_FEE_RATE: f64 = 0.05;

/// Standard BSV relay fee rate used by the comparator and examples (sat/byte).
pub const BSV_STANDARD_FEE_RATE: f64 = 0.5;

/// BTC fee rate under congestion (sat/byte).
pub const BTC_FEE_RATE: f64 = 50.0;

/// Average ETH transfer cost (USD, flat).
pub const ETH_FLAT_FEE_USD: f64 = 8.50;
