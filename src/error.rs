//! Error types shared by the calculators, the SPV demo and the explorer feed.

use thiserror::Error;

/// Rejected calculator input. Returned instead of producing NaN/Infinity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("amount per transaction must be > 0 (got {0})")]
    InvalidAmount(f64),

    #[error("transaction volume must be > 0 (got {0})")]
    InvalidVolume(f64),

    #[error("transaction value must be > 0 USD (got {0})")]
    InvalidValue(f64),

    #[error("transaction size must be > 0 bytes (got {0})")]
    InvalidSize(f64),

    #[error("unknown use case '{0}'")]
    UnknownUseCase(String),

    #[error("inputs too large: {0} is not a finite number")]
    Overflow(&'static str),

    #[error("no fee models to compare")]
    NoModels,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpvError {
    #[error("malformed hex in {field}")]
    MalformedHex { field: &'static str },
}

/// Rejected micropayment transaction parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TxError {
    #[error("recipient must be a 20-byte public key hash in hex")]
    InvalidRecipient,

    #[error("payment amount must be > 0 satoshis")]
    ZeroAmount,

    #[error("OP_RETURN message too long: {len} bytes")]
    MessageTooLong { len: usize },

    #[error("signing failed: {0}")]
    Signing(#[from] secp256k1::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DemoError {
    #[error("an SPV demo run is already in progress")]
    AlreadyRunning,
}

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no active chain tip found")]
    NoActiveTip,

    #[error("giving up on {url} after {attempts} attempts: {last}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last: Box<ExplorerError>,
    },

    #[error("all ARC endpoints failed")]
    AllEndpointsFailed,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("statistic {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}
