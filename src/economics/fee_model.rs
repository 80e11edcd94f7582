use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    AVG_TX_SIZE_BYTES, BSV_PRICE_USD, BSV_STANDARD_FEE_RATE, BTC_FEE_RATE, BTC_PRICE_USD,
    ETH_FLAT_FEE_USD, MICROPAYMENT_FEE_RATE, SATOSHIS_PER_COIN,
};

/// Chains shown side by side in the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Chain {
    Bsv,
    Btc,
    Eth,
}

impl Chain {
    pub fn ticker(self) -> &'static str {
        match self {
            Chain::Bsv => "BSV",
            Chain::Btc => "BTC",
            Chain::Eth => "ETH",
        }
    }

    /// Accent used by the front end; a closed table instead of string lookups.
    pub fn accent(self) -> Accent {
        match self {
            Chain::Bsv => Accent::Green,
            Chain::Btc => Accent::Orange,
            Chain::Eth => Accent::Blue,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Green,
    Orange,
    Blue,
    Amber,
    Red,
    Purple,
    Gray,
}

/// How a chain charges for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeeSchedule {
    PerByte { sat_per_byte: f64 },
    Flat { usd: f64 },
}

/// Fee constants for a chain. Immutable configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeModel {
    pub chain: Chain,
    pub schedule: FeeSchedule,
    pub avg_tx_size: f64,
    pub reference_price_usd: f64,
    pub confirmation_minutes: f64,
    pub handles_micropayments: bool,
}

impl FeeModel {
    /// Model behind the micropayment calculator (BSV at 0.05 sat/byte).
    pub const fn micropayment() -> Self {
        Self {
            chain: Chain::Bsv,
            schedule: FeeSchedule::PerByte {
                sat_per_byte: MICROPAYMENT_FEE_RATE,
            },
            avg_tx_size: AVG_TX_SIZE_BYTES,
            reference_price_usd: BSV_PRICE_USD,
            confirmation_minutes: 0.0,
            handles_micropayments: true,
        }
    }

    pub const fn bsv() -> Self {
        Self {
            chain: Chain::Bsv,
            schedule: FeeSchedule::PerByte {
                sat_per_byte: BSV_STANDARD_FEE_RATE,
            },
            avg_tx_size: AVG_TX_SIZE_BYTES,
            reference_price_usd: BSV_PRICE_USD,
            confirmation_minutes: 0.0,
            handles_micropayments: true,
        }
    }

    pub const fn btc() -> Self {
        Self {
            chain: Chain::Btc,
            schedule: FeeSchedule::PerByte {
                sat_per_byte: BTC_FEE_RATE,
            },
            avg_tx_size: AVG_TX_SIZE_BYTES,
            reference_price_usd: BTC_PRICE_USD,
            confirmation_minutes: 60.0,
            handles_micropayments: false,
        }
    }

    pub const fn eth() -> Self {
        Self {
            chain: Chain::Eth,
            schedule: FeeSchedule::Flat {
                usd: ETH_FLAT_FEE_USD,
            },
            avg_tx_size: AVG_TX_SIZE_BYTES,
            reference_price_usd: 0.0,
            confirmation_minutes: 5.0,
            handles_micropayments: false,
        }
    }

    /// The three comparator models, in display order.
    pub fn comparator_set() -> [FeeModel; 3] {
        [Self::bsv(), Self::btc(), Self::eth()]
    }

    /// Fee for one transaction of `size_bytes`, in satoshis.
    /// Flat-rate chains have no satoshi fee and report `None`.
    pub fn fee_satoshis(&self, size_bytes: f64) -> Option<f64> {
        match self.schedule {
            FeeSchedule::PerByte { sat_per_byte } => Some(sat_per_byte * size_bytes),
            FeeSchedule::Flat { .. } => None,
        }
    }

    /// Fee for one transaction of `size_bytes`, in USD.
    pub fn fee_usd(&self, size_bytes: f64) -> f64 {
        match self.schedule {
            FeeSchedule::PerByte { sat_per_byte } => {
                sat_per_byte * size_bytes / SATOSHIS_PER_COIN * self.reference_price_usd
            }
            FeeSchedule::Flat { usd } => usd,
        }
    }

    /// Fee for an average-sized transaction, in satoshis (0 for flat-rate chains).
    pub fn avg_fee_satoshis(&self) -> f64 {
        self.fee_satoshis(self.avg_tx_size).unwrap_or(0.0)
    }

    /// Converts satoshis of this chain's coin into USD.
    pub fn satoshis_to_usd(&self, satoshis: f64) -> f64 {
        satoshis / SATOSHIS_PER_COIN * self.reference_price_usd
    }
}
