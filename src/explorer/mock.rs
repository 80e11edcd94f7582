//! Stand-in records served whenever the live explorer is unreachable.

use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};

use super::models::{BlockInfo, ExplorerTransaction, NetworkStats, TxInputView, TxOutputView};
use crate::transaction::script::op_return;

pub const MOCK_BLOCK_HEIGHT: u64 = 873_250;
pub const MOCK_BLOCK_TX_COUNT: u64 = 2_156;
const MOCK_BLOCK_HASH: &str = "0000000000000000001c8d5e7e4a7b1d9f5a7e4a7b1d9f5a7e4a7b1d9f5a7e4a";
const MOCK_DIFFICULTY: f64 = 112_628_548_513.7;

/// Spacing between consecutive mock transactions.
const TX_SPACING_SECS: i64 = 300;
/// Offset for the ids of the outputs mock transactions spend.
const INPUT_SEED_OFFSET: u64 = 1_000;

struct Scenario {
    satoshis: u64,
    fee: u64,
    message: &'static str,
}

const SCENARIOS: [Scenario; 5] = [
    Scenario { satoshis: 100, fee: 50, message: "AI training data payment" },
    Scenario { satoshis: 1_000, fee: 50, message: "Content verification proof" },
    Scenario { satoshis: 500, fee: 50, message: "IoT sensor data" },
    Scenario { satoshis: 2_500, fee: 100, message: "Micropayment for API call" },
    Scenario { satoshis: 50, fee: 25, message: "Timestamp proof" },
];

/// Deterministic transaction id: hex SHA-256 of the decimal seed.
pub fn mock_txid(seed: u64) -> String {
    hex::encode(Sha256::digest(seed.to_string().as_bytes()))
}

pub fn block_info(now: i64) -> BlockInfo {
    BlockInfo {
        hash: MOCK_BLOCK_HASH.to_string(),
        height: MOCK_BLOCK_HEIGHT,
        time: now,
        tx_count: MOCK_BLOCK_TX_COUNT,
        size: 4_567_890,
        difficulty: MOCK_DIFFICULTY,
        merkle_root: None,
    }
}

pub fn network_stats(now: i64) -> NetworkStats {
    NetworkStats {
        chain: "main".to_string(),
        blocks: MOCK_BLOCK_HEIGHT,
        headers: MOCK_BLOCK_HEIGHT,
        best_block_hash: MOCK_BLOCK_HASH.to_string(),
        difficulty: MOCK_DIFFICULTY,
        median_time: now - 600,
        verification_progress: 0.99999,
        chainwork: "00000000000000000000000000000000000000000123456789abcdef123456".to_string(),
        size_on_disk: 456_789_123_456,
        pruned: false,
    }
}

/// `count` example transactions, newest first, cycling through the scenarios.
pub fn transactions<R: Rng + ?Sized>(rng: &mut R, count: usize, now: i64) -> Vec<ExplorerTransaction> {
    (0..count)
        .map(|i| {
            let scenario = &SCENARIOS[i % SCENARIOS.len()];
            let seed = i as u64;
            ExplorerTransaction {
                txid: mock_txid(seed),
                size: 250 + rng.gen_range(0..100),
                fee_satoshis: Some(scenario.fee),
                time: now - i as i64 * TX_SPACING_SECS,
                inputs: vec![TxInputView {
                    txid: mock_txid(seed + INPUT_SEED_OFFSET),
                    vout: 0,
                    sequence: 0xFFFF_FFFF,
                    unlocking_script: format!("4730440220{}", "0".repeat(128)),
                    address: Some(format!("1BSV{}", random_tag(rng))),
                    satoshis: Some(scenario.satoshis + scenario.fee),
                }],
                outputs: vec![
                    TxOutputView {
                        satoshis: scenario.satoshis,
                        locking_script: format!("76a914{}88ac", "0".repeat(40)),
                        address: Some(format!("1Recv{}", random_tag(rng))),
                        kind: "p2pkh".to_string(),
                    },
                    TxOutputView {
                        satoshis: 0,
                        locking_script: op_return_script(scenario.message),
                        address: None,
                        kind: "nulldata".to_string(),
                    },
                ],
            }
        })
        .collect()
}

pub fn transactions_now<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<ExplorerTransaction> {
    transactions(rng, count, Utc::now().timestamp())
}

fn op_return_script(message: &str) -> String {
    hex::encode(op_return(message.as_bytes()))
}

fn random_tag<R: Rng + ?Sized>(rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    (0..6)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
