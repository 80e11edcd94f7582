use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::SpvError;

/// Number of Merkle path nodes in a generated proof.
pub const PROOF_DEPTH: usize = 8;

/// Height the fabricated blocks are placed around.
pub const BASE_BLOCK_HEIGHT: u64 = 873_250;

/// A fabricated inclusion proof used to animate the SPV walkthrough.
/// None of the hashes are bound to a real block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedProof {
    pub transaction_id: String,
    pub merkle_root: String,
    pub block_hash: String,
    pub proof_nodes: Vec<String>,
    pub block_height: u64,
    pub proof_size_bytes: u32,
    pub verification_time_seconds: f64,
}

/// Deterministic proof for `seed`.
pub fn create_proof(seed: u64) -> SimulatedProof {
    let mut rng = StdRng::seed_from_u64(seed);
    create_proof_with(&mut rng, PROOF_DEPTH)
}

pub fn create_proof_with<R: Rng + ?Sized>(rng: &mut R, depth: usize) -> SimulatedProof {
    let transaction_id = random_hash_hex(rng);
    let proof_nodes = (0..depth).map(|_| random_hash_hex(rng)).collect();
    let block_hash = random_hash_hex(rng);
    let merkle_root = random_hash_hex(rng);

    SimulatedProof {
        transaction_id,
        merkle_root,
        block_hash,
        proof_nodes,
        block_height: BASE_BLOCK_HEIGHT + rng.gen_range(0..100),
        proof_size_bytes: 256 + rng.gen_range(0..512),
        // millisecond resolution, like the on-screen timer
        verification_time_seconds: (rng.gen_range(0.1..0.6_f64) * 1000.0).round() / 1000.0,
    }
}

fn random_hash_hex<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes);
    hex::encode(bytes)
}

pub(crate) fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second[..]);
    out
}

/// Walks the Merkle path: double-SHA256 of the txid, then for each node the
/// lexicographically smaller hex string goes on the left.
pub fn compute_path_root(proof: &SimulatedProof) -> Result<String, SpvError> {
    let txid = hex::decode(&proof.transaction_id).map_err(|_| SpvError::MalformedHex {
        field: "transaction_id",
    })?;
    let mut hash = hex::encode(sha256d(&txid));

    for node in &proof.proof_nodes {
        let combined = if hash.as_str() < node.as_str() {
            format!("{hash}{node}")
        } else {
            format!("{node}{hash}")
        };
        let bytes = hex::decode(&combined).map_err(|_| SpvError::MalformedHex {
            field: "proof_nodes",
        })?;
        hash = hex::encode(sha256d(&bytes));
    }

    Ok(hash)
}

/// Demonstration verifier. Succeeds whenever the path can be hashed; the
/// result is NOT compared with `merkle_root` or any block header.
pub fn verify_proof(proof: &SimulatedProof) -> bool {
    match compute_path_root(proof) {
        Ok(root) => {
            debug!(
                "SPV - path for tx {} hashes to {} ({} nodes, block #{})",
                proof.transaction_id,
                root,
                proof.proof_nodes.len(),
                proof.block_height
            );
            true
        }
        Err(e) => {
            warn!("SPV - verification failed: {e}");
            false
        }
    }
}
