pub mod demo;
pub mod proof;

pub use demo::{SpvDemo, run_sequence};
pub use proof::{PROOF_DEPTH, SimulatedProof, compute_path_root, create_proof};
