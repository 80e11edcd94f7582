use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use super::proof::{PROOF_DEPTH, SimulatedProof, create_proof_with, verify_proof};
use crate::error::DemoError;

/// Stages of the SPV walkthrough, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    DownloadHeaders,
    VerifyMerkleProof,
    ValidateChainWork,
    Complete,
}

pub const STEPS: [StepKind; 4] = [
    StepKind::DownloadHeaders,
    StepKind::VerifyMerkleProof,
    StepKind::ValidateChainWork,
    StepKind::Complete,
];

impl StepKind {
    pub fn title(self) -> &'static str {
        match self {
            StepKind::DownloadHeaders => "Download Block Headers",
            StepKind::VerifyMerkleProof => "Verify Merkle Proof",
            StepKind::ValidateChainWork => "Validate Chain Work",
            StepKind::Complete => "Verification Complete",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StepKind::DownloadHeaders => "Retrieving lightweight block headers instead of full blocks",
            StepKind::VerifyMerkleProof => "Validating transaction inclusion using cryptographic proof",
            StepKind::ValidateChainWork => "Confirming block is part of longest chain with most work",
            StepKind::Complete => "Transaction verified without downloading full blockchain",
        }
    }

    pub fn duration(self) -> Duration {
        match self {
            StepKind::DownloadHeaders => Duration::from_millis(500),
            StepKind::VerifyMerkleProof => Duration::from_millis(200),
            StepKind::ValidateChainWork | StepKind::Complete => Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Processing,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { step: usize },
    Completed,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub proof: SimulatedProof,
    pub verified: bool,
}

struct DemoState {
    phase: Phase,
    run_id: Option<Uuid>,
    /// Proof the current (or next) run walks through.
    proof: SimulatedProof,
    verified: Option<bool>,
    last_outcome: Option<RunOutcome>,
    completed_runs: u64,
}

/// Staged SPV verification sequence. One run at a time; a run cannot be
/// cancelled and a new one may only start after the previous completed.
pub struct SpvDemo {
    state: Mutex<DemoState>,
    rng: Mutex<StdRng>,
    speed: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub kind: StepKind,
    pub title: &'static str,
    pub description: &'static str,
    pub duration_ms: u64,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoSnapshot {
    pub run_id: Option<Uuid>,
    pub running: bool,
    pub current_step: Option<StepKind>,
    pub progress_pct: f64,
    pub steps: Vec<StepView>,
    pub proof: SimulatedProof,
    pub verified: Option<bool>,
    pub last_outcome: Option<RunOutcome>,
    pub completed_runs: u64,
}

impl SpvDemo {
    /// `speed` scales every step duration; `0.0` makes runs instantaneous.
    pub fn new(seed: Option<u64>, speed: f64) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let proof = create_proof_with(&mut rng, PROOF_DEPTH);
        Self {
            state: Mutex::new(DemoState {
                phase: Phase::Idle,
                run_id: None,
                proof,
                verified: None,
                last_outcome: None,
                completed_runs: 0,
            }),
            rng: Mutex::new(rng),
            speed,
        }
    }

    /// Starts a run and puts the first step into `Processing`.
    pub fn begin(&self) -> Result<Uuid, DemoError> {
        let mut st = self.state.lock().expect("mutex poisoned");
        if let Phase::Running { .. } = st.phase {
            return Err(DemoError::AlreadyRunning);
        }
        let run_id = Uuid::new_v4();
        st.phase = Phase::Running { step: 0 };
        st.run_id = Some(run_id);
        st.verified = None;
        info!("SPV demo - run {run_id} started for tx {}", st.proof.transaction_id);
        Ok(run_id)
    }

    pub fn scaled(&self, step: StepKind) -> Duration {
        step.duration().mul_f64(self.speed)
    }

    /// Marks the running step complete and moves to the next one.
    /// Calls for a run that is no longer current are ignored.
    pub fn finish_step(&self, run_id: Uuid) {
        let mut st = self.state.lock().expect("mutex poisoned");
        let step = match (st.phase, st.run_id) {
            (Phase::Running { step }, Some(id)) if id == run_id => step,
            _ => {
                debug!("SPV demo - ignoring step completion for stale run {run_id}");
                return;
            }
        };

        if STEPS[step] == StepKind::VerifyMerkleProof {
            st.verified = Some(verify_proof(&st.proof));
        }

        let next = step + 1;
        if next < STEPS.len() {
            st.phase = Phase::Running { step: next };
            debug!("SPV demo - run {run_id}: {:?} -> {:?}", STEPS[step], STEPS[next]);
            return;
        }

        // Run done: archive it and prepare a fresh proof for the next one
        let fresh = {
            let mut rng = self.rng.lock().expect("mutex poisoned");
            create_proof_with(&mut *rng, PROOF_DEPTH)
        };
        let proof = std::mem::replace(&mut st.proof, fresh);
        let verified = st.verified.unwrap_or(false);
        st.verified = None;
        st.last_outcome = Some(RunOutcome {
            run_id,
            proof,
            verified,
        });
        st.phase = Phase::Completed;
        st.completed_runs += 1;
        info!("SPV demo - run {run_id} complete (verified={verified})");
    }

    pub fn snapshot(&self) -> DemoSnapshot {
        let st = self.state.lock().expect("mutex poisoned");

        let total: Duration = STEPS.iter().map(|s| s.duration()).sum();
        let (current, finished) = match st.phase {
            Phase::Idle => (None, 0),
            Phase::Running { step } => (Some(step), step),
            Phase::Completed => (None, STEPS.len()),
        };
        let done: Duration = STEPS[..finished].iter().map(|s| s.duration()).sum();

        let steps = STEPS
            .iter()
            .enumerate()
            .map(|(i, &kind)| StepView {
                kind,
                title: kind.title(),
                description: kind.description(),
                duration_ms: kind.duration().as_millis() as u64,
                status: if i < finished {
                    StepStatus::Complete
                } else if Some(i) == current {
                    StepStatus::Processing
                } else {
                    StepStatus::Pending
                },
            })
            .collect();

        DemoSnapshot {
            run_id: st.run_id,
            running: current.is_some(),
            current_step: current.map(|i| STEPS[i]),
            progress_pct: done.as_secs_f64() / total.as_secs_f64() * 100.0,
            steps,
            proof: st.proof.clone(),
            verified: st.verified,
            last_outcome: st.last_outcome.clone(),
            completed_runs: st.completed_runs,
        }
    }
}

/// Drives a started run through every step with its (scaled) delay.
pub async fn run_sequence(demo: Arc<SpvDemo>, run_id: Uuid) {
    for step in STEPS {
        actix_web::rt::time::sleep(demo.scaled(step)).await;
        demo.finish_step(run_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(s: &DemoSnapshot) -> Vec<StepStatus> {
        s.steps.iter().map(|v| v.status).collect()
    }

    #[test]
    fn idle_snapshot_is_all_pending() {
        let demo = SpvDemo::new(Some(1), 0.0);
        let s = demo.snapshot();
        assert!(!s.running);
        assert_eq!(s.progress_pct, 0.0);
        assert!(statuses(&s).iter().all(|st| *st == StepStatus::Pending));
        assert_eq!(s.proof.proof_nodes.len(), PROOF_DEPTH);
    }

    #[test]
    fn steps_advance_strictly_in_order() {
        let demo = SpvDemo::new(Some(2), 0.0);
        let id = demo.begin().unwrap();

        let s = demo.snapshot();
        assert_eq!(s.current_step, Some(StepKind::DownloadHeaders));
        assert_eq!(
            statuses(&s),
            vec![
                StepStatus::Processing,
                StepStatus::Pending,
                StepStatus::Pending,
                StepStatus::Pending
            ]
        );

        demo.finish_step(id);
        let s = demo.snapshot();
        assert_eq!(s.current_step, Some(StepKind::VerifyMerkleProof));
        // 500ms of 900ms
        assert!((s.progress_pct - 500.0 / 900.0 * 100.0).abs() < 1e-9);

        demo.finish_step(id);
        assert_eq!(demo.snapshot().verified, Some(true));
        demo.finish_step(id);
        demo.finish_step(id);

        let s = demo.snapshot();
        assert!(!s.running);
        assert!((s.progress_pct - 100.0).abs() < 1e-9);
        assert!(statuses(&s).iter().all(|st| *st == StepStatus::Complete));
        assert_eq!(s.completed_runs, 1);
        let outcome = s.last_outcome.unwrap();
        assert_eq!(outcome.run_id, id);
        assert!(outcome.verified);
        // next run gets a fresh proof
        assert_ne!(outcome.proof, s.proof);
    }

    #[test]
    fn cannot_start_while_running() {
        let demo = SpvDemo::new(Some(3), 0.0);
        let id = demo.begin().unwrap();
        assert_eq!(demo.begin(), Err(DemoError::AlreadyRunning));
        for _ in STEPS {
            demo.finish_step(id);
        }
        assert!(demo.begin().is_ok());
    }

    #[test]
    fn stale_run_ids_are_ignored() {
        let demo = SpvDemo::new(Some(4), 0.0);
        let id = demo.begin().unwrap();
        demo.finish_step(Uuid::new_v4());
        assert_eq!(demo.snapshot().current_step, Some(StepKind::DownloadHeaders));
        demo.finish_step(id);
        assert_eq!(demo.snapshot().current_step, Some(StepKind::VerifyMerkleProof));
    }

    #[test]
    fn durations_scale() {
        let demo = SpvDemo::new(Some(5), 0.5);
        assert_eq!(demo.scaled(StepKind::DownloadHeaders), Duration::from_millis(250));
        assert_eq!(StepKind::VerifyMerkleProof.duration(), Duration::from_millis(200));
    }

    #[actix_web::test]
    async fn sequence_runs_to_completion() {
        let demo = Arc::new(SpvDemo::new(Some(6), 0.0));
        let id = demo.begin().unwrap();
        run_sequence(Arc::clone(&demo), id).await;
        let s = demo.snapshot();
        assert!(!s.running);
        assert_eq!(s.completed_runs, 1);
        assert!(demo.begin().is_ok());
    }

    #[test]
    fn fresh_proof_is_not_reported_verified() {
        let demo = SpvDemo::new(Some(7), 0.0);
        let id = demo.begin().unwrap();
        for _ in STEPS {
            demo.finish_step(id);
        }
        let s = demo.snapshot();
        assert_eq!(s.verified, None);
        let outcome = s.last_outcome.unwrap();
        assert!(outcome.verified);
        assert_ne!(outcome.proof, s.proof);
    }
}
