use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};
use std::sync::Arc;

use super::models::{AppState, DemoStartedResponse, ProofRequest, VerifyResponse};
use crate::spv::demo::STEPS;
use crate::spv::proof::create_proof_with;
use crate::spv::{PROOF_DEPTH, SimulatedProof, compute_path_root, create_proof, run_sequence};

/// Fabricate a proof. A given `seed` always yields the same proof.
#[post("/spv/proof/")]
pub async fn post_proof(
    state: web::Data<AppState>,
    body: Option<web::Json<ProofRequest>>,
) -> impl Responder {
    let req = body.map(|b| b.into_inner()).unwrap_or_default();
    let proof = match req.seed {
        Some(seed) => create_proof(seed),
        None => {
            let mut rng = state.rng.lock().expect("mutex poisoned");
            create_proof_with(&mut *rng, PROOF_DEPTH)
        }
    };
    HttpResponse::Ok().json(proof)
}

/// Run the demonstration verifier over a submitted proof.
#[post("/spv/verify/")]
pub async fn post_verify(body: web::Json<SimulatedProof>) -> impl Responder {
    let computed_root = match compute_path_root(&body) {
        Ok(root) => Some(root),
        Err(e) => {
            warn!("POST /spv/verify/ - {e}");
            None
        }
    };
    HttpResponse::Ok().json(VerifyResponse {
        verified: computed_root.is_some(),
        computed_root,
    })
}

/// Start a staged walkthrough. Answers 409 while one is in flight.
#[post("/spv/demo/")]
pub async fn post_demo(state: web::Data<AppState>) -> impl Responder {
    let demo = Arc::clone(&state.spv_demo);
    let run_id = match demo.begin() {
        Ok(id) => id,
        Err(e) => return HttpResponse::Conflict().body(e.to_string()),
    };

    let total_duration_ms: u64 = STEPS.iter().map(|s| demo.scaled(*s).as_millis() as u64).sum();
    actix_web::rt::spawn(run_sequence(demo, run_id));
    info!("POST /spv/demo/ - run {run_id} scheduled ({total_duration_ms} ms)");

    HttpResponse::Accepted().json(DemoStartedResponse {
        run_id,
        total_duration_ms,
    })
}

#[get("/spv/demo/")]
pub async fn get_demo(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.spv_demo.snapshot())
}
