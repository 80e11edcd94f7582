use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, BroadcastRequest, BroadcastResponse};
use crate::explorer::is_txid;

#[get("/arc/tx/{txid}/")]
pub async fn get_arc_transaction(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let txid = path.into_inner().0;
    if !is_txid(&txid) {
        return HttpResponse::BadRequest().body("txid must be 64 hex characters");
    }
    match state.arc.transaction(&txid).await {
        Some(status) => HttpResponse::Ok().json(status),
        None => HttpResponse::NotFound().body(format!("transaction {txid} unknown to ARC")),
    }
}

/// Broadcast a raw transaction through the configured ARC endpoints.
#[post("/arc/tx/")]
pub async fn post_arc_transaction(
    state: web::Data<AppState>,
    body: web::Json<BroadcastRequest>,
) -> impl Responder {
    if body.raw_tx.is_empty() || hex::decode(&body.raw_tx).is_err() {
        return HttpResponse::BadRequest().body("raw_tx must be non-empty hex");
    }

    match state.arc.broadcast(&body.raw_tx).await {
        Ok(txid) => {
            info!("POST /arc/tx/ - broadcast {txid}");
            HttpResponse::Ok().json(BroadcastResponse { txid })
        }
        Err(e) => {
            warn!("POST /arc/tx/ - {e}");
            HttpResponse::BadGateway().body(e.to_string())
        }
    }
}
