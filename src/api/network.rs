use actix_web::{HttpResponse, Responder, get, web};
use log::debug;

use super::models::{AppState, MAX_TX_LIMIT, TransactionsQuery, TransactionsResponse};
use crate::explorer::is_txid;

/// Current chain tip (mock block when the explorer is unreachable).
#[get("/network/block/")]
pub async fn get_current_block(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.feed.current_block().await)
}

#[get("/network/info/")]
pub async fn get_network_info(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.feed.network_stats().await)
}

/// Recent transactions, newest first. `limit` is capped.
#[get("/network/transactions/")]
pub async fn get_transactions(
    state: web::Data<AppState>,
    query: web::Query<TransactionsQuery>,
) -> impl Responder {
    let limit = query.limit.min(MAX_TX_LIMIT);
    let transactions = state.feed.recent_transactions(limit).await;
    debug!("GET /network/transactions/ - {} of {limit}", transactions.len());
    HttpResponse::Ok().json(TransactionsResponse {
        count: transactions.len(),
        transactions,
    })
}

#[get("/network/tx/{txid}/")]
pub async fn get_transaction(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let txid = path.into_inner().0;
    if !is_txid(&txid) {
        return HttpResponse::BadRequest().body("txid must be 64 hex characters");
    }
    match state.feed.transaction(&txid).await {
        Some(tx) => {
            debug!("GET /network/tx/ - {txid} fee rate {:?} sat/byte", tx.fee_rate());
            HttpResponse::Ok().json(tx)
        }
        None => HttpResponse::NotFound().body(format!("transaction {txid} not found")),
    }
}
