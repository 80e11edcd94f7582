use actix_web::{HttpResponse, Responder, get, web};
use log::{debug, warn};

use super::models::{FeeCompareQuery, PresetsResponse};
use crate::economics::comparison::presets;
use crate::economics::compare_fees;

/// Fee comparison across BSV, BTC and ETH for one transaction.
#[get("/fees/compare/")]
pub async fn get_fee_comparison(query: web::Query<FeeCompareQuery>) -> impl Responder {
    match compare_fees(query.value, query.size) {
        Ok(cmp) => {
            debug!(
                "GET /fees/compare/ - ${} / {} bytes: best {:?} saves ${:.4}",
                query.value,
                query.size,
                cmp.best().map(|b| b.chain),
                cmp.savings_usd
            );
            HttpResponse::Ok().json(cmp)
        }
        Err(e) => {
            warn!("GET /fees/compare/ - rejected: {e}");
            HttpResponse::BadRequest().body(e.to_string())
        }
    }
}

#[get("/fees/presets/")]
pub async fn get_presets() -> impl Responder {
    HttpResponse::Ok().json(PresetsResponse { presets: presets() })
}
