use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;

use super::models::AppState;
use crate::explorer::ArcNetwork;

#[derive(Serialize)]
struct HealthResponse<'a> {
    status: &'static str,
    version: &'static str,
    arc_network: ArcNetwork,
    explorer: &'a str,
}

#[get("/health/")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        arc_network: state.settings.arc_network,
        explorer: &state.settings.explorer.base_url,
    })
}
