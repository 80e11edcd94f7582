use actix_web::{HttpResponse, Responder, get, web};

use super::models::{ThroughputQuery, ThroughputResponse};
use crate::economics::throughput::{scaling_profile, view};
use crate::economics::throughput_table;

/// Throughput table plus the chart projection for `view` (default: current).
#[get("/throughput/")]
pub async fn get_throughput(query: web::Query<ThroughputQuery>) -> impl Responder {
    HttpResponse::Ok().json(ThroughputResponse {
        view: query.view,
        table: throughput_table(),
        points: view(query.view),
    })
}

#[get("/throughput/scaling/")]
pub async fn get_scaling() -> impl Responder {
    HttpResponse::Ok().json(scaling_profile())
}
