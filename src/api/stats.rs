use actix_web::{HttpResponse, Responder, get, web};
use log::warn;

use super::models::{AiStatsResponse, AppState, DeepfakeStatsResponse, Ipv6Query, Ipv6StatsResponse};
use crate::stats::charts::{ai_growth_series, ipv6_adoption_series, nat_limitations, trust_decline_series};
use crate::stats::competitive::{ProblemCategory, report};

#[get("/stats/ai/")]
pub async fn get_ai_stats(state: web::Data<AppState>) -> impl Responder {
    let metrics = state.stats.ai_metrics();
    HttpResponse::Ok().json(AiStatsResponse {
        growth: ai_growth_series(&metrics),
        metrics,
    })
}

/// IPv6 adoption; `top` limits the country series.
#[get("/stats/ipv6/")]
pub async fn get_ipv6_stats(
    state: web::Data<AppState>,
    query: web::Query<Ipv6Query>,
) -> impl Responder {
    let stats = state.stats.ipv6_stats();
    HttpResponse::Ok().json(Ipv6StatsResponse {
        adoption: ipv6_adoption_series(&stats, query.top),
        nat_limitations: nat_limitations(),
        stats,
    })
}

#[get("/stats/deepfake/")]
pub async fn get_deepfake_stats(state: web::Data<AppState>) -> impl Responder {
    let metrics = state.stats.deepfake_metrics();
    HttpResponse::Ok().json(DeepfakeStatsResponse {
        trust_decline: trust_decline_series(&metrics),
        metrics,
    })
}

#[get("/stats/data-exploitation/")]
pub async fn get_data_exploitation(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.stats.data_exploitation())
}

/// Competitive analysis for `data-exploitation`, `trust-crisis` or `blockchain-scaling`.
#[get("/stats/competitive/{category}/")]
pub async fn get_competitive(path: web::Path<(String,)>) -> impl Responder {
    let slug = path.into_inner().0;
    match ProblemCategory::parse(&slug) {
        Some(category) => HttpResponse::Ok().json(report(category)),
        None => {
            warn!("GET /stats/competitive/ - unknown category '{slug}'");
            HttpResponse::NotFound().body(format!("unknown category '{slug}'"))
        }
    }
}
