use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, warn};

use super::models::{
    CalculateRequest, CalculateResponse, ExamplesResponse, FormattedResult, UseCasesResponse,
};
use crate::economics::format::{format_satoshis, format_usd};
use crate::economics::micropayment::{
    CUSTOM_USE_CASE, PROFITABLE_FEE_PCT, efficiency_tier, micropayment_examples, use_cases,
};
use crate::economics::{CalculationInput, FeeModel, calculate};

/// Preset micropayment scenarios.
#[get("/micropayment/use-cases/")]
pub async fn get_use_cases() -> impl Responder {
    HttpResponse::Ok().json(UseCasesResponse {
        custom_id: CUSTOM_USE_CASE,
        use_cases: use_cases(),
    })
}

/// Revenue, fees and margin for a use case or custom amount/volume.
#[post("/micropayment/calculate/")]
pub async fn post_calculate(body: web::Json<CalculateRequest>) -> impl Responder {
    let req = body.into_inner();
    let input = match CalculationInput::resolve(
        &req.use_case,
        req.amount_per_tx_satoshis,
        req.tx_volume_per_period,
        req.timeframe,
    ) {
        Ok(i) => i,
        Err(e) => {
            warn!("POST /micropayment/calculate/ - rejected: {e}");
            return HttpResponse::BadRequest().body(e.to_string());
        }
    };

    let model = FeeModel::micropayment();
    let result = match calculate(&input, &model) {
        Ok(r) => r,
        Err(e) => {
            warn!("POST /micropayment/calculate/ - rejected: {e}");
            return HttpResponse::BadRequest().body(e.to_string());
        }
    };
    debug!(
        "POST /micropayment/calculate/ - {} x {} over {:?}: net ${:.4}",
        input.amount_per_tx_satoshis, input.tx_volume_per_period, input.timeframe, result.net_revenue_usd
    );

    let fee_sats = model.avg_fee_satoshis();
    HttpResponse::Ok().json(CalculateResponse {
        input,
        formatted: FormattedResult {
            amount_per_tx: format_satoshis(input.amount_per_tx_satoshis),
            total_revenue: format_usd(result.total_revenue_usd),
            total_fees: format_usd(result.total_fees_usd),
            net_revenue: format_usd(result.net_revenue_usd),
            avg_tx_fee: format_usd(result.avg_tx_fee_usd),
        },
        efficiency: efficiency_tier(fee_sats, input.amount_per_tx_satoshis),
        result,
    })
}

/// Worked micropayment examples at the standard fee rate.
#[get("/micropayment/examples/")]
pub async fn get_examples() -> impl Responder {
    HttpResponse::Ok().json(ExamplesResponse {
        profitable_threshold_pct: PROFITABLE_FEE_PCT,
        examples: micropayment_examples(),
    })
}
