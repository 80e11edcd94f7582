use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, error, warn};

use super::models::{AppState, MicropaymentTxRequest, TxFeeQuery, TxFeeResponse};
use crate::transaction::{calculate_transaction_fee, create_micropayment_transaction, demo_transaction};

/// Build and sign a micropayment; the `raw_tx` can go straight to `POST /arc/tx/`.
#[post("/transaction/micropayment/")]
pub async fn post_micropayment_transaction(
    state: web::Data<AppState>,
    body: web::Json<MicropaymentTxRequest>,
) -> impl Responder {
    let built = {
        let mut rng = state.rng.lock().expect("mutex poisoned");
        create_micropayment_transaction(
            &mut *rng,
            &body.recipient_pkh,
            body.amount_satoshis,
            body.message.as_deref(),
        )
    };
    match built {
        Ok(tx) => {
            debug!(
                "POST /transaction/micropayment/ - {} ({} bytes, fee {} sat)",
                tx.txid, tx.size_bytes, tx.fee_satoshis
            );
            HttpResponse::Ok().json(tx)
        }
        Err(e) => {
            warn!("POST /transaction/micropayment/ - rejected: {e}");
            HttpResponse::BadRequest().body(e.to_string())
        }
    }
}

#[get("/transaction/demo/")]
pub async fn get_demo_transaction(state: web::Data<AppState>) -> impl Responder {
    let built = {
        let mut rng = state.rng.lock().expect("mutex poisoned");
        demo_transaction(&mut *rng)
    };
    match built {
        Ok(tx) => HttpResponse::Ok().json(tx),
        Err(e) => {
            error!("GET /transaction/demo/ - {e}");
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[get("/transaction/fee/")]
pub async fn get_transaction_fee(query: web::Query<TxFeeQuery>) -> impl Responder {
    HttpResponse::Ok().json(TxFeeResponse {
        size_bytes: query.size_bytes,
        fee_satoshis: calculate_transaction_fee(query.size_bytes),
    })
}
