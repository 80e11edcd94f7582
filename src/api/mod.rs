mod arc;
mod calculator;
mod fees;
mod health;
pub mod models;
mod network;
mod spv;
mod stats;
mod throughput;
mod transaction;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(calculator::get_use_cases)
            .service(calculator::post_calculate)
            .service(calculator::get_examples)
            .service(fees::get_fee_comparison)
            .service(fees::get_presets)
            .service(throughput::get_throughput)
            .service(throughput::get_scaling)
            .service(spv::post_proof)
            .service(spv::post_verify)
            .service(spv::post_demo)
            .service(spv::get_demo)
            .service(stats::get_ai_stats)
            .service(stats::get_ipv6_stats)
            .service(stats::get_deepfake_stats)
            .service(stats::get_data_exploitation)
            .service(stats::get_competitive)
            .service(network::get_current_block)
            .service(network::get_network_info)
            .service(network::get_transactions)
            .service(network::get_transaction)
            .service(arc::get_arc_transaction)
            .service(arc::post_arc_transaction)
            .service(transaction::post_micropayment_transaction)
            .service(transaction::get_demo_transaction)
            .service(transaction::get_transaction_fee),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::explorer::client::tests::offline_settings;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    fn test_state() -> web::Data<AppState> {
        let settings = Settings {
            explorer: offline_settings(),
            mock_seed: Some(7),
            spv_demo_speed: 0.0,
            ..Settings::default()
        };
        web::Data::new(AppState::new(settings).unwrap())
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(init_routes)).await
        };
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::get().uri("/api/v1/health/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["arc_network"], "testnet");
    }

    #[actix_web::test]
    async fn calculate_custom_scenario() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/api/v1/micropayment/calculate/")
            .set_json(json!({
                "use_case": "custom",
                "amount_per_tx_satoshis": 1000.0,
                "tx_volume_per_period": 50000.0,
                "timeframe": "day"
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let revenue = body["result"]["total_revenue_usd"].as_f64().unwrap();
        let fee_pct = body["result"]["fee_percentage"].as_f64().unwrap();
        assert!((revenue - 25.0).abs() < 1e-9);
        assert!((fee_pct - 1.25).abs() < 1e-9);
    }

    #[actix_web::test]
    async fn calculate_rejects_zero_volume() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/api/v1/micropayment/calculate/")
            .set_json(json!({"amount_per_tx_satoshis": 1000.0, "tx_volume_per_period": 0.0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn calculate_unknown_use_case_is_400() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/api/v1/micropayment/calculate/")
            .set_json(json!({"use_case": "nope"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn fee_comparison_ranks_bsv_first() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::get()
            .uri("/api/v1/fees/compare/?value=10&size=250")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ranking"][0]["chain"], "BSV");
        assert_eq!(body["ranking"][0]["standing"], "best");

        let req = test::TestRequest::get()
            .uri("/api/v1/fees/compare/?value=-1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn throughput_theoretical_view() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::get()
            .uri("/api/v1/throughput/?view=theoretical")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["view"], "theoretical");
        assert_eq!(body["points"][0]["tps"], 1_000_000.0);
    }

    #[actix_web::test]
    async fn proof_roundtrip_verifies() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/api/v1/spv/proof/")
            .set_json(json!({"seed": 42}))
            .to_request();
        let proof: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(proof["proof_nodes"].as_array().unwrap().len(), 8);

        let req = test::TestRequest::post()
            .uri("/api/v1/spv/verify/")
            .set_json(&proof)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["verified"], true);
    }

    #[actix_web::test]
    async fn proof_without_body_uses_state_rng() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::post().uri("/api/v1/spv/proof/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn second_demo_start_conflicts_while_running() {
        let state = test_state();
        let app = app!(state);
        // Claim the run directly so no timer can finish it in between
        state.spv_demo.begin().unwrap();

        let req = test::TestRequest::post().uri("/api/v1/spv/demo/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get().uri("/api/v1/spv/demo/").to_request();
        let snap: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(snap["running"], true);
    }

    #[actix_web::test]
    async fn competitive_category_lookup() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::get()
            .uri("/api/v1/stats/competitive/trust-crisis/")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["solutions"].as_array().unwrap().len(), 4);

        let req = test::TestRequest::get()
            .uri("/api/v1/stats/competitive/unknown/")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn ipv6_top_n() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::get().uri("/api/v1/stats/ipv6/?top=3").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["adoption"].as_array().unwrap().len(), 3);
        assert_eq!(body["stats"]["global_adoption"], 42.5);
    }

    #[actix_web::test]
    async fn offline_network_serves_mock_block() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::get().uri("/api/v1/network/block/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["height"], 873_250);

        let req = test::TestRequest::get()
            .uri("/api/v1/network/transactions/?limit=3")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 3);
    }

    #[actix_web::test]
    async fn offline_tx_lookup_is_404() {
        let state = test_state();
        let app = app!(state);
        let uri = format!("/api/v1/network/tx/{}/", "ab".repeat(32));
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn malformed_txids_are_rejected() {
        let state = test_state();
        let app = app!(state);
        for uri in [
            "/api/v1/network/tx/abcd/",
            "/api/v1/network/tx/%2E%2E/",
            "/api/v1/arc/tx/abcd%3Fx=1/",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn broadcast_rejects_non_hex() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/api/v1/arc/tx/")
            .set_json(json!({"raw_tx": "zz"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn built_transaction_is_broadcastable_hex() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/api/v1/transaction/micropayment/")
            .set_json(json!({
                "recipient_pkh": "ab".repeat(20),
                "amount_satoshis": 1000,
                "message": "pay per sentence"
            }))
            .to_request();
        let tx: Value = test::call_and_read_body_json(&app, req).await;
        let raw = tx["raw_tx"].as_str().unwrap();
        assert!(hex::decode(raw).is_ok());
        assert_eq!(tx["version"], 2);
        assert_eq!(tx["outputs"].as_array().unwrap().len(), 2);

        let req = test::TestRequest::post()
            .uri("/api/v1/transaction/micropayment/")
            .set_json(json!({"recipient_pkh": "1abc", "amount_satoshis": 1000}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn demo_transaction_and_fee() {
        let state = test_state();
        let app = app!(state);
        let req = test::TestRequest::get().uri("/api/v1/transaction/demo/").to_request();
        let tx: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(tx["txid"].as_str().unwrap().len(), 64);
        assert_eq!(tx["outputs"][0]["satoshis"], 1000);

        let req = test::TestRequest::get()
            .uri("/api/v1/transaction/fee/?size_bytes=251")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["fee_satoshis"], 126);
    }
}
