mod api;
mod config;
mod economics;
mod error;
mod explorer;
mod spv;
mod stats;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::io;

use api::AppState;
use config::Settings;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();
    let (host, port) = (settings.host.clone(), settings.port);

    info!(
        "explorer {} ({} req/s, cache {}s), ARC {}",
        settings.explorer.base_url,
        settings.explorer.max_requests_per_sec,
        settings.explorer.cache_ttl.as_secs(),
        settings.arc_network
    );
    println!("🔗 Starting BSV showcase API at http://{host}:{port}");

    let state = AppState::new(settings).map_err(io::Error::other)?;
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
