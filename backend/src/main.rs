//! Shelter service entry point: loads settings, selects the animal store,
//! seeds sample data and serves the HTTP API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shelter::inbound::http::health::HealthState;
use shelter::seeding::{SeedSettings, seed_on_startup};
use shelter::settings::ServerSettings;

use server::{ServerConfig, StartupError, build_http_state, build_store, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    // Configuration comes from the environment only.
    let program = [OsString::from("shelter")];
    let settings = ServerSettings::load_from_iter(program.clone())
        .map_err(|e| StartupError::Load(e.to_string()))?;
    let seed_settings =
        SeedSettings::load_from_iter(program).map_err(|e| StartupError::Load(e.to_string()))?;
    let config = ServerConfig::from_settings(&settings).map_err(StartupError::from)?;

    let store = build_store(&settings).await?;
    let seeded = seed_on_startup(&seed_settings, store.as_ref())
        .await
        .map_err(StartupError::from)?;
    info!(outcome = ?seeded, "startup seeding finished");

    let health_state = web::Data::new(HealthState::new());
    let http_state = build_http_state(store, &config);
    let server = create_server(health_state.clone(), http_state, config)?;
    info!(bind_addr = %config.bind_addr(), "shelter listening");
    health_state.mark_ready();

    let result = server.await;
    health_state.mark_draining();
    info!("shelter stopped");
    result
}
