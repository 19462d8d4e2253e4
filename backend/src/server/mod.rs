//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub(crate) use state_builders::{build_http_state, build_store};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use shelter::Trace;
#[cfg(debug_assertions)]
use shelter::doc::ApiDoc;
use shelter::inbound::http::api_scope;
use shelter::inbound::http::health::{HealthState, live, ready};
use shelter::inbound::http::state::HttpState;
use shelter::outbound::persistence::{MigrationError, PoolError};
use shelter::seeding::SeedingError;
use shelter::settings::SettingsError;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Anything that stops the service before it starts listening.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration could not be loaded: {0}")]
    Load(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Seeding(#[from] SeedingError),
}

impl From<StartupError> for std::io::Error {
    fn from(error: StartupError) -> Self {
        std::io::Error::other(error.to_string())
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and return the server future.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || build_app(health_state.clone(), http_state.clone()))
        .bind(config.bind_addr)?
        .run();
    Ok(server)
}
