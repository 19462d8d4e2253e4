//! Store selection and HTTP state wiring.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use shelter::domain::AdoptionCoordinator;
use shelter::domain::ports::AnimalStore;
use shelter::inbound::http::state::HttpState;
use shelter::outbound::memory::InMemoryAnimalStore;
use shelter::outbound::persistence::{DbPool, DieselAnimalStore, PoolConfig, run_pending_migrations};
use shelter::settings::ServerSettings;

use super::{ServerConfig, StartupError};

/// Pick the store backend from settings.
///
/// A configured database URL selects PostgreSQL, optionally migrating first;
/// otherwise animals live in process memory.
pub(crate) async fn build_store(
    settings: &ServerSettings,
) -> Result<Arc<dyn AnimalStore>, StartupError> {
    let Some(url) = settings.database_url() else {
        info!(store = "memory", "animal store selected");
        return Ok(Arc::new(InMemoryAnimalStore::new()));
    };

    if settings.run_migrations {
        run_pending_migrations(url).await?;
    }
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size())).await?;
    info!(
        store = "postgres",
        pool_max_size = settings.pool_max_size(),
        "animal store selected"
    );
    Ok(Arc::new(DieselAnimalStore::new(pool)))
}

/// Wire one coordinator behind both driving ports.
pub(crate) fn build_http_state(
    store: Arc<dyn AnimalStore>,
    config: &ServerConfig,
) -> web::Data<HttpState> {
    let coordinator = Arc::new(AdoptionCoordinator::new(store));
    web::Data::new(
        HttpState::new(coordinator.clone(), coordinator).with_store_timeout(config.store_timeout),
    )
}
