//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use shelter::inbound::http::state::DEFAULT_STORE_TIMEOUT;
use shelter::settings::{ServerSettings, SettingsError};

/// Listener and per-request budget for the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store_timeout: Duration,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Derive the server configuration from loaded settings.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?).with_store_timeout(settings.store_timeout()))
    }

    #[must_use]
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
