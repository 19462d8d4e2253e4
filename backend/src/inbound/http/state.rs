//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports, so
//! they can be tested against fixtures or mocks without any store.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::CancellationSignal;
use crate::domain::ports::{
    AdoptionCommand, AvailableAnimalsQuery, FixtureAdoptionCommand, FixtureAvailableAnimalsQuery,
};

/// Store time budget used when none is configured.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub adoption: Arc<dyn AdoptionCommand>,
    pub available_animals: Arc<dyn AvailableAnimalsQuery>,
    /// Upper bound on store work per request.
    pub store_timeout: Duration,
}

impl HttpState {
    pub fn new(
        adoption: Arc<dyn AdoptionCommand>,
        available_animals: Arc<dyn AvailableAnimalsQuery>,
    ) -> Self {
        Self {
            adoption,
            available_animals,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Fresh deadline for one request's store work.
    pub fn request_cancellation(&self) -> CancellationSignal {
        CancellationSignal::with_timeout(self.store_timeout)
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureAdoptionCommand),
            Arc::new(FixtureAvailableAnimalsQuery),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn request_cancellation_honours_the_timeout() {
        let state = HttpState::default().with_store_timeout(Duration::from_secs(30));
        let signal = state.request_cancellation();
        assert!(!signal.is_cancelled());
        let deadline = signal.deadline().expect("deadline set");
        let remaining = deadline - tokio::time::Instant::now();
        assert!(remaining <= Duration::from_secs(30));
        assert!(remaining > Duration::from_secs(25));
    }

    #[tokio::test]
    async fn zero_timeout_is_already_expired() {
        let state = HttpState::default().with_store_timeout(Duration::ZERO);
        assert!(state.request_cancellation().is_cancelled());
    }
}
