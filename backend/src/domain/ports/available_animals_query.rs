//! Driving port for the availability listing.

use async_trait::async_trait;

use crate::domain::{Animal, CancellationSignal, Error};

/// Read side of the adoption service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailableAnimalsQuery: Send + Sync {
    /// Every animal that can currently be adopted. Unordered and unpaginated.
    async fn available_animals(
        &self,
        cancellation: CancellationSignal,
    ) -> Result<Vec<Animal>, Error>;
}

/// Query that always reports an empty shelter.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAvailableAnimalsQuery;

#[async_trait]
impl AvailableAnimalsQuery for FixtureAvailableAnimalsQuery {
    async fn available_animals(
        &self,
        _cancellation: CancellationSignal,
    ) -> Result<Vec<Animal>, Error> {
        Ok(Vec::new())
    }
}
