//! Driving port for adopt and cancel requests.

use async_trait::async_trait;

use crate::domain::{AdoptionAction, AdoptionOutcome, AnimalId, CancellationSignal};

/// A single adopt or cancel request.
#[derive(Debug, Clone)]
pub struct AdoptionRequest {
    pub animal_id: AnimalId,
    /// Aborts in-flight store work when fired.
    pub cancellation: CancellationSignal,
}

impl AdoptionRequest {
    /// Request with no cancellation attached.
    pub fn new(animal_id: AnimalId) -> Self {
        Self {
            animal_id,
            cancellation: CancellationSignal::never(),
        }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationSignal) -> Self {
        self.cancellation = cancellation;
        self
    }
}

/// Adoption state changes exposed to inbound adapters.
///
/// Both operations are total: every failure mode is folded into the returned
/// [`AdoptionOutcome`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdoptionCommand: Send + Sync {
    async fn request_adoption(&self, request: AdoptionRequest) -> AdoptionOutcome;

    async fn cancel_adoption(&self, request: AdoptionRequest) -> AdoptionOutcome;
}

/// Command that accepts every request without touching any store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAdoptionCommand;

#[async_trait]
impl AdoptionCommand for FixtureAdoptionCommand {
    async fn request_adoption(&self, _request: AdoptionRequest) -> AdoptionOutcome {
        AdoptionOutcome::Success(AdoptionAction::Adopt)
    }

    async fn cancel_adoption(&self, _request: AdoptionRequest) -> AdoptionOutcome {
        AdoptionOutcome::Success(AdoptionAction::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_reports_success_for_both_actions() {
        let id = AnimalId::new("cat-1").expect("valid id");
        let command = FixtureAdoptionCommand;

        let adopted = command.request_adoption(AdoptionRequest::new(id.clone())).await;
        let cancelled = command.cancel_adoption(AdoptionRequest::new(id)).await;

        assert_eq!(adopted.message(), "Adoption successful.");
        assert_eq!(cancelled.message(), "Adoption canceled.");
    }
}
