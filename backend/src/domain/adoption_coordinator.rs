//! Adoption coordinator.
//!
//! Implements the driving ports on top of any [`AnimalStore`]. Each request
//! loads the record, applies the entity transition to that private copy, then
//! asks the store to persist it conditionally on the revision it was read at.
//! The conditional replace is the only serialisation point: of N racing
//! adopters exactly one sees `applied`, the rest fail.
//!
//! The coordinator holds no locks and no mutable state, never retries, and
//! never logs; adapters on either side do that.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AdoptionCommand, AdoptionRequest, AnimalRecord, AnimalStore, AnimalStoreError,
    AvailableAnimalsQuery,
};
use crate::domain::{
    AdoptionAction, AdoptionFailure, AdoptionOutcome, Animal, AnimalId, CancellationSignal, Error,
};

/// Stateless adoption service, generic over its store.
///
/// `S` may be unsized, so a coordinator over `dyn AnimalStore` works when the
/// backend is chosen at runtime.
pub struct AdoptionCoordinator<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> AdoptionCoordinator<S> {
    /// Coordinate transitions against `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: ?Sized> Clone for AdoptionCoordinator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> AdoptionCoordinator<S>
where
    S: AnimalStore + ?Sized,
{
    async fn transition(
        &self,
        request: AdoptionRequest,
        action: AdoptionAction,
    ) -> AdoptionOutcome {
        self.try_transition(&request.animal_id, &request.cancellation, action)
            .await
            .map(|()| action)
            .into()
    }

    async fn try_transition(
        &self,
        id: &AnimalId,
        cancellation: &CancellationSignal,
        action: AdoptionAction,
    ) -> Result<(), AdoptionFailure> {
        let mut record = self.load(id, cancellation).await?;

        match action {
            AdoptionAction::Adopt => record.animal_mut().request_adoption()?,
            AdoptionAction::Cancel => record.animal_mut().cancel_adoption(),
        }

        self.persist(id, &record, cancellation).await
    }

    async fn load(
        &self,
        id: &AnimalId,
        cancellation: &CancellationSignal,
    ) -> Result<AnimalRecord, AdoptionFailure> {
        match cancellation.run(self.store.find_by_id(id)).await {
            Ok(Ok(Some(record))) => Ok(record),
            Ok(Ok(None)) => Err(AdoptionFailure::NotFound(id.clone())),
            // Store faults and cancellation both mean the state change could
            // not be carried out.
            Ok(Err(_)) | Err(_) => Err(AdoptionFailure::UpdateConflict(id.clone())),
        }
    }

    async fn persist(
        &self,
        id: &AnimalId,
        record: &AnimalRecord,
        cancellation: &CancellationSignal,
    ) -> Result<(), AdoptionFailure> {
        let outcome = match cancellation.run(self.store.conditional_replace(record)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) | Err(_) => return Err(AdoptionFailure::UpdateConflict(id.clone())),
        };

        if !outcome.acknowledged {
            return Err(AdoptionFailure::UpdateConflict(id.clone()));
        }
        if !outcome.applied {
            // A lost race is reported the same way as a missing record.
            return Err(AdoptionFailure::NotFound(id.clone()));
        }
        Ok(())
    }

    fn map_store_error(error: AnimalStoreError) -> Error {
        match error {
            AnimalStoreError::Connection { message } => {
                Error::service_unavailable(format!("animal store unavailable: {message}"))
            }
            AnimalStoreError::Query { message } => {
                Error::internal(format!("animal store error: {message}"))
            }
            AnimalStoreError::DuplicateAnimal { animal_id } => {
                Error::internal(format!("unexpected duplicate animal: {animal_id}"))
            }
        }
    }
}

#[async_trait]
impl<S> AdoptionCommand for AdoptionCoordinator<S>
where
    S: AnimalStore + ?Sized,
{
    async fn request_adoption(&self, request: AdoptionRequest) -> AdoptionOutcome {
        self.transition(request, AdoptionAction::Adopt).await
    }

    async fn cancel_adoption(&self, request: AdoptionRequest) -> AdoptionOutcome {
        self.transition(request, AdoptionAction::Cancel).await
    }
}

#[async_trait]
impl<S> AvailableAnimalsQuery for AdoptionCoordinator<S>
where
    S: AnimalStore + ?Sized,
{
    async fn available_animals(
        &self,
        cancellation: CancellationSignal,
    ) -> Result<Vec<Animal>, Error> {
        cancellation
            .run(self.store.list_available())
            .await
            .map_err(|_| Error::service_unavailable("animal listing timed out"))?
            .map_err(Self::map_store_error)
    }
}

#[cfg(test)]
#[path = "adoption_coordinator_tests.rs"]
mod tests;
