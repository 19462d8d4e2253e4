//! Concurrency and lifecycle properties of the adoption coordinator over the
//! in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use rstest::{fixture, rstest};
use tokio::sync::Barrier;

use shelter::domain::ports::{
    AdoptionCommand, AdoptionRequest, AnimalRecord, AnimalStore, AnimalStoreError,
    AvailableAnimalsQuery, ReplaceOutcome,
};
use shelter::domain::{
    AdoptionCoordinator, AdoptionFailure, Animal, AnimalId, AnimalName, CancellationSignal,
};
use shelter::outbound::memory::InMemoryAnimalStore;

fn animal(id: &str, name: &str) -> Animal {
    Animal::new(
        AnimalId::new(id).expect("valid id"),
        AnimalName::new(name).expect("valid name"),
    )
}

fn id(raw: &str) -> AnimalId {
    AnimalId::new(raw).expect("valid id")
}

#[fixture]
async fn store() -> Arc<InMemoryAnimalStore> {
    let store = InMemoryAnimalStore::new();
    store
        .insert_many(&[animal("cat-1", "Tom"), animal("dog-1", "Rex")])
        .await
        .expect("seed animals");
    Arc::new(store)
}

/// Holds every reader at a barrier after lookup so all racers load the same
/// revision before any of them writes.
struct LockstepStore {
    inner: Arc<InMemoryAnimalStore>,
    barrier: Barrier,
}

#[async_trait]
impl AnimalStore for LockstepStore {
    async fn find_by_id(&self, id: &AnimalId) -> Result<Option<AnimalRecord>, AnimalStoreError> {
        let record = self.inner.find_by_id(id).await;
        self.barrier.wait().await;
        record
    }

    async fn conditional_replace(
        &self,
        record: &AnimalRecord,
    ) -> Result<ReplaceOutcome, AnimalStoreError> {
        self.inner.conditional_replace(record).await
    }

    async fn list_available(&self) -> Result<Vec<Animal>, AnimalStoreError> {
        self.inner.list_available().await
    }

    async fn insert_many(&self, animals: &[Animal]) -> Result<usize, AnimalStoreError> {
        self.inner.insert_many(animals).await
    }
}

#[rstest]
#[case(2)]
#[case(8)]
#[case(32)]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn exactly_one_of_many_lockstep_adopters_wins(
    #[future] store: Arc<InMemoryAnimalStore>,
    #[case] racers: usize,
) {
    let store = store.await;
    let coordinator = Arc::new(AdoptionCoordinator::new(Arc::new(LockstepStore {
        inner: store.clone(),
        barrier: Barrier::new(racers),
    })));

    let handles = (0..racers).map(|_| {
        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            coordinator
                .request_adoption(AdoptionRequest::new(id("cat-1")))
                .await
        })
    });
    let outcomes: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task completes"))
        .collect();

    let winners = outcomes.iter().filter(|outcome| outcome.is_success()).count();
    assert_eq!(winners, 1);
    // Every loser read the same revision, so each lost the compare-and-swap.
    for outcome in outcomes.iter().filter(|outcome| !outcome.is_success()) {
        assert_eq!(outcome.failure(), Some(&AdoptionFailure::NotFound(id("cat-1"))));
    }
    let stored = store
        .find_by_id(&id("cat-1"))
        .await
        .expect("lookup")
        .expect("animal present");
    assert!(!stored.animal().is_available());
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn free_running_adopters_still_produce_a_single_winner(
    #[future] store: Arc<InMemoryAnimalStore>,
) {
    let store = store.await;
    let coordinator = Arc::new(AdoptionCoordinator::new(store.clone()));

    let handles = (0..64).map(|_| {
        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            coordinator
                .request_adoption(AdoptionRequest::new(id("dog-1")))
                .await
        })
    });
    let outcomes: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task completes"))
        .collect();

    assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 1);
    // Late arrivals are rejected locally; early ones lose the race.
    assert!(outcomes.iter().filter(|o| !o.is_success()).all(|o| matches!(
        o.failure(),
        Some(AdoptionFailure::AlreadyUnavailable | AdoptionFailure::NotFound(_))
    )));
}

#[rstest]
#[tokio::test]
async fn adopt_then_cancel_round_trips(#[future] store: Arc<InMemoryAnimalStore>) {
    let store = store.await;
    let coordinator = AdoptionCoordinator::new(store.clone());

    let adopted = coordinator
        .request_adoption(AdoptionRequest::new(id("cat-1")))
        .await;
    assert_eq!(adopted.message(), "Adoption successful.");
    let listed = coordinator
        .available_animals(CancellationSignal::never())
        .await
        .expect("listing");
    assert!(listed.iter().all(|animal| animal.id() != &id("cat-1")));

    let cancelled = coordinator
        .cancel_adoption(AdoptionRequest::new(id("cat-1")))
        .await;
    assert_eq!(cancelled.message(), "Adoption canceled.");
    let record = store
        .find_by_id(&id("cat-1"))
        .await
        .expect("lookup")
        .expect("animal present");
    assert!(record.animal().is_available());
    assert_eq!(record.revision(), 3);
}

#[rstest]
#[tokio::test]
async fn cancelling_an_available_animal_is_harmless(#[future] store: Arc<InMemoryAnimalStore>) {
    let store = store.await;
    let coordinator = AdoptionCoordinator::new(store.clone());

    let outcome = coordinator
        .cancel_adoption(AdoptionRequest::new(id("dog-1")))
        .await;

    assert!(outcome.is_success());
    let listed = store.list_available().await.expect("listing");
    assert_eq!(listed.len(), 2);
}

#[rstest]
#[tokio::test]
async fn second_adoption_is_rejected_without_a_write(#[future] store: Arc<InMemoryAnimalStore>) {
    let store = store.await;
    let coordinator = AdoptionCoordinator::new(store.clone());
    coordinator
        .request_adoption(AdoptionRequest::new(id("cat-1")))
        .await;

    let outcome = coordinator
        .request_adoption(AdoptionRequest::new(id("cat-1")))
        .await;

    assert_eq!(outcome.message(), "Animal is not available for adoption.");
    let record = store
        .find_by_id(&id("cat-1"))
        .await
        .expect("lookup")
        .expect("animal present");
    assert_eq!(record.revision(), 2);
}

#[rstest]
#[case::adopt(true)]
#[case::cancel(false)]
#[tokio::test]
async fn unknown_animals_are_reported_by_id(
    #[future] store: Arc<InMemoryAnimalStore>,
    #[case] adopt: bool,
) {
    let coordinator = AdoptionCoordinator::new(store.await);
    let request = AdoptionRequest::new(id("ghost"));

    let outcome = if adopt {
        coordinator.request_adoption(request).await
    } else {
        coordinator.cancel_adoption(request).await
    };

    assert_eq!(outcome.message(), "No animal with id ghost was found.");
}
