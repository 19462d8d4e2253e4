//! Driven port for animal persistence.
//!
//! [`AnimalStore`] is the single shared mutable resource in the service. Its
//! [`conditional_replace`](AnimalStore::conditional_replace) is the
//! serialisation point that decides which of several racing writers wins, so
//! every adapter must implement it as an atomic compare-and-swap on the
//! record revision.

use async_trait::async_trait;

use crate::domain::Animal;
use crate::domain::AnimalId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by animal store adapters.
    pub enum AnimalStoreError {
        /// The store could not be reached.
        Connection { message: String } => "animal store connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "animal store query failed: {message}",
        /// An inserted animal collides with an existing record.
        DuplicateAnimal { animal_id: String } => "animal already exists: {animal_id}",
    }
}

/// An animal together with the revision it was read at.
///
/// Revisions start at 1 on insert and grow by one on every applied replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalRecord {
    animal: Animal,
    revision: u32,
}

impl AnimalRecord {
    /// Pair an animal with the revision it was read at.
    pub fn new(animal: Animal, revision: u32) -> Self {
        Self { animal, revision }
    }

    pub fn animal(&self) -> &Animal {
        &self.animal
    }

    /// Mutable access for applying entity transitions to the loaded copy.
    pub fn animal_mut(&mut self) -> &mut Animal {
        &mut self.animal
    }

    /// Revision observed when the record was read.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Drop the revision and keep the entity.
    pub fn into_animal(self) -> Animal {
        self.animal
    }
}

/// What the store reports back from a conditional replace.
///
/// | acknowledged | applied | meaning                                        |
/// |--------------|---------|------------------------------------------------|
/// | `true`       | `true`  | write applied, revision bumped                 |
/// | `true`       | `false` | record changed since the read, or is gone      |
/// | `false`      | `false` | the store cannot say whether the write landed  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub acknowledged: bool,
    pub applied: bool,
}

impl ReplaceOutcome {
    pub const fn applied() -> Self {
        Self {
            acknowledged: true,
            applied: true,
        }
    }

    pub const fn lost_race() -> Self {
        Self {
            acknowledged: true,
            applied: false,
        }
    }

    pub const fn unacknowledged() -> Self {
        Self {
            acknowledged: false,
            applied: false,
        }
    }
}

/// Keyed animal storage with optimistic concurrency.
///
/// Implementations must be safe for unbounded concurrent use.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnimalStore: Send + Sync {
    /// Point lookup. A miss is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: &AnimalId) -> Result<Option<AnimalRecord>, AnimalStoreError>;

    /// Overwrite the stored animal with `record.animal()` only if the stored
    /// revision still equals `record.revision()`.
    ///
    /// A stale revision or a missing record yields
    /// [`ReplaceOutcome::lost_race`]; neither is an error.
    async fn conditional_replace(
        &self,
        record: &AnimalRecord,
    ) -> Result<ReplaceOutcome, AnimalStoreError>;

    /// Every animal currently available, in no particular order.
    async fn list_available(&self) -> Result<Vec<Animal>, AnimalStoreError>;

    /// Insert new animals at revision 1, returning how many were written.
    ///
    /// Fails with [`AnimalStoreError::DuplicateAnimal`] when any id already
    /// exists; adapters write all or nothing.
    async fn insert_many(&self, animals: &[Animal]) -> Result<usize, AnimalStoreError>;
}

/// Store that holds nothing and accepts every insert.
///
/// Useful where the store must exist but is never consulted.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnimalStore;

#[async_trait]
impl AnimalStore for FixtureAnimalStore {
    async fn find_by_id(&self, _id: &AnimalId) -> Result<Option<AnimalRecord>, AnimalStoreError> {
        Ok(None)
    }

    async fn conditional_replace(
        &self,
        _record: &AnimalRecord,
    ) -> Result<ReplaceOutcome, AnimalStoreError> {
        Ok(ReplaceOutcome::lost_race())
    }

    async fn list_available(&self) -> Result<Vec<Animal>, AnimalStoreError> {
        Ok(Vec::new())
    }

    async fn insert_many(&self, animals: &[Animal]) -> Result<usize, AnimalStoreError> {
        Ok(animals.len())
    }
}
