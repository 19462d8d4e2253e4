//! In-process animal store.
//!
//! Records live in a mutex-guarded ordered map. Every operation takes the lock
//! for its full duration, which makes `conditional_replace` an atomic
//! compare-and-swap on the revision. Used when no database is configured and
//! throughout the integration tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{AnimalRecord, AnimalStore, AnimalStoreError, ReplaceOutcome};
use crate::domain::{Animal, AnimalId};

/// Revision assigned to freshly inserted records.
const INITIAL_REVISION: u32 = 1;

/// Mutex-guarded map of revisioned animal records.
#[derive(Debug, Default)]
pub struct InMemoryAnimalStore {
    records: Mutex<BTreeMap<AnimalId, AnimalRecord>>,
}

impl InMemoryAnimalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(
        &self,
    ) -> Result<MutexGuard<'_, BTreeMap<AnimalId, AnimalRecord>>, AnimalStoreError> {
        self.records
            .lock()
            .map_err(|_| AnimalStoreError::query("in-memory animal store lock poisoned"))
    }

    /// Number of stored animals, available or not.
    pub fn len(&self) -> usize {
        self.records.lock().map_or(0, |records| records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AnimalStore for InMemoryAnimalStore {
    async fn find_by_id(&self, id: &AnimalId) -> Result<Option<AnimalRecord>, AnimalStoreError> {
        Ok(self.records()?.get(id).cloned())
    }

    async fn conditional_replace(
        &self,
        record: &AnimalRecord,
    ) -> Result<ReplaceOutcome, AnimalStoreError> {
        let mut records = self.records()?;
        let Some(stored) = records.get_mut(record.animal().id()) else {
            return Ok(ReplaceOutcome::lost_race());
        };
        if stored.revision() != record.revision() {
            return Ok(ReplaceOutcome::lost_race());
        }
        let next = record.revision().checked_add(1).ok_or_else(|| {
            AnimalStoreError::query(format!("revision {} exhausted", record.revision()))
        })?;
        *stored = AnimalRecord::new(record.animal().clone(), next);
        Ok(ReplaceOutcome::applied())
    }

    async fn list_available(&self) -> Result<Vec<Animal>, AnimalStoreError> {
        Ok(self
            .records()?
            .values()
            .filter(|record| record.animal().is_available())
            .map(|record| record.animal().clone())
            .collect())
    }

    async fn insert_many(&self, animals: &[Animal]) -> Result<usize, AnimalStoreError> {
        let mut records = self.records()?;
        let mut batch = BTreeMap::new();
        for animal in animals {
            let id = animal.id();
            if records.contains_key(id) || batch.contains_key(id) {
                return Err(AnimalStoreError::duplicate_animal(id.as_str()));
            }
            batch.insert(
                id.clone(),
                AnimalRecord::new(animal.clone(), INITIAL_REVISION),
            );
        }
        let written = batch.len();
        records.extend(batch);
        Ok(written)
    }
}
