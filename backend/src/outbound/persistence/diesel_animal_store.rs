//! PostgreSQL-backed [`AnimalStore`] using Diesel async.
//!
//! Conditional replace is a single `UPDATE ... WHERE id = $1 AND revision = $2`
//! that also bumps the revision, so PostgreSQL row locking picks the winner
//! among concurrent writers. Zero affected rows means the record moved on or
//! vanished.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AnimalRecord, AnimalStore, AnimalStoreError, ReplaceOutcome};
use crate::domain::{Animal, AnimalId};

use super::error_mapping::{is_unacknowledged, map_diesel_error, map_insert_error, map_pool_error};
use super::models::{AnimalRow, NewAnimalRow};
use super::pool::DbPool;
use super::schema::animals;

const INITIAL_REVISION: i32 = 1;

/// Bind parameters per inserted row; one per column of [`NewAnimalRow`].
const BINDS_PER_ROW: usize = 4;
/// PostgreSQL rejects statements with more bind parameters than this.
const MAX_BIND_PARAMETERS: usize = 65_535;
/// Rows per `INSERT` statement when writing a batch.
const INSERT_CHUNK_ROWS: usize = 1_000;

const _: () = assert!(INSERT_CHUNK_ROWS * BINDS_PER_ROW <= MAX_BIND_PARAMETERS);

/// Diesel implementation of the animal store port.
#[derive(Clone)]
pub struct DieselAnimalStore {
    pool: DbPool,
}

impl DieselAnimalStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Revision pair for a conditional update: `(expected, next)`.
fn revision_bounds(revision: u32) -> Result<(i32, i32), AnimalStoreError> {
    let expected = i32::try_from(revision)
        .map_err(|_| AnimalStoreError::query(format!("revision {revision} out of range")))?;
    let next = expected
        .checked_add(1)
        .ok_or_else(|| AnimalStoreError::query(format!("revision {revision} exhausted")))?;
    Ok((expected, next))
}

#[async_trait]
impl AnimalStore for DieselAnimalStore {
    async fn find_by_id(&self, id: &AnimalId) -> Result<Option<AnimalRecord>, AnimalStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = animals::table
            .filter(animals::id.eq(id.as_str()))
            .select(AnimalRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find animal"))?;
        row.map(AnimalRecord::try_from).transpose()
    }

    async fn conditional_replace(
        &self,
        record: &AnimalRecord,
    ) -> Result<ReplaceOutcome, AnimalStoreError> {
        let (expected, next) = revision_bounds(record.revision())?;
        let animal = record.animal();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            animals::table
                .filter(animals::id.eq(animal.id().as_str()))
                .filter(animals::revision.eq(expected)),
        )
        .set((
            animals::available.eq(animal.is_available()),
            animals::revision.eq(next),
            animals::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await;

        match updated {
            Ok(0) => Ok(ReplaceOutcome::lost_race()),
            Ok(_) => Ok(ReplaceOutcome::applied()),
            Err(err) if is_unacknowledged(&err) => {
                warn!(
                    animal_id = %animal.id(),
                    error = %err,
                    "connection lost during conditional replace; outcome unknown"
                );
                Ok(ReplaceOutcome::unacknowledged())
            }
            Err(err) => Err(map_diesel_error(err, "replace animal")),
        }
    }

    async fn list_available(&self) -> Result<Vec<Animal>, AnimalStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = animals::table
            .filter(animals::available.eq(true))
            .select(AnimalRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list available animals"))?;
        rows.into_iter()
            .map(|row| AnimalRecord::try_from(row).map(AnimalRecord::into_animal))
            .collect()
    }

    async fn insert_many(&self, batch: &[Animal]) -> Result<usize, AnimalStoreError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        if batch.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewAnimalRow<'_>> = batch
            .iter()
            .map(|animal| NewAnimalRow::from_animal(animal, INITIAL_REVISION))
            .collect();
        let rows = rows.as_slice();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Chunks share one transaction so a duplicate anywhere writes nothing.
        conn.transaction(|conn| {
            async move {
                let mut written = 0;
                for chunk in rows.chunks(INSERT_CHUNK_ROWS) {
                    written += diesel::insert_into(animals::table)
                        .values(chunk)
                        .execute(conn)
                        .await?;
                }
                Ok::<_, diesel::result::Error>(written)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_insert_error)
    }
}
