//! Translation of pool and Diesel failures into [`AnimalStoreError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::AnimalStoreError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> AnimalStoreError {
    debug!(error = %error, "animal store pool failure");
    AnimalStoreError::connection(error.message())
}

/// Whether a write failed in a way that leaves its effect unknown.
pub(crate) fn is_unacknowledged(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
            | DieselError::BrokenTransactionManager
    )
}

pub(crate) fn map_diesel_error(error: DieselError, operation: &'static str) -> AnimalStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        other => debug!(error = %other, operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AnimalStoreError::connection("database connection closed")
        }
        DieselError::DatabaseError(_, info) => {
            AnimalStoreError::query(format!("{operation}: {}", info.message()))
        }
        other => AnimalStoreError::query(format!("{operation}: {other}")),
    }
}

/// Map an insert failure, naming the colliding id for unique violations.
pub(crate) fn map_insert_error(error: DieselError) -> AnimalStoreError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        let animal_id = info
            .details()
            .and_then(duplicate_key_from_details)
            .unwrap_or("unknown");
        return AnimalStoreError::duplicate_animal(animal_id);
    }
    map_diesel_error(error, "insert animals")
}

/// Extract the key from PostgreSQL's `Key (id)=(<value>) already exists.`
fn duplicate_key_from_details(details: &str) -> Option<&str> {
    let (_, rest) = details.split_once(")=(")?;
    let (value, _) = rest.rsplit_once(") already exists")?;
    Some(value)
}
