//! PostgreSQL persistence for animals.
//!
//! [`DieselAnimalStore`] implements the store port over a [`DbPool`] of
//! `diesel-async` connections. Schema changes ship as embedded Diesel
//! migrations applied by [`run_pending_migrations`].

mod diesel_animal_store;
mod error_mapping;
mod migrations;
mod models;
mod pool;
pub mod schema;

pub use diesel_animal_store::DieselAnimalStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
