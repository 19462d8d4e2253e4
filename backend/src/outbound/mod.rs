//! Outbound adapters implementing the [`AnimalStore`](crate::domain::ports::AnimalStore) port.
//!
//! - **memory**: process-local store used when no database is configured.
//! - **persistence**: PostgreSQL store using Diesel async over a bb8 pool.
//!
//! Adapters translate between domain types and storage representations and
//! contain no adoption logic.

pub mod memory;
pub mod persistence;
