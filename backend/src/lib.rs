//! Shelter adoption service.
//!
//! Hexagonal layout:
//! - [`domain`]: the animal entity, the adoption coordinator and its ports.
//! - [`outbound`]: in-memory and PostgreSQL implementations of the store port.
//! - [`inbound`]: actix-web handlers over the driving ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod seeding;
pub mod settings;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
