//! HTTP inbound adapter.

pub mod animals;
pub mod animals_dto;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub(crate) mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// The versioned API surface, mounted at `/api/v1`.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(animals::list_available_animals)
        .service(animals::request_adoption)
        .service(animals::cancel_adoption)
}
