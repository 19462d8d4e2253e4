//! Animal listing and adoption handlers.
//!
//! ```text
//! GET    /api/v1/animals
//! POST   /api/v1/animals/{id}/adoption
//! DELETE /api/v1/animals/{id}/adoption
//! ```

use actix_web::{delete, get, post, web};
use tracing::{info, warn};

use crate::domain::ports::AdoptionRequest;
use crate::domain::{AdoptionAction, AdoptionFailure, AdoptionOutcome, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::animals_dto::{AdoptionResponse, AnimalListResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_animal_id;

/// List every animal currently available for adoption.
#[utoipa::path(
    get,
    path = "/api/v1/animals",
    responses(
        (status = 200, description = "Available animals", body = AnimalListResponse),
        (status = 503, description = "Animal store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["animals"],
    operation_id = "listAvailableAnimals"
)]
#[get("/animals")]
pub async fn list_available_animals(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<AnimalListResponse>> {
    let animals = state
        .available_animals
        .available_animals(state.request_cancellation())
        .await?;
    Ok(web::Json(AnimalListResponse::from(animals)))
}

/// Request adoption of an animal.
#[utoipa::path(
    post,
    path = "/api/v1/animals/{id}/adoption",
    params(("id" = String, Path, description = "Animal identifier")),
    responses(
        (
            status = 200,
            description = "Adoption outcome; `success` reports whether it took effect",
            body = AdoptionResponse
        ),
        (status = 400, description = "Empty animal id", body = ErrorSchema)
    ),
    tags = ["animals"],
    operation_id = "requestAdoption"
)]
#[post("/animals/{id}/adoption")]
pub async fn request_adoption(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AdoptionResponse>> {
    let request = adoption_request(&state, path.into_inner())?;
    let outcome = state.adoption.request_adoption(request).await;
    Ok(web::Json(respond(AdoptionAction::Adopt, &outcome)))
}

/// Cancel an adoption, returning the animal to the available pool.
#[utoipa::path(
    delete,
    path = "/api/v1/animals/{id}/adoption",
    params(("id" = String, Path, description = "Animal identifier")),
    responses(
        (
            status = 200,
            description = "Cancellation outcome; `success` reports whether it took effect",
            body = AdoptionResponse
        ),
        (status = 400, description = "Empty animal id", body = ErrorSchema)
    ),
    tags = ["animals"],
    operation_id = "cancelAdoption"
)]
#[delete("/animals/{id}/adoption")]
pub async fn cancel_adoption(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AdoptionResponse>> {
    let request = adoption_request(&state, path.into_inner())?;
    let outcome = state.adoption.cancel_adoption(request).await;
    Ok(web::Json(respond(AdoptionAction::Cancel, &outcome)))
}

fn adoption_request(state: &HttpState, raw_id: String) -> Result<AdoptionRequest, Error> {
    let animal_id = parse_animal_id(raw_id)?;
    Ok(AdoptionRequest::new(animal_id).with_cancellation(state.request_cancellation()))
}

fn respond(action: AdoptionAction, outcome: &AdoptionOutcome) -> AdoptionResponse {
    match outcome {
        AdoptionOutcome::Success(_) => info!(action = action.as_str(), "adoption state changed"),
        AdoptionOutcome::Failure(reason @ AdoptionFailure::UpdateConflict(_)) => {
            warn!(action = action.as_str(), %reason, "adoption write not confirmed");
        }
        AdoptionOutcome::Failure(reason) => {
            info!(action = action.as_str(), %reason, "adoption request rejected");
        }
    }
    AdoptionResponse::from(outcome)
}

#[cfg(test)]
#[path = "animals_tests.rs"]
mod tests;
