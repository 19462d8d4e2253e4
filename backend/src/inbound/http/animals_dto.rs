//! Wire types for the animal endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AdoptionOutcome, Animal};

/// One adoptable animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnimalResponse {
    #[schema(example = "5f0e6c1a-0b7e-4b1e-9d53-1f2a3b4c5d6e")]
    pub id: String,
    #[schema(example = "Biscuit")]
    pub name: String,
    pub available: bool,
}

impl From<&Animal> for AnimalResponse {
    fn from(animal: &Animal) -> Self {
        Self {
            id: animal.id().to_string(),
            name: animal.name().to_string(),
            available: animal.is_available(),
        }
    }
}

/// Body of `GET /api/v1/animals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnimalListResponse {
    pub animals: Vec<AnimalResponse>,
}

impl From<Vec<Animal>> for AnimalListResponse {
    fn from(animals: Vec<Animal>) -> Self {
        Self {
            animals: animals.iter().map(AnimalResponse::from).collect(),
        }
    }
}

/// Body of the adopt and cancel endpoints.
///
/// Failures such as an unknown id or a lost race are reported here with
/// `success: false`, not as HTTP errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdoptionResponse {
    pub success: bool,
    #[schema(example = "Adoption successful.")]
    pub message: String,
}

impl From<&AdoptionOutcome> for AdoptionResponse {
    fn from(outcome: &AdoptionOutcome) -> Self {
        Self {
            success: outcome.is_success(),
            message: outcome.message(),
        }
    }
}
