//! Path parameter validation.

use serde_json::json;

use crate::domain::{AnimalId, AnimalValidationError, Error};

fn violation_code(error: &AnimalValidationError) -> &'static str {
    match error {
        AnimalValidationError::EmptyId => "empty_id",
        AnimalValidationError::EmptyName => "empty_name",
        AnimalValidationError::NameTooLong { .. } => "name_too_long",
    }
}

/// Parse the `{id}` path segment into an [`AnimalId`].
///
/// Only an empty segment is rejected; every other value is passed on and
/// resolves to an outcome, typically not-found.
pub(crate) fn parse_animal_id(raw: String) -> Result<AnimalId, Error> {
    AnimalId::new(raw.as_str()).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "id",
            "value": raw,
            "code": violation_code(&err),
        }))
    })
}
