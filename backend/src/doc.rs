//! OpenAPI document for the HTTP API.
//!
//! Served through Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::animals_dto::{AdoptionResponse, AnimalListResponse, AnimalResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelter adoption API",
        description = "List adoptable animals, request adoption and cancel adoption."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::animals::list_available_animals,
        crate::inbound::http::animals::request_adoption,
        crate::inbound::http::animals::cancel_adoption,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AnimalResponse,
        AnimalListResponse,
        AdoptionResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "animals", description = "Availability listing and adoption lifecycle"),
        (name = "health", description = "Orchestrator probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(object)) => object.properties.keys().cloned().collect(),
            other => panic!("expected object schema for {name}, got {other:?}"),
        }
    }

    #[rstest]
    #[case("AnimalResponse", &["available", "id", "name"])]
    #[case("AdoptionResponse", &["message", "success"])]
    #[case("Error", &["code", "details", "message", "traceId"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] expected: &[&str]) {
        let mut fields = object_fields(name);
        fields.sort();
        assert_eq!(fields, expected);
    }

    #[rstest]
    #[case("/api/v1/animals")]
    #[case("/api/v1/animals/{id}/adoption")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }

    #[rstest]
    fn adoption_path_has_post_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc
            .paths
            .paths
            .get("/api/v1/animals/{id}/adoption")
            .expect("adoption path");
        assert!(item.post.is_some());
        assert!(item.delete.is_some());
    }
}
