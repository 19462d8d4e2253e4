//! OpenAPI schemas for domain types.
//!
//! The domain stays free of `utoipa`; these mirrors describe the wire shape of
//! [`crate::domain::Error`] and [`crate::domain::ErrorCode`] for the generated
//! document.

use utoipa::ToSchema;

/// Machine-readable error category.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error payload returned with every non-2xx response.
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "schema-only mirror of the domain Error")]
pub struct ErrorSchema {
    code: ErrorCodeSchema,
    #[schema(example = "animal id must not contain whitespace padding or control characters")]
    message: String,
    /// Correlates the response with server logs.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Structured context, such as the offending field.
    details: Option<serde_json::Value>,
}
