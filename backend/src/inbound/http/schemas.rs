//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and live in the inbound
//! adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "Bad Request")]
    InvalidRequest,
    /// Authentication is missing or was rejected.
    #[schema(rename = "Unauthorized")]
    Unauthorized,
    /// No route matches the request.
    #[schema(rename = "Not Found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "Internal Server Error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Error category title.
    #[schema(example = "Unauthorized")]
    error: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Authentication required")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, present on validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::DefaultInterval`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DefaultInterval)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DefaultIntervalSchema {
    /// Service category.
    #[schema(example = "chain_lube")]
    service_type: String,
    /// Recommended distance between services in kilometres.
    #[schema(value_type = f64, example = 300)]
    default_interval_km: serde_json::Number,
    /// Free-text explanation.
    description: Option<String>,
    /// Creation timestamp.
    created_at: Option<String>,
    /// Modification timestamp.
    updated_at: Option<String>,
}
