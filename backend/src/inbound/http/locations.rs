//! Saved location handler.
//!
//! ```text
//! GET /api/locations
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Record;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::RequestContext;
use crate::inbound::http::error::store_failure;
use crate::inbound::http::schemas::ErrorSchema;

/// Locations saved by the caller.
#[derive(Debug, Serialize, ToSchema)]
pub struct LocationListResponse {
    /// Location rows, most recently updated first.
    #[schema(value_type = Vec<Object>)]
    pub locations: Vec<Record>,
    /// Number of rows returned.
    pub total: usize,
}

/// List the authenticated rider's saved locations.
#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "Saved locations", body = LocationListResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["locations"],
    operation_id = "listLocations"
)]
#[get("/locations")]
pub async fn list_locations(ctx: RequestContext) -> ApiResult<web::Json<LocationListResponse>> {
    let user_id = ctx.authorize()?;
    let locations = ctx
        .state()
        .locations
        .list_for_user(&user_id)
        .await
        .map_err(store_failure("list locations"))?;
    Ok(web::Json(LocationListResponse {
        total: locations.len(),
        locations,
    }))
}
