//! Rider profile handler.
//!
//! ```text
//! GET /api/profile
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Record;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::RequestContext;
use crate::inbound::http::error::store_failure;
use crate::inbound::http::schemas::ErrorSchema;

/// The caller's profile, `null` when none has been created.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(value_type = Option<Object>)]
    pub profile: Option<Record>,
}

/// Fetch the authenticated rider's profile.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile, or null", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(ctx: RequestContext) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = ctx.authorize()?;
    let profile = ctx
        .state()
        .profiles
        .find(&user_id)
        .await
        .map_err(store_failure("find profile"))?;
    Ok(web::Json(ProfileResponse { profile }))
}
