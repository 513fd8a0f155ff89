//! Development-only diagnostic endpoints.
//!
//! ```text
//! GET  /api/debug/connectivity
//! GET  /api/debug/locations?limit=
//! GET  /api/debug/profiles?limit=
//! GET  /api/debug/default-intervals/mock
//! GET  /api/debug/bikes/{bikeId}/services/echo
//! GET  /api/debug/bikes/{bikeId}/services/mock
//! POST /api/debug/mock-profile
//! ```
//!
//! Mounted only when diagnostics are enabled at startup. They are authorised
//! like every other API route and answer failures with the same redacted
//! envelopes.

use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{DefaultInterval, ListLimit, Record, fixtures};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::RequestContext;
use crate::inbound::http::error::store_failure;
use crate::inbound::http::locations::LocationListResponse;
use crate::inbound::http::schemas::{DefaultIntervalSchema, ErrorSchema};
use crate::inbound::http::services::{LimitQuery, ServiceListResponse};
use crate::inbound::http::validation::{parse_bike_id, parse_limit};

/// Mount point relative to the API scope.
pub const DIAGNOSTICS_SCOPE: &str = "/debug";

/// Store round-trip result.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityResponse {
    /// Always `ok` on success.
    #[schema(example = "ok")]
    pub status: String,
    /// Round-trip time of a minimal read.
    pub latency_ms: u64,
}

/// Recent profiles across riders.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileListResponse {
    #[schema(value_type = Vec<Object>)]
    pub profiles: Vec<Record>,
    pub total: usize,
}

/// Confirms routing and identity resolution without touching the store.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EchoResponse {
    pub message: String,
    pub user_id: String,
    pub bike_id: String,
}

/// The profile row that was stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedProfileResponse {
    #[schema(value_type = Object)]
    pub profile: Record,
}

const ECHO_MESSAGE: &str = "Service history route reached";

/// Measure a minimal store read.
#[utoipa::path(
    get,
    path = "/api/debug/connectivity",
    responses(
        (status = 200, description = "Store reachable", body = ConnectivityResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Store unreachable", body = ErrorSchema)
    ),
    tags = ["diagnostics"],
    operation_id = "debugConnectivity"
)]
#[get("/connectivity")]
pub async fn connectivity(ctx: RequestContext) -> ApiResult<web::Json<ConnectivityResponse>> {
    ctx.authorize()?;
    let latency = ctx
        .state()
        .store_health
        .ping()
        .await
        .map_err(store_failure("store ping"))?;
    Ok(web::Json(ConnectivityResponse {
        status: "ok".to_owned(),
        latency_ms: u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
    }))
}

/// Most recently updated locations across riders.
#[utoipa::path(
    get,
    path = "/api/debug/locations",
    params(LimitQuery),
    responses(
        (status = 200, description = "Recent locations", body = LocationListResponse),
        (status = 400, description = "Invalid limit", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["diagnostics"],
    operation_id = "debugRecentLocations"
)]
#[get("/locations")]
pub async fn recent_locations(
    ctx: RequestContext,
    query: web::Query<LimitQuery>,
) -> ApiResult<web::Json<LocationListResponse>> {
    ctx.authorize()?;
    let limit = parse_limit(query.limit.as_deref())?.unwrap_or_else(ListLimit::max);
    let locations = ctx
        .state()
        .locations
        .list_recent(limit)
        .await
        .map_err(store_failure("list recent locations"))?;
    Ok(web::Json(LocationListResponse {
        total: locations.len(),
        locations,
    }))
}

/// Most recently updated profiles across riders.
#[utoipa::path(
    get,
    path = "/api/debug/profiles",
    params(LimitQuery),
    responses(
        (status = 200, description = "Recent profiles", body = ProfileListResponse),
        (status = 400, description = "Invalid limit", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["diagnostics"],
    operation_id = "debugRecentProfiles"
)]
#[get("/profiles")]
pub async fn recent_profiles(
    ctx: RequestContext,
    query: web::Query<LimitQuery>,
) -> ApiResult<web::Json<ProfileListResponse>> {
    ctx.authorize()?;
    let limit = parse_limit(query.limit.as_deref())?.unwrap_or_else(ListLimit::max);
    let profiles = ctx
        .state()
        .profiles
        .list_recent(limit)
        .await
        .map_err(store_failure("list recent profiles"))?;
    Ok(web::Json(ProfileListResponse {
        total: profiles.len(),
        profiles,
    }))
}

/// Built-in interval catalogue, served without a store call.
#[utoipa::path(
    get,
    path = "/api/debug/default-intervals/mock",
    responses(
        (status = 200, description = "Fixture intervals", body = [DefaultIntervalSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["diagnostics"],
    operation_id = "debugMockDefaultIntervals"
)]
#[get("/default-intervals/mock")]
pub async fn mock_default_intervals(
    ctx: RequestContext,
) -> ApiResult<web::Json<Vec<DefaultInterval>>> {
    ctx.authorize()?;
    Ok(web::Json(fixtures::default_intervals()))
}

/// Echo the resolved identity and bike identifier.
#[utoipa::path(
    get,
    path = "/api/debug/bikes/{bikeId}/services/echo",
    params(("bikeId" = String, Path, description = "Bike UUID")),
    responses(
        (status = 200, description = "Echo", body = EchoResponse),
        (status = 400, description = "Invalid bike id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["diagnostics"],
    operation_id = "debugEchoServices"
)]
#[get("/bikes/{bikeId}/services/echo")]
pub async fn echo_services(
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<EchoResponse>> {
    let user_id = ctx.authorize()?;
    let bike_id = parse_bike_id(&path)?;
    Ok(web::Json(EchoResponse {
        message: ECHO_MESSAGE.to_owned(),
        user_id: user_id.to_string(),
        bike_id: bike_id.to_string(),
    }))
}

/// Fixture service history keyed by the caller and the requested bike.
#[utoipa::path(
    get,
    path = "/api/debug/bikes/{bikeId}/services/mock",
    params(("bikeId" = String, Path, description = "Bike UUID")),
    responses(
        (status = 200, description = "Fixture service records", body = ServiceListResponse),
        (status = 400, description = "Invalid bike id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["diagnostics"],
    operation_id = "debugMockServices"
)]
#[get("/bikes/{bikeId}/services/mock")]
pub async fn mock_services(
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ServiceListResponse>> {
    let user_id = ctx.authorize()?;
    let bike_id = parse_bike_id(&path)?;
    let services = fixtures::service_records(&user_id, bike_id);
    Ok(web::Json(ServiceListResponse {
        total: services.len(),
        services,
    }))
}

/// Insert a placeholder profile for the caller.
#[utoipa::path(
    post,
    path = "/api/debug/mock-profile",
    responses(
        (status = 201, description = "Stored profile", body = CreatedProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["diagnostics"],
    operation_id = "debugCreateMockProfile"
)]
#[post("/mock-profile")]
pub async fn create_mock_profile(ctx: RequestContext) -> ApiResult<HttpResponse> {
    let user_id = ctx.authorize()?;
    let row = fixtures::placeholder_profile(&user_id, Utc::now());
    let profile = ctx
        .state()
        .profiles
        .insert(row)
        .await
        .map_err(store_failure("insert placeholder profile"))?;
    Ok(HttpResponse::Created().json(CreatedProfileResponse { profile }))
}

/// Register every diagnostic handler under [`DIAGNOSTICS_SCOPE`].
pub fn scope() -> actix_web::Scope {
    web::scope(DIAGNOSTICS_SCOPE)
        .service(connectivity)
        .service(recent_locations)
        .service(recent_profiles)
        .service(mock_default_intervals)
        .service(echo_services)
        .service(mock_services)
        .service(create_mock_profile)
}
