//! Service history handlers for a single bike.
//!
//! ```text
//! GET  /api/bikes/{bikeId}/services?limit=
//! POST /api/bikes/{bikeId}/services
//! GET  /api/bikes/{bikeId}/service-status
//! ```
//!
//! Every handler authorises first, then validates the bike identifier, and
//! only then calls the store.

use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Record;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::RequestContext;
use crate::inbound::http::error::store_failure;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::validation::{
    MAX_BODY_BYTES, parse_bike_id, parse_limit, parse_new_service_record, read_body,
};

/// Optional page size for list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    /// Between 1 and 100; defaults to 100.
    #[param(value_type = Option<u32>, minimum = 1, maximum = 100)]
    pub limit: Option<String>,
}

/// Service records for one bike.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceListResponse {
    /// Service rows, most recent service first.
    #[schema(value_type = Vec<Object>)]
    pub services: Vec<Record>,
    /// Number of rows returned.
    pub total: usize,
}

/// A newly stored service record.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedServiceResponse {
    /// Stored row as echoed by the store.
    #[schema(value_type = Object)]
    pub service: Record,
}

/// Maintenance status computed by the store.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatusResponse {
    /// Bike the status belongs to.
    pub bike_id: String,
    /// Procedure result, passed through unchanged.
    #[schema(value_type = Object)]
    pub status: Value,
}

/// List the service history of one of the caller's bikes.
#[utoipa::path(
    get,
    path = "/api/bikes/{bikeId}/services",
    params(
        ("bikeId" = String, Path, description = "Bike UUID"),
        LimitQuery
    ),
    responses(
        (status = 200, description = "Service records", body = ServiceListResponse),
        (status = 400, description = "Invalid bike id or limit", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "listServices"
)]
#[get("/bikes/{bikeId}/services")]
pub async fn list_services(
    ctx: RequestContext,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> ApiResult<web::Json<ServiceListResponse>> {
    let user_id = ctx.authorize()?;
    let bike_id = parse_bike_id(&path)?;
    let limit = parse_limit(query.limit.as_deref())?;
    let services = ctx
        .state()
        .service_records
        .list_for_bike(&user_id, bike_id, limit)
        .await
        .map_err(store_failure("list service records"))?;
    Ok(web::Json(ServiceListResponse {
        total: services.len(),
        services,
    }))
}

/// Record a service performed on one of the caller's bikes.
///
/// Ownership columns and timestamps are assigned by the server; any values
/// the client sends for them are discarded. The body is only read once the
/// caller is authorised, and never beyond [`MAX_BODY_BYTES`].
#[utoipa::path(
    post,
    path = "/api/bikes/{bikeId}/services",
    params(("bikeId" = String, Path, description = "Bike UUID")),
    request_body(content = Object, description = "Service record columns; `service_type` is required"),
    responses(
        (status = 201, description = "Stored service record", body = CreatedServiceResponse),
        (status = 400, description = "Invalid bike id, or body malformed or too large", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "createService"
)]
#[post("/bikes/{bikeId}/services")]
pub async fn create_service(
    ctx: RequestContext,
    path: web::Path<String>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let user_id = ctx.authorize()?;
    let bike_id = parse_bike_id(&path)?;
    let body = read_body(payload, MAX_BODY_BYTES).await?;
    let record = parse_new_service_record(&body)?;
    let row = record.into_row(&user_id, bike_id, Utc::now());
    let service = ctx
        .state()
        .service_records
        .insert(row)
        .await
        .map_err(store_failure("insert service record"))?;
    Ok(HttpResponse::Created().json(CreatedServiceResponse { service }))
}

/// Compute the maintenance status of one of the caller's bikes.
#[utoipa::path(
    get,
    path = "/api/bikes/{bikeId}/service-status",
    params(("bikeId" = String, Path, description = "Bike UUID")),
    responses(
        (status = 200, description = "Service status", body = ServiceStatusResponse),
        (status = 400, description = "Invalid bike id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["services"],
    operation_id = "getServiceStatus"
)]
#[get("/bikes/{bikeId}/service-status")]
pub async fn service_status(
    ctx: RequestContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ServiceStatusResponse>> {
    let user_id = ctx.authorize()?;
    let bike_id = parse_bike_id(&path)?;
    let status = ctx
        .state()
        .service_records
        .service_status(&user_id, bike_id)
        .await
        .map_err(store_failure("compute service status"))?;
    Ok(web::Json(ServiceStatusResponse {
        bike_id: bike_id.to_string(),
        status,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::StoreError;
    use crate::domain::{BikeId, ListLimit};
    use crate::inbound::http::test_utils::{MockPorts, TEST_BIKE, TEST_USER, call_api, test_user};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::json;

    fn bike_id() -> BikeId {
        BikeId::parse(TEST_BIKE).expect("fixture bike id")
    }

    #[actix_web::test]
    async fn lists_services_with_requested_limit() {
        let mut ports = MockPorts::default();
        ports
            .service_records
            .expect_list_for_bike()
            .withf(|owner, bike, limit| {
                owner.as_ref() == TEST_USER
                    && *bike == bike_id()
                    && limit.map(ListLimit::get) == Some(5)
            })
            .times(1)
            .return_once(|_, _, _| Ok(Vec::new()));

        let res = call_api(
            ports,
            Some(test_user()),
            test::TestRequest::get().uri(&format!("/api/bikes/{TEST_BIKE}/services?limit=5")),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"services": [], "total": 0}));
    }

    #[rstest]
    #[case("/api/bikes/not-a-uuid/services")]
    #[case("/api/bikes/not-a-uuid/service-status")]
    #[actix_web::test]
    async fn malformed_bike_ids_are_rejected_before_the_store(#[case] uri: &str) {
        let mut ports = MockPorts::default();
        ports.service_records.expect_list_for_bike().times(0);
        ports.service_records.expect_service_status().times(0);

        let res = call_api(ports, Some(test_user()), test::TestRequest::get().uri(uri)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["details"]["field"], "bikeId");
    }

    #[rstest]
    #[case("0")]
    #[case("101")]
    #[case("many")]
    #[actix_web::test]
    async fn out_of_range_limits_are_rejected(#[case] limit: &str) {
        let mut ports = MockPorts::default();
        ports.service_records.expect_list_for_bike().times(0);

        let res = call_api(
            ports,
            Some(test_user()),
            test::TestRequest::get().uri(&format!("/api/bikes/{TEST_BIKE}/services?limit={limit}")),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unauthorised_checks_run_before_validation() {
        let mut ports = MockPorts::default();
        ports.service_records.expect_list_for_bike().times(0);

        let res = call_api(
            ports,
            None,
            test::TestRequest::get().uri("/api/bikes/not-a-uuid/services"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_stamps_ownership_and_returns_created() {
        let mut ports = MockPorts::default();
        ports
            .service_records
            .expect_insert()
            .withf(|row| {
                row.get("user_id") == Some(&json!(TEST_USER))
                    && row.get("bike_id") == Some(&json!(TEST_BIKE))
                    && row.get("service_type") == Some(&json!("chain_lube"))
                    && row.contains_key("created_at")
                    && row.contains_key("updated_at")
            })
            .times(1)
            .return_once(|mut row| {
                row.insert("id".to_owned(), json!(1));
                Ok(row)
            });

        let res = call_api(
            ports,
            Some(test_user()),
            test::TestRequest::post()
                .uri(&format!("/api/bikes/{TEST_BIKE}/services"))
                .set_json(json!({"service_type": "chain_lube", "user_id": "someone-else"})),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["service"]["id"], 1);
        assert_eq!(body["service"]["user_id"], TEST_USER);
    }

    #[rstest]
    #[case(json!({"notes": "no type"}))]
    #[case(json!(["chain_lube"]))]
    #[actix_web::test]
    async fn create_rejects_invalid_bodies(#[case] payload: Value) {
        let mut ports = MockPorts::default();
        ports.service_records.expect_insert().times(0);

        let res = call_api(
            ports,
            Some(test_user()),
            test::TestRequest::post()
                .uri(&format!("/api/bikes/{TEST_BIKE}/services"))
                .set_json(payload),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[case::anonymous(None, StatusCode::UNAUTHORIZED)]
    #[case::authorised(Some(test_user()), StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn oversized_bodies_get_json_envelopes(
        #[case] user: Option<crate::domain::UserId>,
        #[case] expected: StatusCode,
    ) {
        let mut ports = MockPorts::default();
        ports.service_records.expect_insert().times(0);

        let res = call_api(
            ports,
            user,
            test::TestRequest::post()
                .uri(&format!("/api/bikes/{TEST_BIKE}/services"))
                .insert_header(("content-type", "application/json"))
                .set_payload(vec![b' '; MAX_BODY_BYTES + 1]),
        )
        .await;
        assert_eq!(res.status(), expected);
        let body: Value = test::read_body_json(res).await;
        if expected == StatusCode::BAD_REQUEST {
            assert_eq!(body["details"]["code"], "body_too_large");
        } else {
            assert_eq!(body["message"], "Authentication required");
        }
    }

    #[actix_web::test]
    async fn create_failure_is_redacted() {
        let mut ports = MockPorts::default();
        ports
            .service_records
            .expect_insert()
            .times(1)
            .return_once(|_| Err(StoreError::rejected(409_u16, "duplicate key value violates unique constraint")));

        let res = call_api(
            ports,
            Some(test_user()),
            test::TestRequest::post()
                .uri(&format!("/api/bikes/{TEST_BIKE}/services"))
                .set_json(json!({"service_type": "chain_lube"})),
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[actix_web::test]
    async fn service_status_passes_the_procedure_result_through() {
        let mut ports = MockPorts::default();
        ports
            .service_records
            .expect_service_status()
            .times(1)
            .return_once(|_, _| Ok(json!([{"service_type": "chain_lube", "due": true}])));

        let res = call_api(
            ports,
            Some(test_user()),
            test::TestRequest::get().uri(&format!("/api/bikes/{TEST_BIKE}/service-status")),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["bikeId"], TEST_BIKE);
        assert_eq!(body["status"][0]["due"], true);
    }
}
