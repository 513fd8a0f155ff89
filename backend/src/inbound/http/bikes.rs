//! Bike listing handler.
//!
//! ```text
//! GET /api/bikes
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Record;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::RequestContext;
use crate::inbound::http::error::store_failure;
use crate::inbound::http::schemas::ErrorSchema;

/// Bikes owned by the caller.
#[derive(Debug, Serialize, ToSchema)]
pub struct BikeListResponse {
    /// Bike rows, newest first.
    #[schema(value_type = Vec<Object>)]
    pub bikes: Vec<Record>,
    /// Number of rows returned.
    pub total: usize,
}

/// List the authenticated rider's bikes.
#[utoipa::path(
    get,
    path = "/api/bikes",
    responses(
        (status = 200, description = "Bikes owned by the caller", body = BikeListResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["bikes"],
    operation_id = "listBikes"
)]
#[get("/bikes")]
pub async fn list_bikes(ctx: RequestContext) -> ApiResult<web::Json<BikeListResponse>> {
    let user_id = ctx.authorize()?;
    let bikes = ctx
        .state()
        .bikes
        .list_for_owner(&user_id)
        .await
        .map_err(store_failure("list bikes"))?;
    Ok(web::Json(BikeListResponse {
        total: bikes.len(),
        bikes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::StoreError;
    use crate::inbound::http::test_utils::{MockPorts, TEST_USER, call_api, test_user};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    fn bike(name: &str) -> Record {
        match json!({"name": name, "user_id": TEST_USER}) {
            Value::Object(map) => map,
            _ => unreachable!("literal is an object"),
        }
    }

    #[actix_web::test]
    async fn lists_bikes_with_total() {
        let mut ports = MockPorts::default();
        ports
            .bikes
            .expect_list_for_owner()
            .withf(|owner| owner.as_ref() == TEST_USER)
            .times(1)
            .return_once(|_| Ok(vec![bike("Commuter"), bike("Gravel")]));

        let res = call_api(ports, Some(test_user()), test::TestRequest::get().uri("/api/bikes")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["bikes"][0]["name"], "Commuter");
    }

    #[actix_web::test]
    async fn empty_result_reports_zero_total() {
        let mut ports = MockPorts::default();
        ports
            .bikes
            .expect_list_for_owner()
            .times(1)
            .return_once(|_| Ok(Vec::new()));

        let res = call_api(ports, Some(test_user()), test::TestRequest::get().uri("/api/bikes")).await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"bikes": [], "total": 0}));
    }

    #[actix_web::test]
    async fn anonymous_callers_never_reach_the_store() {
        let mut ports = MockPorts::default();
        ports.bikes.expect_list_for_owner().times(0);

        let res = call_api(ports, None, test::TestRequest::get().uri("/api/bikes")).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({"error": "Unauthorized", "message": "Authentication required"})
        );
    }

    #[actix_web::test]
    async fn store_failures_are_redacted() {
        let mut ports = MockPorts::default();
        ports
            .bikes
            .expect_list_for_owner()
            .times(1)
            .return_once(|_| Err(StoreError::rejected(400_u16, "column bikes.secret does not exist")));

        let res = call_api(ports, Some(test_user()), test::TestRequest::get().uri("/api/bikes")).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "Internal server error");
        assert!(!body.to_string().contains("secret"));
    }
}
