//! Default service interval catalogue.
//!
//! ```text
//! GET /api/default-intervals
//! ```

use actix_web::{get, web};

use crate::domain::DefaultInterval;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::RequestContext;
use crate::inbound::http::error::store_failure;
use crate::inbound::http::schemas::{DefaultIntervalSchema, ErrorSchema};

/// List recommended service intervals, shortest distance first.
#[utoipa::path(
    get,
    path = "/api/default-intervals",
    responses(
        (status = 200, description = "Intervals ordered by distance", body = [DefaultIntervalSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["intervals"],
    operation_id = "listDefaultIntervals"
)]
#[get("/default-intervals")]
pub async fn list_default_intervals(
    ctx: RequestContext,
) -> ApiResult<web::Json<Vec<DefaultInterval>>> {
    ctx.authorize()?;
    let intervals = ctx
        .state()
        .default_intervals
        .list_ordered()
        .await
        .map_err(store_failure("list default intervals"))?;
    Ok(web::Json(intervals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;
    use crate::domain::ports::StoreError;
    use crate::inbound::http::test_utils::{MockPorts, call_api, test_user};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    #[actix_web::test]
    async fn returns_a_bare_array_in_store_order() {
        let mut ports = MockPorts::default();
        ports
            .default_intervals
            .expect_list_ordered()
            .times(1)
            .return_once(|| Ok(fixtures::default_intervals()));

        let res = call_api(
            ports,
            Some(test_user()),
            test::TestRequest::get().uri("/api/default-intervals"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        let rows = body.as_array().expect("bare array");
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["service_type"], "chain_lube");
        assert_eq!(rows[0]["default_interval_km"], 300);
        for key in ["description", "created_at", "updated_at"] {
            assert!(rows[0].get(key).is_some(), "missing {key}");
        }
    }

    #[actix_web::test]
    async fn store_timeouts_become_internal_errors() {
        let mut ports = MockPorts::default();
        ports
            .default_intervals
            .expect_list_ordered()
            .times(1)
            .return_once(|| Err(StoreError::timeout("operation timed out after 10s")));

        let res = call_api(
            ports,
            Some(test_user()),
            test::TestRequest::get().uri("/api/default-intervals"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn anonymous_callers_are_rejected() {
        let mut ports = MockPorts::default();
        ports.default_intervals.expect_list_ordered().times(0);

        let res = call_api(ports, None, test::TestRequest::get().uri("/api/default-intervals")).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
