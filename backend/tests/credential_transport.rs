//! Access tokens arrive as bearer headers or session cookies.

// Shared harness helpers are not all used by every suite.
#[allow(dead_code)]
mod support;

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test::{self, TestRequest};
use actix_web::web;
use bikecare::app::{AppDependencies, build_app};
use bikecare::inbound::http::health::HealthState;
use bikecare::inbound::http::state::HttpState;
use bikecare::middleware::ACCESS_TOKEN_COOKIE;
use bikecare::test_support::{InMemoryStore, StaticIdentityProvider};
use rstest::rstest;
use serde_json::json;

use support::{RIDER, RIDER_TOKEN, dependencies, record};

#[rstest]
#[case::bearer(TestRequest::get().insert_header((AUTHORIZATION, format!("Bearer {RIDER_TOKEN}"))))]
#[case::lowercase_scheme(TestRequest::get().insert_header((AUTHORIZATION, format!("bearer {RIDER_TOKEN}"))))]
#[case::cookie(TestRequest::get().cookie(Cookie::new(ACCESS_TOKEN_COOKIE, RIDER_TOKEN)))]
#[actix_web::test]
async fn accepted_transports_resolve_the_rider(#[case] request: TestRequest) {
    let store = Arc::new(InMemoryStore::default());
    store.seed_bike(record(json!({"name": "Tourer", "user_id": RIDER})));
    let app = test::init_service(build_app(dependencies(store, false))).await;

    let res = test::call_service(&app, request.uri("/api/bikes").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["total"], 1);
}

#[actix_web::test]
async fn unavailable_identity_service_is_treated_as_anonymous() {
    let store = Arc::new(InMemoryStore::default());
    let deps = AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(HttpState::from_store(store.clone())),
        identity: Arc::new(StaticIdentityProvider::unavailable()),
        diagnostics_enabled: false,
    };
    let app = test::init_service(build_app(deps)).await;

    let req = TestRequest::get()
        .uri("/api/profile")
        .insert_header((AUTHORIZATION, format!("Bearer {RIDER_TOKEN}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.calls(), 0);
}
