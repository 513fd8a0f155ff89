//! Shared harness for HTTP integration tests.
//!
//! Builds the production application over the in-memory store and a static
//! identity provider so tests exercise the real route table and middleware.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::test::TestRequest;
use actix_web::web;
use bikecare::app::AppDependencies;
use bikecare::domain::{Record, UserId};
use bikecare::inbound::http::health::HealthState;
use bikecare::inbound::http::state::HttpState;
use bikecare::test_support::{InMemoryStore, StaticIdentityProvider};
use serde_json::Value;

pub const RIDER_TOKEN: &str = "rider-access-token";
pub const RIDER: &str = "2f4e6a8c-1b3d-4f5a-8c7e-9d0b1a2c3e4f";
pub const OTHER_RIDER: &str = "7a6b5c4d-3e2f-4a1b-9c8d-7e6f5a4b3c2d";
pub const BIKE: &str = "c0ffee00-1234-4abc-8def-0123456789ab";

pub fn rider() -> UserId {
    UserId::new(RIDER).expect("fixture rider id")
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture rows must be objects, got {other}"),
    }
}

/// Application dependencies over `store`, accepting [`RIDER_TOKEN`].
pub fn dependencies(store: Arc<InMemoryStore>, diagnostics_enabled: bool) -> AppDependencies {
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(HttpState::from_store(store)),
        identity: Arc::new(StaticIdentityProvider::default().with_token(RIDER_TOKEN, rider())),
        diagnostics_enabled,
    }
}

/// Present the rider's access token as a bearer credential.
pub fn as_rider(request: TestRequest) -> TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {RIDER_TOKEN}")))
}
