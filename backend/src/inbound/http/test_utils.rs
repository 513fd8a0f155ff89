//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, HttpMessage, test, web};

use crate::domain::UserId;
use crate::domain::ports::{
    MockBikeRepository, MockDefaultIntervalRepository, MockLocationRepository,
    MockProfileRepository, MockServiceRecordRepository, MockStoreHealth,
};
use crate::middleware::AuthenticatedUser;

use super::routes::{configure_api, unmatched_route};
use super::state::HttpState;

pub const TEST_USER: &str = "5b2c1f9e-3d4a-4e8b-9c7d-6a1b2c3d4e5f";
pub const TEST_BIKE: &str = "9f8e7d6c-5b4a-4392-8170-6f5e4d3c2b1a";

pub fn test_user() -> UserId {
    UserId::new(TEST_USER).expect("fixture user id")
}

/// Mock ports with no expectations; any unexpected call panics.
#[derive(Default)]
pub struct MockPorts {
    pub bikes: MockBikeRepository,
    pub service_records: MockServiceRecordRepository,
    pub default_intervals: MockDefaultIntervalRepository,
    pub profiles: MockProfileRepository,
    pub locations: MockLocationRepository,
    pub store_health: MockStoreHealth,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            bikes: Arc::new(self.bikes),
            service_records: Arc::new(self.service_records),
            default_intervals: Arc::new(self.default_intervals),
            profiles: Arc::new(self.profiles),
            locations: Arc::new(self.locations),
            store_health: Arc::new(self.store_health),
        }
    }
}

pub fn mock_state() -> HttpState {
    MockPorts::default().into_state()
}

/// Call the full route table with diagnostics mounted, impersonating `user`.
pub async fn call_api(
    ports: MockPorts,
    user: Option<UserId>,
    request: test::TestRequest,
) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .wrap_fn(move |req, srv| {
                if let Some(user) = user.clone() {
                    req.extensions_mut().insert(AuthenticatedUser(user));
                }
                srv.call(req)
            })
            .configure(|cfg| configure_api(cfg, true))
            .default_service(web::to(unmatched_route)),
    )
    .await;
    test::call_service(&app, request.to_request()).await
}
