//! Request authorisation.
//!
//! [`RequestContext`] bundles the identity established by the
//! [`Authenticate`](crate::middleware::Authenticate) middleware with the
//! injected [`HttpState`]. Handlers call [`RequestContext::authorize`] before
//! touching any port.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::error;

use crate::domain::{Error, UserId};
use crate::middleware::AuthenticatedUser;

use super::ApiResult;
use super::state::HttpState;

/// Message returned with every `401 Unauthorized` envelope.
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";

/// Per-request view of the caller and the ports handlers may use.
#[derive(Clone)]
pub struct RequestContext {
    user_id: Option<UserId>,
    state: web::Data<HttpState>,
}

impl RequestContext {
    /// Build a context directly, bypassing extraction.
    pub fn new(user_id: Option<UserId>, state: web::Data<HttpState>) -> Self {
        Self { user_id, state }
    }

    /// Require an authenticated user or return `401 Unauthorized`.
    pub fn authorize(&self) -> ApiResult<UserId> {
        self.user_id
            .clone()
            .ok_or_else(|| Error::unauthorized(AUTHENTICATION_REQUIRED))
    }

    /// Ports available to the handler.
    pub fn state(&self) -> &HttpState {
        &self.state
    }
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<HttpState>>().cloned() else {
            error!("HttpState missing from application data");
            return ready(Err(Error::internal("HTTP state is not configured")));
        };
        let user_id = req
            .extensions()
            .get::<AuthenticatedUser>()
            .map(|user| user.0.clone());
        ready(Ok(Self::new(user_id, state)))
    }
}
