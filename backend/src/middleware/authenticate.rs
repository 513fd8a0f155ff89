//! Upstream authentication.
//!
//! Reads an access token from the `Authorization: Bearer` header or the
//! `sb-access-token` cookie, resolves it through the [`IdentityProvider`]
//! port, and records the result in request extensions. The middleware never
//! rejects a request; handlers decide via
//! [`RequestContext::authorize`](crate::inbound::http::auth::RequestContext::authorize).

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage, HttpRequest};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::domain::ports::IdentityProvider;
use crate::domain::{AccessToken, UserId};

/// Cookie set by the hosted identity service's browser client.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

const BEARER_SCHEME: &str = "bearer";

/// Identity established by [`Authenticate`] for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

/// Middleware resolving access tokens into [`AuthenticatedUser`] extensions.
#[derive(Clone)]
pub struct Authenticate {
    provider: Arc<dyn IdentityProvider>,
}

impl Authenticate {
    /// Resolve tokens with the supplied provider.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateMiddleware {
            service: Rc::new(service),
            provider: Arc::clone(&self.provider),
        }))
    }
}

/// Service wrapper produced by [`Authenticate`].
pub struct AuthenticateMiddleware<S> {
    service: Rc<S>,
    provider: Arc<dyn IdentityProvider>,
}

impl<S, B> Service<ServiceRequest> for AuthenticateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let provider = Arc::clone(&self.provider);
        Box::pin(async move {
            if let Some(token) = extract_access_token(req.request()) {
                match provider.resolve(&token).await {
                    Ok(Some(user)) => {
                        req.extensions_mut().insert(AuthenticatedUser(user));
                    }
                    Ok(None) => debug!("access token rejected by identity service"),
                    Err(error) => {
                        warn!(kind = error.kind(), %error, "identity lookup failed; treating request as anonymous");
                    }
                }
            }
            service.call(req).await
        })
    }
}

/// Pull an access token from the bearer header, falling back to the cookie.
pub(crate) fn extract_access_token(req: &HttpRequest) -> Option<AccessToken> {
    bearer_token(req).or_else(|| {
        req.cookie(ACCESS_TOKEN_COOKIE)
            .and_then(|cookie| AccessToken::new(cookie.value()).ok())
    })
}

fn bearer_token(req: &HttpRequest) -> Option<AccessToken> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    AccessToken::new(token.trim()).ok()
}
