//! Identity adapter resolving access tokens against the hosted auth service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use super::client::{body_preview, join_base};
use super::{StoreClientError, StoreConnection};
use crate::domain::ports::{IdentityError, IdentityProvider};
use crate::domain::{AccessToken, UserId};

const USER_PATH: &str = "auth/v1/user";

#[derive(Deserialize)]
struct AuthUserDto {
    id: String,
}

/// Resolves bearer tokens with `GET /auth/v1/user`.
#[derive(Clone)]
pub struct SupabaseIdentityProvider {
    client: Client,
    user_url: Url,
    api_key: HeaderValue,
}

impl SupabaseIdentityProvider {
    /// Build a provider sharing the store's base URL, key, and timeout.
    ///
    /// # Errors
    /// Returns [`StoreClientError`] when the URL, key, or client are unusable.
    pub fn new(connection: &StoreConnection) -> Result<Self, StoreClientError> {
        let user_url = join_base(&connection.base_url, USER_PATH)?;
        let mut api_key = HeaderValue::from_str(&connection.api_key)
            .map_err(|_| StoreClientError::InvalidApiKey)?;
        api_key.set_sensitive(true);
        let client = Client::builder()
            .timeout(connection.timeout.max(Duration::from_millis(1)))
            .build()?;
        Ok(Self {
            client,
            user_url,
            api_key,
        })
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn resolve(&self, token: &AccessToken) -> Result<Option<UserId>, IdentityError> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
            .map_err(|_| IdentityError::unexpected("access token is not a valid header value"))?;
        bearer.set_sensitive(true);

        let response = self
            .client
            .get(self.user_url.clone())
            .header("apikey", self.api_key.clone())
            .header(AUTHORIZATION, bearer)
            .send()
            .await
            .map_err(|error| IdentityError::transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| IdentityError::transport(error.to_string()))?;
        interpret_user_response(status, &body)
    }
}

fn interpret_user_response(status: StatusCode, body: &[u8]) -> Result<Option<UserId>, IdentityError> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            debug!(status = status.as_u16(), "access token rejected");
            Ok(None)
        }
        _ if status.is_success() => {
            let user: AuthUserDto = serde_json::from_slice(body).map_err(|error| {
                IdentityError::unexpected(format!("invalid user payload: {error}"))
            })?;
            UserId::new(user.id)
                .map(Some)
                .map_err(|error| IdentityError::unexpected(error.to_string()))
        }
        _ => Err(IdentityError::unexpected(format!(
            "status {}: {}",
            status.as_u16(),
            body_preview(body)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED)]
    #[case(StatusCode::FORBIDDEN)]
    fn rejected_tokens_resolve_to_none(#[case] status: StatusCode) {
        let resolved = interpret_user_response(status, b"{\"msg\":\"invalid JWT\"}");
        assert_eq!(resolved, Ok(None));
    }

    #[rstest]
    fn accepted_tokens_resolve_to_user() {
        let resolved = interpret_user_response(
            StatusCode::OK,
            br#"{"id":"8d0fbe0e-2f4c-4c39-9f4e-6d3c7a1b2e90","email":"rider@example.com"}"#,
        )
        .expect("resolves");
        assert_eq!(
            resolved.map(String::from).as_deref(),
            Some("8d0fbe0e-2f4c-4c39-9f4e-6d3c7a1b2e90")
        );
    }

    #[rstest]
    #[case(StatusCode::OK, b"{\"email\":\"x\"}".as_slice())]
    #[case(StatusCode::OK, b"{\"id\":\"\"}".as_slice())]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, b"oops".as_slice())]
    fn unexpected_answers_are_errors(#[case] status: StatusCode, #[case] body: &[u8]) {
        assert!(matches!(
            interpret_user_response(status, body),
            Err(IdentityError::Unexpected { .. })
        ));
    }
}
