//! Port for resolving access tokens into user identities.
//!
//! The hosted identity service is an external collaborator; adapters only
//! translate a bearer token into the user id it was issued for.

use async_trait::async_trait;

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while talking to the identity service.
    pub enum IdentityError {
        /// The identity service could not be reached or timed out.
        Transport { message: String } => "identity service unreachable: {message}",
        /// The identity service answered unexpectedly.
        Unexpected { message: String } => "identity service answered unexpectedly: {message}",
    }
}

/// Resolve bearer tokens issued by the identity service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Return the user the token belongs to, or `None` for tokens the
    /// service rejects.
    async fn resolve(&self, token: &AccessToken) -> Result<Option<UserId>, IdentityError>;
}
