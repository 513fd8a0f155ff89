//! Authenticated identity primitives.
//!
//! The hosted identity service owns user accounts; this crate only carries the
//! identifiers it hands back. Both types are opaque strings with a minimal
//! shape check so blank or padded values never reach a store query.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserId::new`] and [`AccessToken::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityValidationError {
    /// The value was empty.
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },
    /// The value carried leading or trailing whitespace.
    #[error("{kind} must not contain surrounding whitespace")]
    Padded { kind: &'static str },
}

fn validate(raw: &str, kind: &'static str) -> Result<(), IdentityValidationError> {
    if raw.is_empty() {
        return Err(IdentityValidationError::Empty { kind });
    }
    if raw.trim() != raw {
        return Err(IdentityValidationError::Padded { kind });
    }
    Ok(())
}

/// Opaque identifier of the authenticated user.
///
/// # Examples
/// ```
/// use bikecare::domain::UserId;
///
/// let id = UserId::new("8d0fbe0e-2f4c-4c39-9f4e-6d3c7a1b2e90").expect("valid id");
/// assert_eq!(id.as_ref(), "8d0fbe0e-2f4c-4c39-9f4e-6d3c7a1b2e90");
/// assert!(UserId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Errors
    /// Rejects empty or whitespace-padded identifiers.
    pub fn new(id: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let id = id.into();
        validate(&id, "user id")?;
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Bearer credential presented by a client.
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validate and wrap a raw token.
    ///
    /// # Errors
    /// Rejects empty or whitespace-padded tokens.
    pub fn new(token: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let token = token.into();
        validate(&token, "access token")?;
        Ok(Self(token))
    }

    /// Borrow the raw token for forwarding to the identity service.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
