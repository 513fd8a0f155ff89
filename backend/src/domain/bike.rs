//! Bike identifier.

use std::fmt;

use uuid::Uuid;

/// Identifier of a bike row, always a canonical UUID.
///
/// Path parameters are parsed into this type before any store call so
/// malformed identifiers never reach the database.
///
/// # Examples
/// ```
/// use bikecare::domain::BikeId;
///
/// let id = BikeId::parse("3FA85F64-5717-4562-B3FC-2C963F66AFA6").expect("valid UUID");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(BikeId::parse("bike-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BikeId(Uuid);

/// Returned when a bike identifier is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bike id must be a valid UUID")]
pub struct InvalidBikeId;

impl BikeId {
    /// Parse a textual UUID.
    ///
    /// # Errors
    /// Returns [`InvalidBikeId`] when `raw` is not a UUID.
    pub fn parse(raw: &str) -> Result<Self, InvalidBikeId> {
        Uuid::parse_str(raw).map(Self).map_err(|_| InvalidBikeId)
    }
}

impl fmt::Display for BikeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hyphenated lowercase is the form the store filters on.
        write!(f, "{}", self.0.hyphenated())
    }
}
