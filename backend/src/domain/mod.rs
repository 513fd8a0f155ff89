//! Domain primitives, record payloads, and ports.
//!
//! Purpose: keep request validation and the error taxonomy independent of
//! the HTTP framework and of the hosted store, so both edges can be swapped
//! or stubbed in tests.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: the client-facing error envelope.
//! - [`UserId`] / [`AccessToken`]: identity primitives.
//! - [`BikeId`]: UUID-validated bike key.
//! - [`Record`], [`DefaultInterval`], [`NewServiceRecord`], [`ListLimit`]:
//!   store payloads and read parameters.
//! - [`ports`]: traits implemented by outbound adapters.

pub mod bike;
pub mod error;
pub mod fixtures;
pub mod ports;
pub mod records;
pub mod trace_id;
pub mod user;

pub use self::bike::{BikeId, InvalidBikeId};
pub use self::error::{Error, ErrorCode};
pub use self::records::{
    DefaultInterval, InvalidListLimit, ListLimit, MAX_LIST_LIMIT, NewServiceRecord, Record,
    ServiceRecordValidationError,
};
pub use self::trace_id::TraceId;
pub use self::user::{AccessToken, IdentityValidationError, UserId};

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
