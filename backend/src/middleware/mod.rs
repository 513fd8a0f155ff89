//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing, authentication, and panic containment.

pub mod authenticate;
pub mod catch_panic;
pub mod trace;

pub use authenticate::{ACCESS_TOKEN_COOKIE, Authenticate, AuthenticatedUser};
pub use catch_panic::CatchPanic;
pub use trace::Trace;
