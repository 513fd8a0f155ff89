//! Bike maintenance API backend library.
//!
//! The crate follows a hexagonal layout: [`domain`] owns types and ports,
//! [`inbound`] adapts HTTP requests onto those ports, and [`outbound`]
//! implements them against the hosted store.

pub mod app;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
