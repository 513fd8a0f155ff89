//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bikes;
pub mod default_intervals;
pub mod diagnostics;
pub mod error;
pub mod health;
pub mod locations;
pub mod profile;
pub mod routes;
pub mod schemas;
pub mod services;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
