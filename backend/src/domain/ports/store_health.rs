//! Port for probing store connectivity.

use std::time::Duration;

use async_trait::async_trait;

use super::StoreError;

/// Cheap round trip used by the connectivity diagnostic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Perform a minimal read and report how long it took.
    async fn ping(&self) -> Result<Duration, StoreError>;
}
