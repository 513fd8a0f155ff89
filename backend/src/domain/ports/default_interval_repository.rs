//! Port for the shared catalogue of recommended service intervals.

use async_trait::async_trait;

use crate::domain::DefaultInterval;

use super::StoreError;

/// Read access to `default_service_intervals`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DefaultIntervalRepository: Send + Sync {
    /// All intervals ordered by `default_interval_km` ascending.
    async fn list_ordered(&self) -> Result<Vec<DefaultInterval>, StoreError>;
}
