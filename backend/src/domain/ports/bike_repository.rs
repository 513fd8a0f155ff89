//! Port for reading a rider's bikes.

use async_trait::async_trait;

use crate::domain::{Record, UserId};

use super::StoreError;

/// Read access to the `bikes` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BikeRepository: Send + Sync {
    /// Bikes owned by `owner`, newest first.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Record>, StoreError>;
}
