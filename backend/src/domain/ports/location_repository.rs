//! Port for saved rider locations.

use async_trait::async_trait;

use crate::domain::{ListLimit, Record, UserId};

use super::StoreError;

/// Read access to `user_locations`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Locations saved by `owner`, most recently updated first.
    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Record>, StoreError>;

    /// Most recently updated locations across all riders.
    async fn list_recent(&self, limit: ListLimit) -> Result<Vec<Record>, StoreError>;
}
