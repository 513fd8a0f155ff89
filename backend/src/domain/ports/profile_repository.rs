//! Port for rider profiles.

use async_trait::async_trait;

use crate::domain::{ListLimit, Record, UserId};

use super::StoreError;

/// Access to the `profiles` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// The profile keyed by `user_id`, if one exists.
    async fn find(&self, user_id: &UserId) -> Result<Option<Record>, StoreError>;

    /// Most recently updated profiles across all riders.
    async fn list_recent(&self, limit: ListLimit) -> Result<Vec<Record>, StoreError>;

    /// Insert a profile row and return the stored representation.
    async fn insert(&self, row: Record) -> Result<Record, StoreError>;
}
