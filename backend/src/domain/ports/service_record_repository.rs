//! Port for service history reads, inserts, and status lookups.
//!
//! Every call is scoped to both the bike and its owner so one rider can never
//! read or append to another rider's history.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{BikeId, ListLimit, Record, UserId};

use super::StoreError;

/// Access to the `service_records` collection and its stored procedures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRecordRepository: Send + Sync {
    /// Service records for one bike, most recent service first.
    ///
    /// `None` applies the adapter's default page size.
    async fn list_for_bike(
        &self,
        owner: &UserId,
        bike_id: BikeId,
        limit: Option<ListLimit>,
    ) -> Result<Vec<Record>, StoreError>;

    /// Insert a fully stamped row and return the stored representation.
    async fn insert(&self, row: Record) -> Result<Record, StoreError>;

    /// Invoke the stored procedure summarising which services are due.
    async fn service_status(&self, owner: &UserId, bike_id: BikeId) -> Result<Value, StoreError>;
}
