//! Store ports implemented over [`PostgrestClient`].
//!
//! Table, column, and procedure names for the bike maintenance schema live
//! here and nowhere else.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Direction, PostgrestClient, SelectQuery};
use crate::domain::ports::{
    BikeRepository, DefaultIntervalRepository, LocationRepository, ProfileRepository,
    ServiceRecordRepository, StoreError, StoreHealth,
};
use crate::domain::{BikeId, DefaultInterval, ListLimit, Record, UserId};

const BIKES: &str = "bikes";
const SERVICE_RECORDS: &str = "service_records";
const DEFAULT_INTERVALS: &str = "default_service_intervals";
const PROFILES: &str = "profiles";
const USER_LOCATIONS: &str = "user_locations";
const SERVICE_STATUS_FN: &str = "get_bike_service_status";

/// Hosted-store adapter backing every data port.
#[derive(Clone)]
pub struct PostgrestStore {
    client: PostgrestClient,
}

impl PostgrestStore {
    /// Wrap a configured client.
    #[must_use]
    pub const fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BikeRepository for PostgrestStore {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Record>, StoreError> {
        let query = SelectQuery::from_table(BIKES)
            .eq("user_id", owner)
            .order_by("created_at", Direction::Descending);
        self.client.select(&query).await
    }
}

#[async_trait]
impl ServiceRecordRepository for PostgrestStore {
    async fn list_for_bike(
        &self,
        owner: &UserId,
        bike_id: BikeId,
        limit: Option<ListLimit>,
    ) -> Result<Vec<Record>, StoreError> {
        let limit = limit.unwrap_or_else(ListLimit::max);
        let query = SelectQuery::from_table(SERVICE_RECORDS)
            .eq("bike_id", bike_id)
            .eq("user_id", owner)
            .order_by("service_date", Direction::Descending)
            .limit(limit.get());
        self.client.select(&query).await
    }

    async fn insert(&self, row: Record) -> Result<Record, StoreError> {
        self.client.insert(SERVICE_RECORDS, &row).await
    }

    async fn service_status(&self, owner: &UserId, bike_id: BikeId) -> Result<Value, StoreError> {
        let params = json!({
            "p_bike_id": bike_id.to_string(),
            "p_user_id": owner.as_ref(),
        });
        self.client.rpc(SERVICE_STATUS_FN, &params).await
    }
}

#[async_trait]
impl DefaultIntervalRepository for PostgrestStore {
    async fn list_ordered(&self) -> Result<Vec<DefaultInterval>, StoreError> {
        let query = SelectQuery::from_table(DEFAULT_INTERVALS)
            .columns("service_type,default_interval_km,description,created_at,updated_at")
            .order_by("default_interval_km", Direction::Ascending);
        self.client
            .select(&query)
            .await?
            .into_iter()
            .map(|row| {
                serde_json::from_value(Value::Object(row)).map_err(|error| {
                    StoreError::decode(format!("invalid default interval row: {error}"))
                })
            })
            .collect()
    }
}

#[async_trait]
impl ProfileRepository for PostgrestStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<Record>, StoreError> {
        let query = SelectQuery::from_table(PROFILES).eq("id", user_id).limit(1);
        Ok(self.client.select(&query).await?.into_iter().next())
    }

    async fn list_recent(&self, limit: ListLimit) -> Result<Vec<Record>, StoreError> {
        let query = SelectQuery::from_table(PROFILES)
            .order_by("updated_at", Direction::Descending)
            .limit(limit.get());
        self.client.select(&query).await
    }

    async fn insert(&self, row: Record) -> Result<Record, StoreError> {
        self.client.insert(PROFILES, &row).await
    }
}

#[async_trait]
impl LocationRepository for PostgrestStore {
    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Record>, StoreError> {
        let query = SelectQuery::from_table(USER_LOCATIONS)
            .eq("user_id", owner)
            .order_by("updated_at", Direction::Descending)
            .limit(ListLimit::max().get());
        self.client.select(&query).await
    }

    async fn list_recent(&self, limit: ListLimit) -> Result<Vec<Record>, StoreError> {
        let query = SelectQuery::from_table(USER_LOCATIONS)
            .order_by("updated_at", Direction::Descending)
            .limit(limit.get());
        self.client.select(&query).await
    }
}

#[async_trait]
impl StoreHealth for PostgrestStore {
    async fn ping(&self) -> Result<Duration, StoreError> {
        let started = Instant::now();
        let query = SelectQuery::from_table(DEFAULT_INTERVALS)
            .columns("service_type")
            .limit(1);
        self.client.select(&query).await?;
        Ok(started.elapsed())
    }
}
