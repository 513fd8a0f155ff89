//! In-process test doubles for the store and identity ports.
//!
//! Compiled for unit tests and behind the `test-support` feature so
//! integration tests in `tests/` can drive the full route table without a
//! hosted project.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::ports::{
    BikeRepository, DefaultIntervalRepository, IdentityError, IdentityProvider,
    LocationRepository, ProfileRepository, ServiceRecordRepository, StoreError, StoreHealth,
};
use crate::domain::{AccessToken, BikeId, DefaultInterval, ListLimit, Record, UserId};

#[derive(Default)]
struct Tables {
    bikes: Vec<Record>,
    service_records: Vec<Record>,
    default_intervals: Vec<DefaultInterval>,
    profiles: Vec<Record>,
    locations: Vec<Record>,
}

/// Store double implementing every data port over in-memory tables.
///
/// Every port call is counted, including calls that fail, so tests can
/// assert that validation and authorisation happen before the store.
///
/// # Examples
/// ```
/// use bikecare::domain::ports::StoreError;
/// use bikecare::test_support::InMemoryStore;
///
/// let store = InMemoryStore::default();
/// store.fail_with(StoreError::timeout("simulated"));
/// assert_eq!(store.calls(), 0);
/// ```
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    failure: Mutex<Option<StoreError>>,
    calls: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn text_field<'a>(row: &'a Record, column: &str) -> Option<&'a str> {
    row.get(column).and_then(Value::as_str)
}

impl InMemoryStore {
    /// Number of port calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: StoreError) {
        *lock(&self.failure) = Some(error);
    }

    /// Stop failing.
    pub fn recover(&self) {
        *lock(&self.failure) = None;
    }

    pub fn seed_bike(&self, row: Record) {
        lock(&self.tables).bikes.push(row);
    }

    pub fn seed_service_record(&self, row: Record) {
        lock(&self.tables).service_records.push(row);
    }

    pub fn seed_default_interval(&self, interval: DefaultInterval) {
        lock(&self.tables).default_intervals.push(interval);
    }

    pub fn seed_profile(&self, row: Record) {
        lock(&self.tables).profiles.push(row);
    }

    pub fn seed_location(&self, row: Record) {
        lock(&self.tables).locations.push(row);
    }

    fn begin(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = lock(&self.failure).clone() {
            return Err(error);
        }
        Ok(lock(&self.tables))
    }
}

fn owned_by<'a>(rows: &'a [Record], owner: &'a UserId) -> impl Iterator<Item = &'a Record> {
    rows.iter()
        .filter(move |row| text_field(row, "user_id") == Some(owner.as_ref()))
}

fn take(rows: impl Iterator<Item = Record>, limit: ListLimit) -> Vec<Record> {
    rows.take(limit.get() as usize).collect()
}

#[async_trait]
impl BikeRepository for InMemoryStore {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Record>, StoreError> {
        let tables = self.begin()?;
        Ok(owned_by(&tables.bikes, owner).cloned().collect())
    }
}

#[async_trait]
impl ServiceRecordRepository for InMemoryStore {
    async fn list_for_bike(
        &self,
        owner: &UserId,
        bike_id: BikeId,
        limit: Option<ListLimit>,
    ) -> Result<Vec<Record>, StoreError> {
        let tables = self.begin()?;
        let bike = bike_id.to_string();
        let rows = owned_by(&tables.service_records, owner)
            .filter(|row| text_field(row, "bike_id") == Some(bike.as_str()))
            .cloned();
        Ok(take(rows, limit.unwrap_or_else(ListLimit::max)))
    }

    async fn insert(&self, row: Record) -> Result<Record, StoreError> {
        let mut tables = self.begin()?;
        let mut stored = row;
        let next_id = tables.service_records.len() + 1;
        stored.entry("id").or_insert_with(|| json!(next_id));
        tables.service_records.push(stored.clone());
        Ok(stored)
    }

    async fn service_status(&self, owner: &UserId, bike_id: BikeId) -> Result<Value, StoreError> {
        let tables = self.begin()?;
        let bike = bike_id.to_string();
        let count = owned_by(&tables.service_records, owner)
            .filter(|row| text_field(row, "bike_id") == Some(bike.as_str()))
            .count();
        Ok(json!({ "bike_id": bike, "service_count": count }))
    }
}

#[async_trait]
impl DefaultIntervalRepository for InMemoryStore {
    async fn list_ordered(&self) -> Result<Vec<DefaultInterval>, StoreError> {
        let tables = self.begin()?;
        let mut intervals = tables.default_intervals.clone();
        intervals.sort_by(|a, b| {
            let a = a.default_interval_km.as_f64().unwrap_or(f64::MAX);
            let b = b.default_interval_km.as_f64().unwrap_or(f64::MAX);
            a.total_cmp(&b)
        });
        Ok(intervals)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<Record>, StoreError> {
        let tables = self.begin()?;
        Ok(tables
            .profiles
            .iter()
            .find(|row| text_field(row, "id") == Some(user_id.as_ref()))
            .cloned())
    }

    async fn list_recent(&self, limit: ListLimit) -> Result<Vec<Record>, StoreError> {
        let tables = self.begin()?;
        Ok(take(tables.profiles.iter().rev().cloned(), limit))
    }

    async fn insert(&self, row: Record) -> Result<Record, StoreError> {
        let mut tables = self.begin()?;
        tables.profiles.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl LocationRepository for InMemoryStore {
    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Record>, StoreError> {
        let tables = self.begin()?;
        Ok(owned_by(&tables.locations, owner).cloned().collect())
    }

    async fn list_recent(&self, limit: ListLimit) -> Result<Vec<Record>, StoreError> {
        let tables = self.begin()?;
        Ok(take(tables.locations.iter().rev().cloned(), limit))
    }
}

#[async_trait]
impl StoreHealth for InMemoryStore {
    async fn ping(&self) -> Result<Duration, StoreError> {
        self.begin()?;
        Ok(Duration::ZERO)
    }
}

/// Identity double resolving a fixed set of tokens.
#[derive(Debug, Default, Clone)]
pub struct StaticIdentityProvider {
    users: HashMap<String, UserId>,
    unavailable: bool,
}

impl StaticIdentityProvider {
    /// Accept `token` as belonging to `user`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, user: UserId) -> Self {
        self.users.insert(token.into(), user);
        self
    }

    /// Fail every lookup as if the identity service were down.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            users: HashMap::new(),
            unavailable: true,
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn resolve(&self, token: &AccessToken) -> Result<Option<UserId>, IdentityError> {
        if self.unavailable {
            return Err(IdentityError::transport("identity double marked unavailable"));
        }
        Ok(self.users.get(token.expose()).cloned())
    }
}
