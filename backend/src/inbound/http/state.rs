//! Shared HTTP adapter state.
//!
//! HTTP handlers receive this state through
//! [`RequestContext`](super::auth::RequestContext) so they only depend on
//! domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BikeRepository, DefaultIntervalRepository, LocationRepository, ProfileRepository,
    ServiceRecordRepository, StoreHealth,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub bikes: Arc<dyn BikeRepository>,
    pub service_records: Arc<dyn ServiceRecordRepository>,
    pub default_intervals: Arc<dyn DefaultIntervalRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub store_health: Arc<dyn StoreHealth>,
}

impl HttpState {
    /// Construct state where one adapter serves every port.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use bikecare::inbound::http::state::HttpState;
    /// use bikecare::outbound::postgrest::{PostgrestClient, PostgrestStore, StoreConnection};
    ///
    /// let connection = StoreConnection {
    ///     base_url: "https://project.example.test".parse().expect("url"),
    ///     api_key: "service-key".to_owned(),
    ///     timeout: Duration::from_secs(10),
    /// };
    /// let client = PostgrestClient::new(&connection).expect("client");
    /// let state = HttpState::from_store(Arc::new(PostgrestStore::new(client)));
    /// let _bikes = state.bikes.clone();
    /// ```
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: BikeRepository
            + ServiceRecordRepository
            + DefaultIntervalRepository
            + ProfileRepository
            + LocationRepository
            + StoreHealth
            + 'static,
    {
        Self {
            bikes: store.clone(),
            service_records: store.clone(),
            default_intervals: store.clone(),
            profiles: store.clone(),
            locations: store.clone(),
            store_health: store,
        }
    }
}
