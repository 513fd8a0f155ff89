//! Domain ports defining the edges of the hexagon.
//!
//! Inbound adapters depend on these traits; outbound adapters implement them.
//! Each trait exposes typed errors so adapters map their failures into
//! predictable variants instead of leaking transport errors.

mod macros;

pub(crate) use macros::define_port_error;

mod bike_repository;
mod default_interval_repository;
mod identity_provider;
mod location_repository;
mod profile_repository;
mod service_record_repository;
mod store_error;
mod store_health;

#[cfg(test)]
pub use bike_repository::MockBikeRepository;
pub use bike_repository::BikeRepository;
#[cfg(test)]
pub use default_interval_repository::MockDefaultIntervalRepository;
pub use default_interval_repository::DefaultIntervalRepository;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityError, IdentityProvider};
#[cfg(test)]
pub use location_repository::MockLocationRepository;
pub use location_repository::LocationRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::ProfileRepository;
#[cfg(test)]
pub use service_record_repository::MockServiceRecordRepository;
pub use service_record_repository::ServiceRecordRepository;
pub use store_error::StoreError;
#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::StoreHealth;
