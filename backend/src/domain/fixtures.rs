//! Built-in sample data for development endpoints and tests.
//!
//! Nothing here carries a fixed user identifier: callers pass the identity the
//! request was authenticated with.

use chrono::{DateTime, Utc};
use serde_json::{Number, Value, json};

use super::records::store_timestamp;
use super::{BikeId, DefaultInterval, Record, UserId};

const FIXTURE_TIMESTAMP: &str = "2024-01-01T00:00:00.000Z";

/// Sample default intervals, ordered by distance ascending.
///
/// # Examples
/// ```
/// use bikecare::domain::fixtures::default_intervals;
///
/// let intervals = default_intervals();
/// assert!(intervals.windows(2).all(|pair| {
///     pair[0].default_interval_km.as_u64() <= pair[1].default_interval_km.as_u64()
/// }));
/// ```
#[must_use]
pub fn default_intervals() -> Vec<DefaultInterval> {
    [
        ("chain_lube", 300_u64, "Clean and lubricate the chain"),
        ("tyre_pressure_check", 500, "Check and adjust tyre pressure"),
        ("brake_pads", 1_500, "Inspect brake pads for wear"),
        ("chain_replacement", 3_000, "Measure chain stretch and replace if worn"),
        ("full_service", 5_000, "Full drivetrain, brake, and bearing service"),
    ]
    .into_iter()
    .map(|(service_type, km, description)| DefaultInterval {
        service_type: service_type.to_owned(),
        default_interval_km: Number::from(km),
        description: Some(description.to_owned()),
        created_at: Some(FIXTURE_TIMESTAMP.to_owned()),
        updated_at: Some(FIXTURE_TIMESTAMP.to_owned()),
    })
    .collect()
}

/// Sample service history for one bike, newest first.
#[must_use]
pub fn service_records(user_id: &UserId, bike_id: BikeId) -> Vec<Record> {
    [
        ("chain_lube", "2024-03-02", 1_250),
        ("brake_pads", "2024-02-10", 980),
    ]
    .into_iter()
    .map(|(service_type, date, mileage_km)| {
        to_record(json!({
            "service_type": service_type,
            "service_date": date,
            "mileage_km": mileage_km,
            "user_id": user_id.as_ref(),
            "bike_id": bike_id.to_string(),
        }))
    })
    .collect()
}

/// Placeholder profile row keyed by the given user.
#[must_use]
pub fn placeholder_profile(user_id: &UserId, now: DateTime<Utc>) -> Record {
    let timestamp = store_timestamp(now);
    to_record(json!({
        "id": user_id.as_ref(),
        "full_name": "Placeholder Rider",
        "created_at": timestamp,
        "updated_at": timestamp,
    }))
}

fn to_record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn service_records_are_owned_by_caller() {
        let user = UserId::new("rider-7").expect("user id");
        let bike = BikeId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("bike id");
        let records = service_records(&user, bike);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|row| row["user_id"] == "rider-7"));
    }

    #[rstest]
    fn placeholder_profile_uses_authenticated_id() {
        let user = UserId::new("rider-9").expect("user id");
        let profile = placeholder_profile(&user, Utc::now());
        assert_eq!(profile["id"], "rider-9");
        assert_eq!(profile["created_at"], profile["updated_at"]);
    }
}
