//! Record payloads exchanged with the store.
//!
//! Rows are opaque JSON objects owned by the store's schema. The only typed
//! rows are default service intervals, whose columns the API publishes, and
//! new service records, which the server stamps with ownership and
//! timestamps before insertion.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::{BikeId, UserId};

/// A single store row passed through without reshaping.
pub type Record = Map<String, Value>;

/// Columns the server owns on inserted service records.
const SERVER_ASSIGNED_COLUMNS: [&str; 5] = ["id", "user_id", "bike_id", "created_at", "updated_at"];

/// Maximum page size accepted for list endpoints.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Recommended distance between two services of the same type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultInterval {
    /// Service category, e.g. `chain_lube`.
    pub service_type: String,
    /// Distance in kilometres, kept as the store's exact number.
    pub default_interval_km: Number,
    /// Free-text explanation shown to riders.
    #[serde(default)]
    pub description: Option<String>,
    /// Store-assigned creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Store-assigned modification timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Validation failures for new service record payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceRecordValidationError {
    /// The body was not a JSON object.
    #[error("service record must be a JSON object")]
    NotAnObject,
    /// `service_type` was missing, blank, or not a string.
    #[error("service_type must be a non-empty string")]
    MissingServiceType,
}

/// Client-supplied service record, stripped of server-owned columns.
///
/// # Examples
/// ```
/// use bikecare::domain::NewServiceRecord;
/// use serde_json::json;
///
/// let record = NewServiceRecord::from_payload(json!({
///     "service_type": "chain_lube",
///     "user_id": "someone-else",
/// }))
/// .expect("valid payload");
/// assert_eq!(record.service_type(), "chain_lube");
/// assert!(!record.fields().contains_key("user_id"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceRecord {
    fields: Record,
}

impl NewServiceRecord {
    /// Validate a raw JSON payload.
    ///
    /// # Errors
    /// Rejects non-object payloads and payloads without a usable
    /// `service_type`.
    pub fn from_payload(payload: Value) -> Result<Self, ServiceRecordValidationError> {
        let Value::Object(mut fields) = payload else {
            return Err(ServiceRecordValidationError::NotAnObject);
        };
        let has_service_type = fields
            .get("service_type")
            .and_then(Value::as_str)
            .is_some_and(|value| !value.trim().is_empty());
        if !has_service_type {
            return Err(ServiceRecordValidationError::MissingServiceType);
        }
        for column in SERVER_ASSIGNED_COLUMNS {
            fields.remove(column);
        }
        Ok(Self { fields })
    }

    /// Service category supplied by the client.
    #[must_use]
    pub fn service_type(&self) -> &str {
        self.fields
            .get("service_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Client-supplied columns.
    #[must_use]
    pub fn fields(&self) -> &Record {
        &self.fields
    }

    /// Build the row to insert, stamping ownership and timestamps.
    #[must_use]
    pub fn into_row(self, user_id: &UserId, bike_id: BikeId, now: DateTime<Utc>) -> Record {
        let mut row = self.fields;
        let timestamp = store_timestamp(now);
        row.insert("user_id".to_owned(), Value::String(user_id.to_string()));
        row.insert("bike_id".to_owned(), Value::String(bike_id.to_string()));
        row.insert("created_at".to_owned(), Value::String(timestamp.clone()));
        row.insert("updated_at".to_owned(), Value::String(timestamp));
        row
    }
}

/// Render a timestamp the way the store accepts it.
#[must_use]
pub fn store_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Validation failure for list page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("limit must be between 1 and {MAX_LIST_LIMIT}")]
pub struct InvalidListLimit;

/// Page size for list reads, bounded to `1..=MAX_LIST_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimit(u32);

impl ListLimit {
    /// Validate a requested page size.
    ///
    /// # Errors
    /// Returns [`InvalidListLimit`] outside `1..=MAX_LIST_LIMIT`.
    pub fn new(value: u32) -> Result<Self, InvalidListLimit> {
        if (1..=MAX_LIST_LIMIT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidListLimit)
        }
    }

    /// Largest accepted page size.
    #[must_use]
    pub const fn max() -> Self {
        Self(MAX_LIST_LIMIT)
    }

    /// Raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    const BIKE: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    #[case(json!([]), ServiceRecordValidationError::NotAnObject)]
    #[case(json!("chain"), ServiceRecordValidationError::NotAnObject)]
    #[case(json!({}), ServiceRecordValidationError::MissingServiceType)]
    #[case(json!({ "service_type": "  " }), ServiceRecordValidationError::MissingServiceType)]
    #[case(json!({ "service_type": 7 }), ServiceRecordValidationError::MissingServiceType)]
    fn rejects_invalid_payloads(#[case] payload: Value, #[case] expected: ServiceRecordValidationError) {
        assert_eq!(NewServiceRecord::from_payload(payload), Err(expected));
    }

    #[rstest]
    fn into_row_overrides_server_owned_columns() {
        let record = NewServiceRecord::from_payload(json!({
            "service_type": "brake_pads",
            "mileage_km": 1200,
            "id": "client-chosen",
            "user_id": "spoofed",
            "created_at": "1999-01-01T00:00:00Z",
        }))
        .expect("valid payload");
        let user = UserId::new("rider-1").expect("user id");
        let bike = BikeId::parse(BIKE).expect("bike id");
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).single().expect("timestamp");

        let row = record.into_row(&user, bike, now);

        assert_eq!(row.get("id"), None);
        assert_eq!(row["user_id"], "rider-1");
        assert_eq!(row["bike_id"], BIKE);
        assert_eq!(row["created_at"], "2024-05-01T12:30:00.000Z");
        assert_eq!(row["updated_at"], row["created_at"]);
        assert_eq!(row["mileage_km"], 1200);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(MAX_LIST_LIMIT, true)]
    #[case(MAX_LIST_LIMIT + 1, false)]
    fn list_limit_bounds(#[case] value: u32, #[case] ok: bool) {
        assert_eq!(ListLimit::new(value).is_ok(), ok);
    }

    #[rstest]
    fn default_interval_keeps_numeric_form() {
        let raw = json!({
            "service_type": "chain_lube",
            "default_interval_km": 300,
            "description": null,
            "created_at": "2024-01-01T00:00:00+00:00",
            "updated_at": "2024-01-01T00:00:00+00:00",
        });
        let interval: DefaultInterval = serde_json::from_value(raw.clone()).expect("decode");
        assert_eq!(serde_json::to_value(&interval).expect("encode"), raw);
    }
}
