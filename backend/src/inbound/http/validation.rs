//! Shared validation helpers for inbound HTTP adapters.

use actix_web::web;
use futures_util::StreamExt;
use serde_json::{Value, json};

use crate::domain::{BikeId, Error, ListLimit, MAX_LIST_LIMIT, NewServiceRecord, ServiceRecordValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidLimit,
    InvalidJson,
    InvalidBody,
    MissingField,
    BodyTooLarge,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidLimit => "invalid_limit",
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BodyTooLarge => "body_too_large",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const BIKE_ID: FieldName = FieldName::new("bikeId");
pub(crate) const LIMIT: FieldName = FieldName::new("limit");
pub(crate) const BODY: FieldName = FieldName::new("body");
pub(crate) const SERVICE_TYPE: FieldName = FieldName::new("service_type");

fn field_error(field: FieldName, message: String, code: ErrorCode, value: Option<&str>) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let (Some(value), Some(map)) = (value, details.as_object_mut()) {
        map.insert("value".to_owned(), Value::String(value.to_owned()));
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("{name} must be a valid UUID"),
        ErrorCode::InvalidUuid,
        Some(value),
    )
}

/// Parse a bike identifier from a path segment.
pub(crate) fn parse_bike_id(raw: &str) -> Result<BikeId, Error> {
    BikeId::parse(raw).map_err(|_| invalid_uuid_error(BIKE_ID, raw))
}

/// Parse an optional `limit` query value into a bounded [`ListLimit`].
pub(crate) fn parse_limit(raw: Option<&str>) -> Result<Option<ListLimit>, Error> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u32>()
        .ok()
        .and_then(|value| ListLimit::new(value).ok())
        .map(Some)
        .ok_or_else(|| {
            field_error(
                LIMIT,
                format!("limit must be an integer between 1 and {MAX_LIST_LIMIT}"),
                ErrorCode::InvalidLimit,
                Some(raw),
            )
        })
}

/// Largest request body accepted by write endpoints, in bytes.
pub(crate) const MAX_BODY_BYTES: usize = 64 * 1024;

/// Drain a request body, failing as soon as it grows past `limit` bytes.
pub(crate) async fn read_body(mut payload: web::Payload, limit: usize) -> Result<web::Bytes, Error> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            field_error(
                BODY,
                format!("request body could not be read: {err}"),
                ErrorCode::InvalidBody,
                None,
            )
        })?;
        if body.len() + chunk.len() > limit {
            return Err(field_error(
                BODY,
                format!("request body must not exceed {limit} bytes"),
                ErrorCode::BodyTooLarge,
                None,
            ));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

/// Decode a raw request body into a new service record.
pub(crate) fn parse_new_service_record(body: &[u8]) -> Result<NewServiceRecord, Error> {
    let payload: Value = serde_json::from_slice(body).map_err(|err| {
        field_error(
            BODY,
            format!("request body must be valid JSON: {err}"),
            ErrorCode::InvalidJson,
            None,
        )
    })?;
    NewServiceRecord::from_payload(payload).map_err(|err| match err {
        ServiceRecordValidationError::NotAnObject => {
            field_error(BODY, err.to_string(), ErrorCode::InvalidBody, None)
        }
        ServiceRecordValidationError::MissingServiceType => {
            field_error(SERVICE_TYPE, err.to_string(), ErrorCode::MissingField, None)
        }
    })
}
