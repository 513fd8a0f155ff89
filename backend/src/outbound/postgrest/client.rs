//! Reqwest-backed PostgREST client.
//!
//! This client owns transport details only: URL construction, credentials,
//! the bounded request timeout, HTTP error mapping, and JSON decoding. It
//! knows nothing about which tables the application reads.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use super::SelectQuery;
use crate::domain::Record;
use crate::domain::ports::StoreError;

const REST_PATH: &str = "rest/v1/";
const RPC_SEGMENT: &str = "rpc/";
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Connection settings for the hosted store.
#[derive(Clone)]
pub struct StoreConnection {
    /// Project base URL, e.g. `https://project.supabase.co`.
    pub base_url: Url,
    /// Service API key sent with every request.
    pub api_key: String,
    /// Upper bound on any single request, connect to last byte.
    pub timeout: Duration,
}

impl std::fmt::Debug for StoreConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConnection")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Errors raised while constructing a client.
#[derive(Debug, thiserror::Error)]
pub enum StoreClientError {
    /// The base URL cannot carry the REST path.
    #[error("store URL {url} cannot be used as a base URL")]
    InvalidBaseUrl {
        /// Rejected URL.
        url: String,
    },
    /// The API key contains characters not allowed in headers.
    #[error("store API key is not a valid header value")]
    InvalidApiKey,
    /// The HTTP client could not be built.
    #[error("failed to build store HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Minimal PostgREST client shared by every store adapter.
#[derive(Clone)]
pub struct PostgrestClient {
    client: Client,
    rest_url: Url,
}

impl PostgrestClient {
    /// Build a client with default credentials and timeout applied to every
    /// request.
    ///
    /// # Errors
    /// Returns [`StoreClientError`] when the URL, key, or client are unusable.
    pub fn new(connection: &StoreConnection) -> Result<Self, StoreClientError> {
        let rest_url = join_base(&connection.base_url, REST_PATH)?;
        let headers = credential_headers(&connection.api_key)?;
        let client = Client::builder()
            .default_headers(headers)
            .timeout(connection.timeout)
            .build()?;
        Ok(Self { client, rest_url })
    }

    /// Run a read and decode the rows.
    ///
    /// # Errors
    /// Returns [`StoreError`] on transport, status, or decode failures.
    pub async fn select(&self, query: &SelectQuery) -> Result<Vec<Record>, StoreError> {
        let mut url = self.table_url(query.table())?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        debug!(table = query.table(), "store select");
        let body = send(self.client.get(url)).await?;
        decode_rows(&body)
    }

    /// Insert one row and return its stored representation.
    ///
    /// # Errors
    /// Returns [`StoreError`] on transport, status, or decode failures, or
    /// when the store echoes no row back.
    pub async fn insert(&self, table: &str, row: &Record) -> Result<Record, StoreError> {
        let url = self.table_url(table)?;
        debug!(table, "store insert");
        let request = self
            .client
            .post(url)
            .header("Prefer", "return=representation")
            .json(row);
        let body = send(request).await?;
        decode_rows(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::decode(format!("insert into {table} returned no rows")))
    }

    /// Call a stored procedure with named parameters.
    ///
    /// # Errors
    /// Returns [`StoreError`] on transport, status, or decode failures.
    pub async fn rpc(&self, function: &str, params: &Value) -> Result<Value, StoreError> {
        let url = self
            .rest_url
            .join(RPC_SEGMENT)
            .and_then(|rpc| rpc.join(function))
            .map_err(|error| StoreError::connection(format!("invalid procedure {function}: {error}")))?;
        debug!(function, "store rpc");
        let body = send(self.client.post(url).json(params)).await?;
        decode_value(&body)
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.rest_url
            .join(table)
            .map_err(|error| StoreError::connection(format!("invalid table {table}: {error}")))
    }
}

/// Join `path` onto `base`, treating `base` as a directory.
pub(crate) fn join_base(base: &Url, path: &str) -> Result<Url, StoreClientError> {
    if base.cannot_be_a_base() {
        return Err(StoreClientError::InvalidBaseUrl {
            url: base.to_string(),
        });
    }
    let mut directory = base.clone();
    if !directory.path().ends_with('/') {
        let with_slash = format!("{}/", directory.path());
        directory.set_path(&with_slash);
    }
    directory
        .join(path)
        .map_err(|_| StoreClientError::InvalidBaseUrl {
            url: base.to_string(),
        })
}

fn credential_headers(api_key: &str) -> Result<HeaderMap, StoreClientError> {
    let mut key =
        HeaderValue::from_str(api_key).map_err(|_| StoreClientError::InvalidApiKey)?;
    key.set_sensitive(true);
    let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|_| StoreClientError::InvalidApiKey)?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert("apikey", key);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

async fn send(request: RequestBuilder) -> Result<Vec<u8>, StoreError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn decode_rows(body: &[u8]) -> Result<Vec<Record>, StoreError> {
    match decode_value(body)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                other => Err(StoreError::decode(format!(
                    "expected row object, found {}",
                    json_kind(&other)
                ))),
            })
            .collect(),
        Value::Object(row) => Ok(vec![row]),
        other => Err(StoreError::decode(format!(
            "expected row list, found {}",
            json_kind(&other)
        ))),
    }
}

fn decode_value(body: &[u8]) -> Result<Value, StoreError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|error| StoreError::decode(format!("invalid JSON payload: {error}")))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn map_transport_error(error: reqwest::Error) -> StoreError {
    if error.is_timeout() {
        StoreError::timeout(error.to_string())
    } else if error.is_decode() {
        StoreError::decode(error.to_string())
    } else {
        StoreError::connection(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StoreError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        preview
    };
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => StoreError::timeout(message),
        _ => StoreError::rejected(status.as_u16(), message),
    }
}

pub(crate) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn connection(base: &str) -> StoreConnection {
        StoreConnection {
            base_url: Url::parse(base).expect("base url"),
            api_key: "service-key".to_owned(),
            timeout: Duration::from_secs(1),
        }
    }

    #[rstest]
    #[case("https://project.supabase.co", "https://project.supabase.co/rest/v1/")]
    #[case("https://project.supabase.co/", "https://project.supabase.co/rest/v1/")]
    #[case("http://localhost:54321/proxy", "http://localhost:54321/proxy/rest/v1/")]
    fn rest_url_keeps_base_path(#[case] base: &str, #[case] expected: &str) {
        let url = join_base(&Url::parse(base).expect("url"), REST_PATH).expect("join");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn rejects_header_unsafe_api_keys() {
        let mut conn = connection("https://project.supabase.co");
        conn.api_key = "line\nbreak".to_owned();
        assert!(matches!(
            PostgrestClient::new(&conn),
            Err(StoreClientError::InvalidApiKey)
        ));
    }

    #[rstest]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", connection("https://project.supabase.co"));
        assert!(!rendered.contains("service-key"));
    }

    #[rstest]
    #[case(b"".as_slice(), 0)]
    #[case(b"null".as_slice(), 0)]
    #[case(b"[]".as_slice(), 0)]
    #[case(b"[{\"id\":1},{\"id\":2}]".as_slice(), 2)]
    #[case(b"{\"id\":1}".as_slice(), 1)]
    fn decodes_row_bodies(#[case] body: &[u8], #[case] expected: usize) {
        assert_eq!(decode_rows(body).expect("rows").len(), expected);
    }

    #[rstest]
    #[case(b"[1,2]".as_slice())]
    #[case(b"\"text\"".as_slice())]
    #[case(b"{not json".as_slice())]
    fn rejects_non_row_bodies(#[case] body: &[u8]) {
        assert!(matches!(decode_rows(body), Err(StoreError::Decode { .. })));
    }

    #[rstest]
    #[case(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case(StatusCode::REQUEST_TIMEOUT, true)]
    #[case(StatusCode::BAD_REQUEST, false)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn maps_statuses(#[case] status: StatusCode, #[case] is_timeout: bool) {
        let error = map_status_error(status, b"{\"message\":\"boom\"}");
        assert_eq!(matches!(error, StoreError::Timeout { .. }), is_timeout);
        if !is_timeout {
            assert_eq!(
                error,
                StoreError::rejected(status.as_u16(), "{\"message\":\"boom\"}")
            );
        }
    }

    #[rstest]
    fn empty_error_body_uses_reason_phrase() {
        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE, b"");
        assert_eq!(error, StoreError::rejected(503_u16, "Service Unavailable"));
    }

    #[rstest]
    fn preview_is_compacted_and_truncated() {
        let body = format!("  a \n b {}", "x".repeat(200));
        let preview = body_preview(body.as_bytes());
        assert!(preview.starts_with("a b x"));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_CHAR_LIMIT + 3);
    }
}
