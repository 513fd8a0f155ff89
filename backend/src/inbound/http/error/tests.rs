//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("relation \"bikes\" does not exist")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"hint": "x"}))
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("bad")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"field": "bikeId"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("Authentication required"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn render(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace id header is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error_case: Error) {
    let (status, header, body) = render(&internal_error_case).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "error": "Internal Server Error",
            "message": INTERNAL_ERROR_MESSAGE,
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(invalid_request_case: Error) {
    let (status, header, body) = render(&invalid_request_case).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], "bad");
    assert_eq!(body["details"]["field"], "bikeId");
}

#[rstest]
#[actix_web::test]
async fn unauthorised_envelope_matches_contract() {
    let (status, header, body) = render(&Error::unauthorized("Authentication required")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(header.is_none());
    assert_eq!(
        body,
        json!({"error": "Unauthorized", "message": "Authentication required"})
    );
}

#[rstest]
fn store_failure_hides_adapter_detail() {
    let err = store_failure("list bikes")(StoreError::rejected(500_u16, "password authentication failed"));
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(!err.message().contains("password"));
}

#[rstest]
fn actix_errors_become_internal() {
    let actix = actix_web::error::ErrorBadGateway("upstream detail");
    let err = Error::from(actix);
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_ERROR_MESSAGE);
}
