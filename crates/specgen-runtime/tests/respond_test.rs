//! Response writer and header helper tests.

use axum::body::to_bytes;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::Response;
use specgen_runtime::content_type;
use specgen_runtime::errmodels::{BadRequestError, ErrorLocation, InternalServerError};
use specgen_runtime::form::urlencoded_pairs;
use specgen_runtime::respond::{self, LogFields};

const LOG: LogFields = LogFields::new("orders.create_order", "POST", "/orders");

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_json_writer_sets_status_and_content_type() {
    let response = respond::json(&LOG, 201, &serde_json::json!({"id": 7}));
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(body_json(response).await, serde_json::json!({"id": 7}));
}

#[tokio::test]
async fn test_text_and_empty_writers() {
    let response = respond::text(&LOG, 200, "pong");
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"pong");

    let response = respond::empty(&LOG, 204);
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_not_found_carries_message() {
    let response = respond::not_found(&LOG, "Failed to parse url parameters");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"message": "Failed to parse url parameters"})
    );
}

#[tokio::test]
async fn test_internal_server_error_carries_message() {
    let response = respond::internal_server_error(&LOG, "Error returned from service implementation: boom");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: InternalServerError = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(body.message, "Error returned from service implementation: boom");
}

#[tokio::test]
async fn test_bad_request_serializes_location() {
    let error = BadRequestError::new(ErrorLocation::Query, "Failed to parse query", Vec::new());
    let response = respond::bad_request(&LOG, error);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"location": "query", "message": "Failed to parse query", "errors": []})
    );
}

#[tokio::test]
async fn test_content_type_mismatch_is_header_bad_request() {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

    let response = content_type::check(&LOG, &headers, "application/json").unwrap_err();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: BadRequestError = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(body.location, ErrorLocation::Header);
    assert_eq!(body.message, "Failed to parse header");
    assert_eq!(body.errors[0].path, "Content-Type");
    assert_eq!(body.errors[0].code, "missing");
    assert_eq!(
        body.errors[0].message.as_deref(),
        Some("Expected Content-Type header: 'application/json' was not provided, found: 'text/plain'")
    );
}

#[test]
fn test_content_type_with_parameters_matches() {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    assert!(content_type::check(&LOG, &headers, "application/json").is_ok());
}

#[test]
fn test_header_pairs_keep_repeated_values() {
    let mut headers = HeaderMap::new();
    headers.append("x-tag", HeaderValue::from_static("a"));
    headers.append("x-tag", HeaderValue::from_static("b"));
    let pairs = content_type::header_pairs(&headers);
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[1], ("x-tag".to_string(), "b".to_string()));
}

#[test]
fn test_urlencoded_pairs_decode_escapes() {
    let pairs = urlencoded_pairs(b"name=green+tea&note=a%26b");
    assert_eq!(
        pairs,
        vec![
            ("name".to_string(), "green tea".to_string()),
            ("note".to_string(), "a&b".to_string()),
        ]
    );
}
