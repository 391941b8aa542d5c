//! Request header helpers.

use super::errmodels::{BadRequestError, ErrorLocation, ValidationError};
use super::params::MISSING;
use super::respond::{self, LogFields};
use axum::http::{HeaderMap, header};
use axum::response::Response;

/// Verifies that the request declares the `expected` content type.
///
/// # Errors
///
/// Returns the 400 response to send back when the header does not match.
pub fn check(log: &LogFields, headers: &HeaderMap, expected: &str) -> Result<(), Response> {
    let found = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if found.contains(expected) {
        return Ok(());
    }

    let message = format!(
        "Expected Content-Type header: '{expected}' was not provided, found: '{found}'"
    );
    let error = BadRequestError::new(
        ErrorLocation::Header,
        "Failed to parse header",
        vec![ValidationError {
            path: "Content-Type".to_string(),
            code: MISSING.to_string(),
            message: Some(message),
        }],
    );
    Err(respond::bad_request(log, error))
}

/// Flattens headers into wire pairs, skipping values that are not visible ASCII.
#[must_use]
pub fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}
