//! Form body decoding.

use super::errmodels::{BadRequestError, ErrorLocation};
use axum::extract::Multipart;
use axum::extract::multipart::MultipartRejection;

/// Splits an `application/x-www-form-urlencoded` body into pairs.
#[must_use]
pub fn urlencoded_pairs(body: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body).into_owned().collect()
}

/// Collects the text fields of a `multipart/form-data` body.
///
/// # Errors
///
/// Returns the bad request to send back when the body is not valid multipart.
pub async fn multipart_pairs(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<(String, String)>, BadRequestError> {
    let mut multipart = multipart.map_err(|error| body_error(&error))?;
    let mut pairs = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| body_error(&error))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.map_err(|error| body_error(&error))?;
        pairs.push((name, value));
    }
    Ok(pairs)
}

fn body_error(error: &dyn std::fmt::Display) -> BadRequestError {
    BadRequestError::new(
        ErrorLocation::Body,
        format!("Reading request body failed: {error}"),
        Vec::new(),
    )
}
