//! Response decoding for generated clients.

use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure to consume a response body.
#[derive(Error, Debug)]
pub enum ResponseError {
    /// The body could not be read.
    #[error("Failed to read response body: {0}")]
    Read(#[source] reqwest::Error),

    /// The body is not the expected JSON document.
    #[error("Failed to parse response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Decodes a JSON body.
///
/// # Errors
///
/// Returns [`ResponseError`] when the body cannot be read or decoded.
pub fn json<T: DeserializeOwned>(response: Response) -> Result<T, ResponseError> {
    let body = response.bytes().map_err(ResponseError::Read)?;
    serde_json::from_slice(&body).map_err(ResponseError::Decode)
}

/// Reads a plain text body.
///
/// # Errors
///
/// Returns [`ResponseError::Read`] when the body cannot be read.
pub fn text(response: Response) -> Result<String, ResponseError> {
    response.text().map_err(ResponseError::Read)
}

/// Drains a body that carries no content.
///
/// # Errors
///
/// Returns [`ResponseError::Read`] when the body cannot be read.
pub fn empty(response: Response) -> Result<(), ResponseError> {
    response.bytes().map(drop).map_err(ResponseError::Read)
}
