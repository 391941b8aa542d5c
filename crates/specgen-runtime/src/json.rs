//! JSON request body decoding.

use super::errmodels::{BadRequestError, ErrorLocation, ValidationError};
use super::params::PARSING_FAILED;
use serde::de::DeserializeOwned;

const FAILED_TO_PARSE_BODY: &str = "Failed to parse body";

/// Decodes a JSON body.
///
/// A value of the wrong shape yields one validation error naming the
/// offending field; malformed JSON yields an error without field detail.
///
/// # Errors
///
/// Returns the bad request to send back when the body does not decode.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, BadRequestError> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value: T = serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
        if error.inner().is_data() {
            let path = field_path(&error);
            let message = format!("Failed to parse JSON, field: {path}");
            let detail = ValidationError {
                path,
                code: PARSING_FAILED.to_string(),
                message: Some(message),
            };
            BadRequestError::new(ErrorLocation::Body, FAILED_TO_PARSE_BODY, vec![detail])
        } else {
            BadRequestError::new(ErrorLocation::Body, FAILED_TO_PARSE_BODY, Vec::new())
        }
    })?;
    deserializer
        .end()
        .map_err(|_| BadRequestError::new(ErrorLocation::Body, FAILED_TO_PARSE_BODY, Vec::new()))?;
    Ok(value)
}

fn field_path(error: &serde_path_to_error::Error<serde_json::Error>) -> String {
    let parent = error.path().to_string();
    let message = error.inner().to_string();
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());
    match missing {
        Some(field) if parent.is_empty() || parent == "." => field.to_string(),
        Some(field) => format!("{parent}.{field}"),
        None => parent,
    }
}
