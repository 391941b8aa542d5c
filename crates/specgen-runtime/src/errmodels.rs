//! Error response models shared by every API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Part of the request that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLocation {
    /// Query string
    Query,
    /// Request headers
    Header,
    /// Request body
    Body,
}

/// A single field-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Wire path of the offending field
    pub path: String,
    /// Machine-readable failure code
    pub code: String,
    /// Human-readable detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadRequestError {
    /// Where parsing failed
    pub location: ErrorLocation,
    /// Summary
    pub message: String,
    /// Per-field failures
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

impl BadRequestError {
    /// Creates a bad request error.
    #[must_use]
    pub fn new(
        location: ErrorLocation,
        message: impl Into<String>,
        errors: Vec<ValidationError>,
    ) -> Self {
        Self {
            location,
            message: message.into(),
            errors,
        }
    }
}

impl fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Body of a 404 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundError {
    /// Summary
    pub message: String,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Body of a 500 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalServerError {
    /// Diagnostic message
    pub message: String,
}

impl fmt::Display for InternalServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
