//! Spec, versions, APIs and the error taxonomy.

use crate::ir::{Model, Name, Operation, StatusTag, TypeExpr};
use serde::{Deserialize, Serialize};

/// Standard error responses present in every spec: `(status, model)`.
pub const STANDARD_ERRORS: [(&str, &str); 3] = [
    ("bad_request", "BadRequestError"),
    ("not_found", "NotFoundError"),
    ("internal_server_error", "InternalServerError"),
];

/// Built-in error models shipped with the shared helpers.
pub const STANDARD_ERROR_MODELS: [&str; 5] = [
    "BadRequestError",
    "NotFoundError",
    "InternalServerError",
    "ValidationError",
    "ErrorLocation",
];

/// A group of operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Api {
    /// API name
    pub name: Name,
    /// Operations in declaration order
    pub operations: Vec<Operation>,
}

/// A versioned set of APIs and models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Version name; empty for the unversioned API surface
    #[serde(default = "unnamed")]
    pub name: Name,
    /// Explicit URL prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// APIs in declaration order
    #[serde(default)]
    pub apis: Vec<Api>,
    /// Models in declaration order
    #[serde(default)]
    pub models: Vec<Model>,
}

fn unnamed() -> Name {
    Name::new("")
}

impl Version {
    /// Returns the URL prefix shared by every endpoint of the version.
    ///
    /// # Examples
    ///
    /// ```
    /// use specgen_core::{Name, Version};
    ///
    /// let version = Version { name: Name::new("v2"), url: None, apis: vec![], models: vec![] };
    /// assert_eq!(version.url_prefix(), "/v2");
    /// ```
    #[must_use]
    pub fn url_prefix(&self) -> String {
        match &self.url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None if self.name.is_empty() => String::new(),
            None => format!("/{}", self.name),
        }
    }

    /// Finds a model by name.
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name.as_str() == name)
    }
}

/// An error response shared by every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status tag
    pub status: StatusTag,
    /// Error body model
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// Optional documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The error taxonomy.
///
/// The three standard responses are implicit; `responses` only holds the
/// API-specific ones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpErrors {
    /// API-specific error responses
    #[serde(default)]
    pub responses: Vec<ErrorResponse>,
    /// Models referenced by API-specific errors
    #[serde(default)]
    pub models: Vec<Model>,
}

impl HttpErrors {
    /// Returns the standard responses followed by the API-specific ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use specgen_core::HttpErrors;
    ///
    /// let statuses: Vec<_> = HttpErrors::default()
    ///     .all_responses()
    ///     .into_iter()
    ///     .map(|r| r.status.to_string())
    ///     .collect();
    /// assert_eq!(statuses, ["bad_request", "not_found", "internal_server_error"]);
    /// ```
    #[must_use]
    pub fn all_responses(&self) -> Vec<ErrorResponse> {
        let standard = STANDARD_ERRORS.iter().map(|(status, model)| ErrorResponse {
            status: StatusTag::new(*status),
            ty: TypeExpr::plain(*model),
            description: None,
        });
        standard.chain(self.responses.iter().cloned()).collect()
    }

    /// Finds an API-specific error model by name.
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name.as_str() == name)
    }
}

/// A complete, validated API description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    /// Service name
    pub name: Name,
    /// Versions in declaration order
    pub versions: Vec<Version>,
    /// Error taxonomy
    #[serde(default)]
    pub http_errors: HttpErrors,
}
