//! Names, status tags and IR locations.
//!
//! # Examples
//!
//! ```
//! use specgen_core::{Location, Name, StatusTag};
//!
//! let name = Name::new("create_order");
//! assert_eq!(name.as_str(), "create_order");
//!
//! let status = StatusTag::new("not_found");
//! assert_eq!(status.code(), Some(404));
//!
//! let location = Location::root().child("v2").child(name.as_str());
//! assert_eq!(location.to_string(), "v2.create_order");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source name of an IR node.
///
/// Holds the name exactly as declared (snake case by loader contract).
/// Target-language casing is the job of a naming policy, never of `Name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Creates a name from its source spelling.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the source spelling.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the unnamed (default) version.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Standard status names and their HTTP codes.
const STATUS_CODES: &[(&str, u16)] = &[
    ("ok", 200),
    ("created", 201),
    ("accepted", 202),
    ("non_authoritative_info", 203),
    ("no_content", 204),
    ("reset_content", 205),
    ("partial_content", 206),
    ("multiple_choices", 300),
    ("moved_permanently", 301),
    ("found", 302),
    ("see_other", 303),
    ("not_modified", 304),
    ("temporary_redirect", 307),
    ("permanent_redirect", 308),
    ("bad_request", 400),
    ("unauthorized", 401),
    ("payment_required", 402),
    ("forbidden", 403),
    ("not_found", 404),
    ("method_not_allowed", 405),
    ("not_acceptable", 406),
    ("request_timeout", 408),
    ("conflict", 409),
    ("gone", 410),
    ("length_required", 411),
    ("precondition_failed", 412),
    ("request_entity_too_large", 413),
    ("unsupported_media_type", 415),
    ("unprocessable_entity", 422),
    ("locked", 423),
    ("too_many_requests", 429),
    ("internal_server_error", 500),
    ("not_implemented", 501),
    ("bad_gateway", 502),
    ("service_unavailable", 503),
    ("gateway_timeout", 504),
];

/// Response status tag, e.g. `ok` or `not_found`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusTag(Name);

impl StatusTag {
    /// Creates a status tag; unknown tags are reported during validation.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Name::new(tag))
    }

    /// Returns the tag as declared.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &Name {
        &self.0
    }

    /// Returns the tag as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the HTTP status code for known tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use specgen_core::StatusTag;
    ///
    /// assert_eq!(StatusTag::new("ok").code(), Some(200));
    /// assert_eq!(StatusTag::new("teapot").code(), None);
    /// ```
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        STATUS_CODES
            .iter()
            .find(|(tag, _)| *tag == self.as_str())
            .map(|(_, code)| *code)
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Dotted path to an IR node, used in error reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    segments: Vec<String>,
}

impl Location {
    /// The location of the spec itself.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns a new location one level deeper.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        let mut segments = self.segments.clone();
        if !segment.is_empty() {
            segments.push(segment);
        }
        Self { segments }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("spec");
        }
        f.write_str(&self.segments.join("."))
    }
}
