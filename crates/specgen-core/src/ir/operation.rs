//! Operations, parameters, bodies and responses.

use crate::ir::{Name, StatusTag, TypeExpr};
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL, query, header or form parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Wire name
    pub name: Name,
    /// Parameter type
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// Default literal in wire form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Optional documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Param {
    /// Creates an undocumented parameter without a default.
    #[must_use]
    pub fn new(name: impl Into<Name>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            description: None,
        }
    }

    /// Sets the default literal.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// URL template placeholder
    Url,
    /// Query string
    Query,
    /// Request header
    Header,
    /// Form body field
    Form,
}

/// Method, URL template and URL parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// HTTP method
    pub method: HttpMethod,
    /// URL template with `{name}` placeholders
    pub url: String,
    /// Parameters bound by the template, in declaration order
    #[serde(default)]
    pub url_params: Vec<Param>,
}

impl Endpoint {
    /// Returns the placeholder names of the URL template in order of appearance.
    ///
    /// # Examples
    ///
    /// ```
    /// use specgen_core::{Endpoint, HttpMethod};
    ///
    /// let endpoint = Endpoint {
    ///     method: HttpMethod::Get,
    ///     url: "/orders/{id}/items/{item_id}".to_string(),
    ///     url_params: vec![],
    /// };
    /// assert_eq!(endpoint.placeholders(), vec!["id", "item_id"]);
    /// ```
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.url.as_str();
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };
            names.push(&after[..end]);
            rest = &after[end + 1..];
        }
        names
    }
}

/// Classification of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// No payload
    Empty,
    /// Plain text
    RawString,
    /// JSON document
    Json,
    /// `multipart/form-data`
    FormData,
    /// `application/x-www-form-urlencoded`
    FormUrlEncoded,
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// Plain text body
    RawString {
        /// Optional documentation
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// JSON body
    Json {
        /// Body type
        #[serde(rename = "type")]
        ty: TypeExpr,
        /// Optional documentation
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Multipart form fields
    FormData {
        /// Fields in declaration order
        params: Vec<Param>,
    },
    /// URL-encoded form fields
    FormUrlEncoded {
        /// Fields in declaration order
        params: Vec<Param>,
    },
}

impl RequestBody {
    /// Classifies a declared body type.
    ///
    /// # Examples
    ///
    /// ```
    /// use specgen_core::{BodyKind, RequestBody, TypeExpr};
    ///
    /// assert_eq!(RequestBody::from_type(TypeExpr::plain("empty"), None).kind(), BodyKind::Empty);
    /// assert_eq!(RequestBody::from_type(TypeExpr::plain("string"), None).kind(), BodyKind::RawString);
    /// assert_eq!(RequestBody::from_type(TypeExpr::plain("Order"), None).kind(), BodyKind::Json);
    /// ```
    #[must_use]
    pub fn from_type(ty: TypeExpr, description: Option<String>) -> Self {
        if ty.is_empty_type() {
            Self::Empty
        } else if ty.is_string_type() {
            Self::RawString { description }
        } else {
            Self::Json { ty, description }
        }
    }

    /// Returns the body kind.
    #[must_use]
    pub const fn kind(&self) -> BodyKind {
        match self {
            Self::Empty => BodyKind::Empty,
            Self::RawString { .. } => BodyKind::RawString,
            Self::Json { .. } => BodyKind::Json,
            Self::FormData { .. } => BodyKind::FormData,
            Self::FormUrlEncoded { .. } => BodyKind::FormUrlEncoded,
        }
    }

    /// Returns the fields of a form body.
    #[must_use]
    pub fn form_params(&self) -> Option<&[Param]> {
        match self {
            Self::FormData { params } | Self::FormUrlEncoded { params } => Some(params),
            Self::Empty | Self::RawString { .. } | Self::Json { .. } => None,
        }
    }
}

/// Response payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseBody {
    /// No body
    #[default]
    Empty,
    /// Plain text
    RawString,
    /// JSON document
    Json(TypeExpr),
}

impl ResponseBody {
    /// Classifies a declared response type.
    #[must_use]
    pub fn from_type(ty: TypeExpr) -> Self {
        if ty.is_empty_type() {
            Self::Empty
        } else if ty.is_string_type() {
            Self::RawString
        } else {
            Self::Json(ty)
        }
    }

    /// Returns the body kind.
    #[must_use]
    pub const fn kind(&self) -> BodyKind {
        match self {
            Self::Empty => BodyKind::Empty,
            Self::RawString => BodyKind::RawString,
            Self::Json(_) => BodyKind::Json,
        }
    }
}

/// One declared response of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResponse {
    /// Status tag
    pub status: StatusTag,
    /// Payload
    #[serde(default)]
    pub body: ResponseBody,
    /// Optional documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OperationResponse {
    /// Creates an undocumented response.
    #[must_use]
    pub fn new(status: impl Into<String>, body: ResponseBody) -> Self {
        Self {
            status: StatusTag::new(status),
            body,
            description: None,
        }
    }
}

/// A single API operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation name
    pub name: Name,
    /// Method, URL and URL params
    pub endpoint: Endpoint,
    /// Header params in declaration order
    #[serde(default)]
    pub header_params: Vec<Param>,
    /// Query params in declaration order
    #[serde(default)]
    pub query_params: Vec<Param>,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Declared responses
    pub responses: Vec<OperationResponse>,
    /// Optional documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Operation {
    /// Returns `true` when more than one response is declared.
    #[must_use]
    pub fn has_multiple_responses(&self) -> bool {
        self.responses.len() > 1
    }

    /// Returns every parameter with its location, in signature order.
    pub fn params(&self) -> impl Iterator<Item = (ParamLocation, &Param)> {
        let form = self
            .body
            .form_params()
            .unwrap_or_default()
            .iter()
            .map(|p| (ParamLocation::Form, p));
        let query = self.query_params.iter().map(|p| (ParamLocation::Query, p));
        let header = self.header_params.iter().map(|p| (ParamLocation::Header, p));
        let url = self
            .endpoint
            .url_params
            .iter()
            .map(|p| (ParamLocation::Url, p));
        form.chain(query).chain(header).chain(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_ignore_unclosed_brace() {
        let endpoint = Endpoint {
            method: HttpMethod::Get,
            url: "/a/{id}/{broken".to_string(),
            url_params: vec![],
        };
        assert_eq!(endpoint.placeholders(), vec!["id"]);
    }

    #[test]
    fn test_response_body_classification() {
        assert_eq!(
            ResponseBody::from_type(TypeExpr::plain("empty")),
            ResponseBody::Empty
        );
        assert_eq!(
            ResponseBody::from_type(TypeExpr::plain("string")),
            ResponseBody::RawString
        );
        assert_eq!(
            ResponseBody::from_type(TypeExpr::plain("string[]")).kind(),
            BodyKind::Json
        );
    }

    #[test]
    fn test_method_serde_upper_case() {
        let method: HttpMethod = serde_json::from_str("\"DELETE\"").unwrap();
        assert_eq!(method, HttpMethod::Delete);
        assert_eq!(method.to_string(), "DELETE");
    }

    #[test]
    fn test_params_follow_signature_order() {
        let operation: Operation = serde_json::from_value(serde_json::json!({
            "name": "update",
            "endpoint": {
                "method": "PUT",
                "url": "/items/{id}",
                "url_params": [{ "name": "id", "type": "int64" }]
            },
            "header_params": [{ "name": "X-Trace", "type": "string?" }],
            "query_params": [{ "name": "dry_run", "type": "bool" }],
            "responses": [{ "status": "ok" }]
        }))
        .unwrap();

        let locations: Vec<_> = operation.params().map(|(location, _)| location).collect();
        assert_eq!(
            locations,
            vec![ParamLocation::Query, ParamLocation::Header, ParamLocation::Url]
        );
        assert_eq!(operation.body.kind(), BodyKind::Empty);
        assert_eq!(operation.responses[0].body, ResponseBody::Empty);
    }
}
