//! Signature Builder.
//!
//! Derives the callable signature of an operation: the body parameter first,
//! then query, header and URL parameters in declaration order, and a return
//! type that is either the single response payload or a per-operation
//! response enum.

use crate::marshal::ParamCodec;
use crate::naming::NamingPolicy;
use crate::resolver::{Resolver, TargetType, TypePaths};
use specgen_core::{
    Error, Location, Operation, OperationResponse, Param, ParamLocation, RequestBody,
    ResponseBody, Result,
};

/// Identifiers bound by emitted client methods and handlers before every
/// parameter has been read. No parameter or form field may map to one.
pub const RESERVED_IDENTS: &[&str] = &[
    "self",
    // client methods
    "request_url",
    "request_builder",
    "query_writer",
    "header_writer",
    // handlers
    "service_impl",
    "url_pairs",
    "query_pairs",
    "request_headers",
    "multipart_body",
    "request_body",
    "log_fields",
    "url_parser",
    "header_parser",
    "query_parser",
    "form_parser",
    "form_pairs",
];

/// Name of the body parameter of both sides.
pub const BODY_IDENT: &str = "body";

/// Request body as seen by the signature.
#[derive(Debug)]
pub enum BodyShape<'a> {
    /// No body parameter
    None,
    /// `text/plain`
    Text,
    /// JSON document of the resolved type
    Json(TargetType),
    /// Form fields collected into a synthesized struct
    Form {
        /// Name of the synthesized struct
        struct_name: String,
        /// Field codecs in declaration order
        fields: Vec<ParamCodec<'a>>,
        /// `true` for `multipart/form-data`
        multipart: bool,
    },
}

/// Payload of one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// No content
    Empty,
    /// `text/plain`
    Text,
    /// JSON document of the resolved type
    Json(TargetType),
}

impl Payload {
    /// Rendered payload type; `None` for empty responses.
    #[must_use]
    pub fn render(&self, naming: &dyn NamingPolicy, paths: TypePaths) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text => Some("String".to_string()),
            Self::Json(ty) => Some(ty.render(naming, paths)),
        }
    }
}

/// One declared response with its enum variant name and status code.
#[derive(Debug)]
pub struct ResponseVariant<'a> {
    /// Variant name
    pub name: String,
    /// HTTP status code
    pub code: u16,
    /// Declared response
    pub response: &'a OperationResponse,
    /// Resolved payload
    pub payload: Payload,
}

/// Return shape of an operation.
#[derive(Debug)]
pub enum Returns<'a> {
    /// Exactly one declared response
    Single(ResponseVariant<'a>),
    /// Several responses carried by a generated enum
    Multi {
        /// Name of the response enum
        enum_name: String,
        /// Variants in declaration order
        variants: Vec<ResponseVariant<'a>>,
    },
}

impl<'a> Returns<'a> {
    /// Every response in declaration order.
    #[must_use]
    pub fn variants(&self) -> &[ResponseVariant<'a>] {
        match self {
            Self::Single(variant) => std::slice::from_ref(variant),
            Self::Multi { variants, .. } => variants,
        }
    }
}

/// Signature of one operation.
#[derive(Debug)]
pub struct Signature<'a> {
    /// The operation
    pub operation: &'a Operation,
    /// Method name
    pub fn_name: String,
    /// Request body
    pub body: BodyShape<'a>,
    /// Query parameters
    pub query: Vec<ParamCodec<'a>>,
    /// Header parameters
    pub header: Vec<ParamCodec<'a>>,
    /// URL parameters
    pub url: Vec<ParamCodec<'a>>,
    /// Return shape
    pub returns: Returns<'a>,
}

impl<'a> Signature<'a> {
    /// Builds the signature of `operation`.
    ///
    /// # Errors
    ///
    /// Returns a resolution error when a parameter, body or response type
    /// does not resolve, or [`Error::UnknownStatus`]
    /// for an unvalidated status tag.
    pub fn build(
        operation: &'a Operation,
        resolver: &Resolver<'_>,
        naming: &dyn NamingPolicy,
        at: &Location,
    ) -> Result<Self> {
        let codecs = |params: &'a [Param], location: ParamLocation| -> Result<Vec<ParamCodec<'a>>> {
            params
                .iter()
                .map(|param| ParamCodec::new(param, location, resolver, naming, at))
                .collect()
        };

        let type_name = naming.type_name(operation.name.as_str());
        let body = match &operation.body {
            RequestBody::Empty => BodyShape::None,
            RequestBody::RawString { .. } => BodyShape::Text,
            RequestBody::Json { ty, .. } => BodyShape::Json(resolver.resolve(ty, &at.child("body"))?),
            RequestBody::FormData { params } | RequestBody::FormUrlEncoded { params } => {
                BodyShape::Form {
                    struct_name: format!("{type_name}Form"),
                    fields: codecs(params, ParamLocation::Form)?,
                    multipart: matches!(operation.body, RequestBody::FormData { .. }),
                }
            }
        };

        let mut variants = Vec::with_capacity(operation.responses.len());
        for response in &operation.responses {
            let response_at = at.child("responses").child(response.status.as_str());
            let payload = match &response.body {
                ResponseBody::Empty => Payload::Empty,
                ResponseBody::RawString => Payload::Text,
                ResponseBody::Json(ty) => Payload::Json(resolver.resolve(ty, &response_at)?),
            };
            let code = response.status.code().ok_or_else(|| Error::UnknownStatus {
                status: response.status.to_string(),
                location: response_at.clone(),
            })?;
            variants.push(ResponseVariant {
                name: naming.variant_name(response.status.as_str()),
                code,
                response,
                payload,
            });
        }
        let returns = if variants.len() == 1 {
            Returns::Single(variants.remove(0))
        } else {
            Returns::Multi {
                enum_name: format!("{type_name}Response"),
                variants,
            }
        };

        Ok(Self {
            operation,
            fn_name: naming.fn_name(operation.name.as_str()),
            body,
            query: codecs(&operation.query_params, ParamLocation::Query)?,
            header: codecs(&operation.header_params, ParamLocation::Header)?,
            url: codecs(&operation.endpoint.url_params, ParamLocation::Url)?,
            returns,
        })
    }

    /// Non-body parameters in signature order.
    pub fn params(&self) -> impl Iterator<Item = &ParamCodec<'a>> {
        self.query.iter().chain(&self.header).chain(&self.url)
    }

    /// Resolved types named by the service method itself. Types reachable
    /// only through the form struct or the response enum are left out.
    pub fn service_types(&self) -> impl Iterator<Item = &TargetType> {
        let body = match &self.body {
            BodyShape::Json(ty) => Some(ty),
            BodyShape::None | BodyShape::Text | BodyShape::Form { .. } => None,
        };
        let payload = match &self.returns {
            Returns::Single(ResponseVariant {
                payload: Payload::Json(ty),
                ..
            }) => Some(ty),
            Returns::Single(_) | Returns::Multi { .. } => None,
        };
        body.into_iter()
            .chain(self.params().map(|codec| &codec.ty))
            .chain(payload)
    }

    /// Success type of the method.
    #[must_use]
    pub fn return_type(&self, naming: &dyn NamingPolicy, paths: TypePaths) -> String {
        match &self.returns {
            Returns::Single(variant) => variant
                .payload
                .render(naming, paths)
                .unwrap_or_else(|| "()".to_string()),
            Returns::Multi { enum_name, .. } => enum_name.clone(),
        }
    }

    /// Owned parameters of the service method.
    #[must_use]
    pub fn service_params(&self, naming: &dyn NamingPolicy, paths: TypePaths) -> Vec<(String, String)> {
        let body = match &self.body {
            BodyShape::None => None,
            BodyShape::Text => Some("String".to_string()),
            BodyShape::Json(ty) => Some(ty.render(naming, paths)),
            BodyShape::Form { struct_name, .. } => Some(struct_name.clone()),
        };
        self.with_params(body, naming, paths)
    }

    /// Parameters of the client method; the body is borrowed.
    #[must_use]
    pub fn client_params(&self, naming: &dyn NamingPolicy, paths: TypePaths) -> Vec<(String, String)> {
        let body = match &self.body {
            BodyShape::None => None,
            BodyShape::Text => Some("&str".to_string()),
            BodyShape::Json(ty) => Some(format!("&{}", ty.render(naming, paths))),
            BodyShape::Form { struct_name, .. } => Some(format!("&{struct_name}")),
        };
        self.with_params(body, naming, paths)
    }

    fn with_params(
        &self,
        body: Option<String>,
        naming: &dyn NamingPolicy,
        paths: TypePaths,
    ) -> Vec<(String, String)> {
        body.map(|ty| (BODY_IDENT.to_string(), ty))
            .into_iter()
            .chain(
                self.params()
                    .map(|codec| (codec.ident.clone(), codec.ty.render(naming, paths))),
            )
            .collect()
    }

    /// Rendered `name: Type` list without the receiver.
    #[must_use]
    pub fn render_params(params: &[(String, String)]) -> String {
        params
            .iter()
            .map(|(name, ty)| format!("{name}: {ty}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::RustNaming;
    use specgen_core::{HttpErrors, Version};

    fn version() -> Version {
        serde_json::from_value(serde_json::json!({
            "name": "v1",
            "apis": [{
                "name": "orders",
                "operations": [
                    {
                        "name": "update_order",
                        "endpoint": {
                            "method": "PUT",
                            "url": "/orders/{id}",
                            "url_params": [{ "name": "id", "type": "int64" }]
                        },
                        "header_params": [{ "name": "X-Trace", "type": "string?" }],
                        "query_params": [{ "name": "dry_run", "type": "bool", "default": "false" }],
                        "body": { "json": { "type": "Order" } },
                        "responses": [
                            { "status": "ok", "body": { "json": "Order" } },
                            { "status": "not_found" }
                        ]
                    },
                    {
                        "name": "upload",
                        "endpoint": { "method": "POST", "url": "/upload" },
                        "body": { "form_data": { "params": [{ "name": "name", "type": "string" }] } },
                        "responses": [{ "status": "no_content" }]
                    }
                ]
            }],
            "models": [{ "name": "Order", "kind": { "object": { "fields": [] } } }]
        }))
        .unwrap()
    }

    #[test]
    fn test_parameter_order_and_multi_return() {
        let version = version();
        let errors = HttpErrors::default();
        let resolver = Resolver::for_version(&version, &errors);
        let operation = &version.apis[0].operations[0];
        let sig = Signature::build(operation, &resolver, &RustNaming, &Location::root()).unwrap();

        let params = sig.service_params(&RustNaming, TypePaths::API);
        assert_eq!(
            Signature::render_params(&params),
            "body: models::Order, dry_run: bool, x_trace: Option<String>, id: i64"
        );
        assert_eq!(sig.return_type(&RustNaming, TypePaths::API), "UpdateOrderResponse");

        let names: Vec<_> = sig.returns.variants().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Ok", "NotFound"]);
        assert_eq!(sig.returns.variants()[1].code, 404);
        assert_eq!(sig.returns.variants()[1].payload, Payload::Empty);
    }

    #[test]
    fn test_client_borrows_body() {
        let version = version();
        let errors = HttpErrors::default();
        let resolver = Resolver::for_version(&version, &errors);
        let operation = &version.apis[0].operations[0];
        let sig = Signature::build(operation, &resolver, &RustNaming, &Location::root()).unwrap();

        let params = sig.client_params(&RustNaming, TypePaths::API);
        assert_eq!(params[0], ("body".to_string(), "&models::Order".to_string()));
    }

    #[test]
    fn test_form_body_and_single_empty_return() {
        let version = version();
        let errors = HttpErrors::default();
        let resolver = Resolver::for_version(&version, &errors);
        let operation = &version.apis[0].operations[1];
        let sig = Signature::build(operation, &resolver, &RustNaming, &Location::root()).unwrap();

        match &sig.body {
            BodyShape::Form {
                struct_name,
                fields,
                multipart,
            } => {
                assert_eq!(struct_name, "UploadForm");
                assert_eq!(fields.len(), 1);
                assert!(*multipart);
            }
            other => panic!("unexpected body {other:?}"),
        }
        assert_eq!(sig.return_type(&RustNaming, TypePaths::API), "()");
        assert!(matches!(sig.returns, Returns::Single(_)));
    }
}
