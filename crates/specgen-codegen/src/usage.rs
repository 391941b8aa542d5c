//! Usage queries built on the [`Walker`].
//!
//! Emitters use these to decide which imports and helper files a scope needs.
//! Each query is one traversal of its scope.

use crate::resolver::contains_primitive;
use crate::walker::Walker;
use specgen_core::{
    Api, BodyKind, HttpErrors, Model, ParamLocation, Primitive, STANDARD_ERROR_MODELS, Spec,
    TypeExpr, Version,
};

fn api_any_type(api: &Api, mut predicate: impl FnMut(&TypeExpr) -> bool) -> bool {
    let mut found = false;
    Walker::new()
        .on_type(|ty| found |= predicate(ty))
        .walk_api(api);
    found
}

fn models_any_type(models: &[Model], mut predicate: impl FnMut(&TypeExpr) -> bool) -> bool {
    let mut found = false;
    Walker::new()
        .on_type(|ty| found |= predicate(ty))
        .walk_models(models);
    found
}

fn plain_name(ty: &TypeExpr) -> Option<&str> {
    match ty {
        TypeExpr::Plain(name) => Some(name),
        TypeExpr::Nullable(_) | TypeExpr::Array(_) | TypeExpr::Map(_) => None,
    }
}

/// Returns `true` when the API references a model of its version.
#[must_use]
pub fn api_uses_models(api: &Api, version: &Version) -> bool {
    api_any_type(api, |ty| plain_name(ty).is_some_and(|n| version.model(n).is_some()))
}

/// Returns `true` when the API references an API-specific error model.
#[must_use]
pub fn api_uses_error_models(api: &Api, errors: &HttpErrors) -> bool {
    api_any_type(api, |ty| plain_name(ty).is_some_and(|n| errors.model(n).is_some()))
}

/// Returns `true` when the API references a standard error model.
#[must_use]
pub fn api_uses_standard_errors(api: &Api) -> bool {
    api_any_type(api, |ty| {
        plain_name(ty).is_some_and(|n| STANDARD_ERROR_MODELS.contains(&n))
    })
}

/// Returns `true` when the API uses the primitive anywhere.
#[must_use]
pub fn api_has_type(api: &Api, primitive: Primitive) -> bool {
    api_any_type(api, |ty| contains_primitive(ty, primitive))
}

/// Returns `true` when the API uses a map type.
#[must_use]
pub fn api_has_map(api: &Api) -> bool {
    api_any_type(api, |ty| matches!(ty, TypeExpr::Map(_)))
}

/// Returns `true` when any model uses the primitive.
#[must_use]
pub fn models_have_type(models: &[Model], primitive: Primitive) -> bool {
    models_any_type(models, |ty| contains_primitive(ty, primitive))
}

/// Returns `true` when any model uses a map type.
#[must_use]
pub fn models_have_map(models: &[Model]) -> bool {
    models_any_type(models, |ty| matches!(ty, TypeExpr::Map(_)))
}

fn errors_any_type(errors: &HttpErrors, mut predicate: impl FnMut(&TypeExpr) -> bool) -> bool {
    let mut found = false;
    Walker::new()
        .on_type(|ty| found |= predicate(ty))
        .walk_errors(errors);
    found
}

/// Returns `true` when an error response or error model uses the primitive.
#[must_use]
pub fn errors_have_type(errors: &HttpErrors, primitive: Primitive) -> bool {
    errors_any_type(errors, |ty| contains_primitive(ty, primitive))
}

/// Returns `true` when an error response or error model uses a map type.
#[must_use]
pub fn errors_have_map(errors: &HttpErrors) -> bool {
    errors_any_type(errors, |ty| matches!(ty, TypeExpr::Map(_)))
}

/// Returns `true` when any model references a model accepted by `known`.
#[must_use]
pub fn models_reference(models: &[Model], mut known: impl FnMut(&str) -> bool) -> bool {
    models_any_type(models, |ty| plain_name(ty).is_some_and(&mut known))
}

/// Returns `true` when the API has parameters at `location`.
#[must_use]
pub fn api_has_params(api: &Api, location: ParamLocation) -> bool {
    let mut found = false;
    Walker::new()
        .on_param(|at, _| found |= at == location)
        .walk_api(api);
    found
}

/// Returns `true` when an operation of the API has a body of `kind`.
#[must_use]
pub fn api_has_body_of_kind(api: &Api, kind: BodyKind) -> bool {
    let mut found = false;
    Walker::new()
        .on_operation(|op| found |= op.body.kind() == kind)
        .walk_api(api);
    found
}

/// Returns `true` when any operation of the spec has a body of `kind`.
#[must_use]
pub fn spec_has_body_of_kind(spec: &Spec, kind: BodyKind) -> bool {
    let mut found = false;
    Walker::new()
        .on_operation(|op| found |= op.body.kind() == kind)
        .walk_spec(spec);
    found
}

/// Returns `true` when an operation of the API declares several responses.
#[must_use]
pub fn api_has_multi_responses(api: &Api) -> bool {
    let mut found = false;
    Walker::new()
        .on_operation(|op| found |= op.has_multiple_responses())
        .walk_api(api);
    found
}

/// Returns `true` when a multi-response operation of the API declares an
/// empty response.
#[must_use]
pub fn api_has_multi_responses_with_empty_body(api: &Api) -> bool {
    let mut found = false;
    Walker::new()
        .on_response(|op, response| {
            found |= op.has_multiple_responses() && response.body.kind() == BodyKind::Empty;
        })
        .walk_api(api);
    found
}

/// Returns `true` when the API has a body or any non-URL parameter, which
/// means its handlers read request headers.
#[must_use]
pub fn api_reads_headers(api: &Api) -> bool {
    api_has_params(api, ParamLocation::Header)
        || api.operations.iter().any(|op| op.body.kind() != BodyKind::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use specgen_core::Name;

    fn version() -> Version {
        serde_json::from_value(serde_json::json!({
            "name": "v1",
            "apis": [{
                "name": "orders",
                "operations": [
                    {
                        "name": "create",
                        "endpoint": { "method": "POST", "url": "/orders" },
                        "header_params": [{ "name": "X-Day", "type": "date" }],
                        "body": { "form_url_encoded": { "params": [{ "name": "n", "type": "int" }] } },
                        "responses": [
                            { "status": "created", "body": { "json": "Order" } },
                            { "status": "conflict" }
                        ]
                    },
                    {
                        "name": "audit",
                        "endpoint": { "method": "GET", "url": "/audit" },
                        "responses": [{ "status": "ok", "body": { "json": "ForbiddenError{}" } }]
                    }
                ]
            }],
            "models": [{
                "name": "Order",
                "kind": { "object": { "fields": [{ "name": "at", "type": "datetime?" }] } }
            }]
        }))
        .unwrap()
    }

    fn errors() -> HttpErrors {
        serde_json::from_value(serde_json::json!({
            "responses": [{ "status": "forbidden", "type": "ForbiddenError" }],
            "models": [{ "name": "ForbiddenError", "kind": { "object": { "fields": [] } } }]
        }))
        .unwrap()
    }

    #[test]
    fn test_model_usage() {
        let version = version();
        let api = &version.apis[0];
        assert!(api_uses_models(api, &version));
        assert!(api_uses_error_models(api, &errors()));
        assert!(!api_uses_standard_errors(api));
        assert!(api_has_map(api));
        assert!(!models_have_map(&version.models));
    }

    #[test]
    fn test_primitive_usage() {
        let version = version();
        let api = &version.apis[0];
        assert!(api_has_type(api, Primitive::Date));
        assert!(api_has_type(api, Primitive::Int32));
        assert!(!api_has_type(api, Primitive::DateTime));
        assert!(models_have_type(&version.models, Primitive::DateTime));
    }

    #[test]
    fn test_params_and_bodies() {
        let version = version();
        let api = &version.apis[0];
        assert!(api_has_params(api, ParamLocation::Header));
        assert!(api_has_params(api, ParamLocation::Form));
        assert!(!api_has_params(api, ParamLocation::Url));
        assert!(api_has_body_of_kind(api, BodyKind::FormUrlEncoded));
        assert!(!api_has_body_of_kind(api, BodyKind::Json));
        assert!(api_reads_headers(api));
    }

    #[test]
    fn test_multi_responses() {
        let version = version();
        let api = &version.apis[0];
        assert!(api_has_multi_responses(api));
        assert!(api_has_multi_responses_with_empty_body(api));

        let single = Api {
            name: Name::new("single"),
            operations: vec![api.operations[1].clone()],
        };
        assert!(!api_has_multi_responses(&single));
    }

    #[test]
    fn test_error_usage() {
        let errors = errors();
        assert!(!errors_have_type(&errors, Primitive::Uuid));
        assert!(!errors_have_map(&errors));

        let with_uuid: HttpErrors = serde_json::from_value(serde_json::json!({
            "responses": [{ "status": "conflict", "type": "uuid" }]
        }))
        .unwrap();
        assert!(errors_have_type(&with_uuid, Primitive::Uuid));
    }

    #[test]
    fn test_models_reference() {
        let version = version();
        assert!(!models_reference(&version.models, |n| n == "ForbiddenError"));
    }
}
