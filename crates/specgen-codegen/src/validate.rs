//! Validation pass.
//!
//! Runs once before any emission. Emitters may assume that every invariant
//! checked here holds; the first violation aborts the run with the IR
//! location of the offending node.

use crate::marshal::ParamShape;
use crate::naming::{NamingPolicy, unraw};
use crate::resolver::{ModelGraph, ModelOrigin, Resolver, TargetType};
use crate::signature::{BODY_IDENT, RESERVED_IDENTS};
use specgen_core::{
    Error, HttpErrors, Location, Model, ModelKind, Operation, Param, ParamLocation, Primitive,
    RequestBody, ResponseBody, Result, STANDARD_ERRORS, Spec, TypeExpr, Version,
};
use std::collections::BTreeMap;

/// Checks the whole spec.
///
/// # Errors
///
/// Returns the first violation found, in declaration order.
pub fn validate(spec: &Spec, naming: &dyn NamingPolicy) -> Result<()> {
    validate_errors(&spec.http_errors)?;
    let root = Location::root();
    for version in &spec.versions {
        validate_version(version, &spec.http_errors, &root.child(version.name.as_str()), naming)?;
    }
    Ok(())
}

fn validate_errors(errors: &HttpErrors) -> Result<()> {
    let at = Location::root().child("http_errors");
    let resolver = Resolver::for_errors(errors);
    let mut seen: Vec<&str> = STANDARD_ERRORS.iter().map(|(status, _)| *status).collect();
    for response in &errors.responses {
        let location = at.child("responses").child(response.status.as_str());
        if response.status.code().is_none() {
            return Err(Error::UnknownStatus {
                status: response.status.to_string(),
                location,
            });
        }
        if seen.contains(&response.status.as_str()) {
            return Err(Error::DuplicateResponse {
                status: response.status.to_string(),
                location: at.clone(),
            });
        }
        seen.push(response.status.as_str());
        resolver.resolve(&response.ty, &location)?;
    }
    validate_models(&errors.models, &resolver, &at.child("models"))
}

fn validate_version(
    version: &Version,
    errors: &HttpErrors,
    at: &Location,
    naming: &dyn NamingPolicy,
) -> Result<()> {
    let resolver = Resolver::for_version(version, errors);
    validate_models(&version.models, &resolver, &at.child("models"))?;
    for api in &version.apis {
        let api_at = at.child(api.name.as_str());
        for operation in &api.operations {
            validate_operation(operation, &resolver, &api_at.child(operation.name.as_str()), naming)?;
        }
    }
    Ok(())
}

fn validate_models(models: &[Model], resolver: &Resolver<'_>, at: &Location) -> Result<()> {
    for model in models {
        let model_at = at.child(model.name.as_str());
        match &model.kind {
            ModelKind::Object { fields } => {
                for field in fields {
                    resolver.resolve(&field.ty, &model_at.child(field.name.as_str()))?;
                }
            }
            ModelKind::OneOf {
                items,
                discriminator,
            } => {
                if items.is_empty() {
                    return Err(Error::InvalidOneOf {
                        model: model.name.to_string(),
                        reason: "no items declared".to_string(),
                        location: model_at,
                    });
                }
                for item in items {
                    let target = resolver.resolve(&item.ty, &model_at.child(item.name.as_str()))?;
                    if discriminator.is_some() && !is_object_reference(&target, resolver) {
                        return Err(Error::InvalidOneOf {
                            model: model.name.to_string(),
                            reason: format!(
                                "item '{}' of type '{}' is not an object model",
                                item.name, item.ty
                            ),
                            location: model_at.child(item.name.as_str()),
                        });
                    }
                }
            }
            ModelKind::Enum { values } => {
                if values.is_empty() {
                    return Err(Error::EmptyEnum {
                        model: model.name.to_string(),
                        location: model_at,
                    });
                }
            }
        }
    }

    if let Some(model) = ModelGraph::new(models).plain_cycle() {
        return Err(Error::SelfReference {
            model: model.to_string(),
            location: at.child(model),
        });
    }
    Ok(())
}

fn is_object_reference(target: &TargetType, resolver: &Resolver<'_>) -> bool {
    let TargetType::Model { name, origin, .. } = target else {
        return false;
    };
    *origin != ModelOrigin::Standard
        && resolver
            .lookup(name)
            .and_then(|(_, model)| model)
            .is_some_and(Model::is_object)
}

fn validate_operation(
    operation: &Operation,
    resolver: &Resolver<'_>,
    at: &Location,
    naming: &dyn NamingPolicy,
) -> Result<()> {
    validate_url(operation, at)?;

    for (location, param) in operation.params() {
        validate_param(param, resolver, &param_location(at, location, param))?;
    }
    validate_param_names(operation, naming, at)?;

    if let RequestBody::Json { ty, .. } = &operation.body {
        resolver.resolve(ty, &at.child("body"))?;
    }

    if operation.responses.is_empty() {
        return Err(Error::EmptyResponses {
            location: at.clone(),
        });
    }

    let mut variants: BTreeMap<String, &str> = BTreeMap::new();
    for response in &operation.responses {
        let response_at = at.child("responses").child(response.status.as_str());
        if response.status.code().is_none() {
            return Err(Error::UnknownStatus {
                status: response.status.to_string(),
                location: response_at,
            });
        }
        let variant = naming.variant_name(response.status.as_str());
        if let Some(first) = variants.get(&variant) {
            if *first == response.status.as_str() {
                return Err(Error::DuplicateResponse {
                    status: response.status.to_string(),
                    location: at.clone(),
                });
            }
            return Err(Error::AmbiguousResponse {
                first: (*first).to_string(),
                second: response.status.to_string(),
                variant,
                location: at.clone(),
            });
        }
        variants.insert(variant, response.status.as_str());
        if let ResponseBody::Json(ty) = &response.body {
            resolver.resolve(ty, &response_at)?;
        }
    }
    Ok(())
}

fn validate_url(operation: &Operation, at: &Location) -> Result<()> {
    let endpoint = &operation.endpoint;
    let placeholders = endpoint.placeholders();
    let mismatch = |param: &str| Error::UrlParamMismatch {
        param: param.to_string(),
        url: endpoint.url.clone(),
        location: at.clone(),
    };
    for param in &endpoint.url_params {
        if !placeholders.contains(&param.name.as_str()) {
            return Err(mismatch(param.name.as_str()));
        }
    }
    for placeholder in placeholders {
        if !endpoint
            .url_params
            .iter()
            .any(|p| p.name.as_str() == placeholder)
        {
            return Err(mismatch(placeholder));
        }
    }
    Ok(())
}

fn param_location(at: &Location, location: ParamLocation, param: &Param) -> Location {
    at.child(format!("{location:?}").to_lowercase())
        .child(param.name.as_str())
}

/// Parameters of one operation share the namespace of the emitted method
/// with each other, with the body and with the generated locals. Form fields
/// live in their own struct but are decoded next to the same locals.
fn validate_param_names(operation: &Operation, naming: &dyn NamingPolicy, at: &Location) -> Result<()> {
    let mut params: BTreeMap<String, &str> = BTreeMap::new();
    let mut fields: BTreeMap<String, &str> = BTreeMap::new();
    if !matches!(operation.body, RequestBody::Empty) {
        params.insert(BODY_IDENT.to_string(), BODY_IDENT);
    }

    for (location, param) in operation.params() {
        let ident = naming.field_name(param.name.as_str());
        if RESERVED_IDENTS.contains(&unraw(&ident)) {
            return Err(Error::ReservedParamName {
                param: param.name.to_string(),
                ident,
                location: param_location(at, location, param),
            });
        }
        let seen = if location == ParamLocation::Form {
            &mut fields
        } else {
            &mut params
        };
        if let Some(first) = seen.get(&ident) {
            return Err(Error::DuplicateParamName {
                first: (*first).to_string(),
                second: param.name.to_string(),
                ident,
                location: at.clone(),
            });
        }
        seen.insert(ident, param.name.as_str());
    }
    Ok(())
}

fn validate_param(param: &Param, resolver: &Resolver<'_>, at: &Location) -> Result<()> {
    let unsupported = || Error::UnsupportedParamType {
        ty: param.ty.to_string(),
        location: at.clone(),
    };
    let Some(shape) = ParamShape::of(&param.ty) else {
        return Err(unsupported());
    };
    if shape == ParamShape::Array && param.default.is_some() {
        return Err(unsupported());
    }
    let leaf = TypeExpr::plain(param.ty.leaf());
    match resolver.resolve(&leaf, at)? {
        TargetType::Primitive(Primitive::Json | Primitive::Empty) => Err(unsupported()),
        TargetType::Primitive(_) => Ok(()),
        target if target.is_enum() => Ok(()),
        _ => Err(unsupported()),
    }
}
