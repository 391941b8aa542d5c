//! Usage Walker.
//!
//! A depth-first, pre-order traversal of the IR that invokes an optional
//! callback per node kind. Traversal order follows declaration order, and
//! every `TypeExpr` is visited recursively down to its `Plain` leaf.
//!
//! # Examples
//!
//! ```
//! use specgen_codegen::walker::Walker;
//! use specgen_core::{Model, ModelKind, Field, Name, TypeExpr};
//!
//! let model = Model {
//!     name: Name::new("order"),
//!     kind: ModelKind::Object {
//!         fields: vec![Field::new("tags", "string[]".parse().unwrap())],
//!     },
//!     description: None,
//! };
//!
//! let mut seen = Vec::new();
//! Walker::new()
//!     .on_type(|ty| seen.push(ty.to_string()))
//!     .walk_model(&model);
//!
//! assert_eq!(seen, ["string[]", "string"]);
//! ```

use specgen_core::{
    Api, HttpErrors, Model, ModelKind, Operation, OperationResponse, Param, ParamLocation,
    RequestBody, ResponseBody, Spec, TypeExpr, Version,
};
use std::fmt;

type Callback<'a, T> = Option<Box<dyn FnMut(&T) + 'a>>;

/// Callback-driven IR traversal.
#[derive(Default)]
pub struct Walker<'a> {
    on_version: Callback<'a, Version>,
    on_api: Callback<'a, Api>,
    on_operation: Callback<'a, Operation>,
    on_param: Option<Box<dyn FnMut(ParamLocation, &Param) + 'a>>,
    on_response: Option<Box<dyn FnMut(&Operation, &OperationResponse) + 'a>>,
    on_model: Callback<'a, Model>,
    on_type: Callback<'a, TypeExpr>,
}

impl fmt::Debug for Walker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("on_version", &self.on_version.is_some())
            .field("on_api", &self.on_api.is_some())
            .field("on_operation", &self.on_operation.is_some())
            .field("on_param", &self.on_param.is_some())
            .field("on_response", &self.on_response.is_some())
            .field("on_model", &self.on_model.is_some())
            .field("on_type", &self.on_type.is_some())
            .finish()
    }
}

impl<'a> Walker<'a> {
    /// Creates a walker without callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called for every version.
    #[must_use]
    pub fn on_version(mut self, callback: impl FnMut(&Version) + 'a) -> Self {
        self.on_version = Some(Box::new(callback));
        self
    }

    /// Called for every API.
    #[must_use]
    pub fn on_api(mut self, callback: impl FnMut(&Api) + 'a) -> Self {
        self.on_api = Some(Box::new(callback));
        self
    }

    /// Called for every operation.
    #[must_use]
    pub fn on_operation(mut self, callback: impl FnMut(&Operation) + 'a) -> Self {
        self.on_operation = Some(Box::new(callback));
        self
    }

    /// Called for every URL, query, header and form parameter.
    #[must_use]
    pub fn on_param(mut self, callback: impl FnMut(ParamLocation, &Param) + 'a) -> Self {
        self.on_param = Some(Box::new(callback));
        self
    }

    /// Called for every declared response, with its operation.
    #[must_use]
    pub fn on_response(
        mut self,
        callback: impl FnMut(&Operation, &OperationResponse) + 'a,
    ) -> Self {
        self.on_response = Some(Box::new(callback));
        self
    }

    /// Called for every model.
    #[must_use]
    pub fn on_model(mut self, callback: impl FnMut(&Model) + 'a) -> Self {
        self.on_model = Some(Box::new(callback));
        self
    }

    /// Called for every type expression and each of its children.
    #[must_use]
    pub fn on_type(mut self, callback: impl FnMut(&TypeExpr) + 'a) -> Self {
        self.on_type = Some(Box::new(callback));
        self
    }

    /// Walks every version, then the error taxonomy.
    pub fn walk_spec(&mut self, spec: &Spec) {
        for version in &spec.versions {
            self.walk_version(version);
        }
        self.walk_errors(&spec.http_errors);
    }

    /// Walks the APIs and then the models of a version.
    pub fn walk_version(&mut self, version: &Version) {
        if let Some(callback) = self.on_version.as_mut() {
            callback(version);
        }
        for api in &version.apis {
            self.walk_api(api);
        }
        self.walk_models(&version.models);
    }

    /// Walks the error response types and error models.
    pub fn walk_errors(&mut self, errors: &HttpErrors) {
        for response in &errors.all_responses() {
            self.walk_type(&response.ty);
        }
        self.walk_models(&errors.models);
    }

    /// Walks the operations of an API.
    pub fn walk_api(&mut self, api: &Api) {
        if let Some(callback) = self.on_api.as_mut() {
            callback(api);
        }
        for operation in &api.operations {
            self.walk_operation(operation);
        }
    }

    /// Walks parameters, body and responses of an operation.
    pub fn walk_operation(&mut self, operation: &Operation) {
        if let Some(callback) = self.on_operation.as_mut() {
            callback(operation);
        }
        for (location, param) in operation.params() {
            if let Some(callback) = self.on_param.as_mut() {
                callback(location, param);
            }
            self.walk_type(&param.ty);
        }
        if let RequestBody::Json { ty, .. } = &operation.body {
            self.walk_type(ty);
        }
        for response in &operation.responses {
            if let Some(callback) = self.on_response.as_mut() {
                callback(operation, response);
            }
            if let ResponseBody::Json(ty) = &response.body {
                self.walk_type(ty);
            }
        }
    }

    /// Walks a list of models.
    pub fn walk_models(&mut self, models: &[Model]) {
        for model in models {
            self.walk_model(model);
        }
    }

    /// Walks the field and item types of a model.
    pub fn walk_model(&mut self, model: &Model) {
        if let Some(callback) = self.on_model.as_mut() {
            callback(model);
        }
        match &model.kind {
            ModelKind::Object { fields } | ModelKind::OneOf { items: fields, .. } => {
                for field in fields {
                    self.walk_type(&field.ty);
                }
            }
            ModelKind::Enum { .. } => {}
        }
    }

    /// Walks a type expression down to its leaf.
    pub fn walk_type(&mut self, ty: &TypeExpr) {
        if let Some(callback) = self.on_type.as_mut() {
            callback(ty);
        }
        match ty {
            TypeExpr::Plain(_) => {}
            TypeExpr::Nullable(inner) | TypeExpr::Array(inner) | TypeExpr::Map(inner) => {
                self.walk_type(inner);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> Api {
        serde_json::from_value(serde_json::json!({
            "name": "orders",
            "operations": [
                {
                    "name": "create",
                    "endpoint": {
                        "method": "POST",
                        "url": "/orders/{id}",
                        "url_params": [{ "name": "id", "type": "int64" }]
                    },
                    "query_params": [{ "name": "tags", "type": "string[]" }],
                    "body": { "json": { "type": "Order" } },
                    "responses": [
                        { "status": "ok", "body": { "json": "Order" } },
                        { "status": "not_found" }
                    ]
                },
                {
                    "name": "ping",
                    "endpoint": { "method": "GET", "url": "/ping" },
                    "responses": [{ "status": "ok", "body": "raw_string" }]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_declaration_order() {
        let api = api();
        let mut events = Vec::new();
        {
            let events = std::cell::RefCell::new(&mut events);
            Walker::new()
                .on_operation(|op| events.borrow_mut().push(format!("op:{}", op.name)))
                .on_param(|location, param| {
                    events
                        .borrow_mut()
                        .push(format!("param:{location:?}:{}", param.name));
                })
                .on_response(|op, response| {
                    events
                        .borrow_mut()
                        .push(format!("response:{}:{}", op.name, response.status));
                })
                .walk_api(&api);
        }
        assert_eq!(
            events,
            [
                "op:create",
                "param:Query:tags",
                "param:Url:id",
                "response:create:ok",
                "response:create:not_found",
                "op:ping",
                "response:ping:ok",
            ]
        );
    }

    #[test]
    fn test_types_visited_recursively() {
        let api = api();
        let mut types = Vec::new();
        Walker::new()
            .on_type(|ty| types.push(ty.to_string()))
            .walk_api(&api);
        assert_eq!(types, ["string[]", "string", "int64", "Order", "Order"]);
    }

    #[test]
    fn test_errors_visit_standard_responses() {
        let mut types = Vec::new();
        Walker::new()
            .on_type(|ty| types.push(ty.to_string()))
            .walk_errors(&HttpErrors::default());
        assert_eq!(types, ["BadRequestError", "NotFoundError", "InternalServerError"]);
    }

    #[test]
    fn test_debug_lists_callbacks() {
        let walker = Walker::new().on_model(|_| {});
        let debug = format!("{walker:?}");
        assert!(debug.contains("on_model: true"));
        assert!(debug.contains("on_type: false"));
    }
}
