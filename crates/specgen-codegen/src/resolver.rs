//! Type Resolver.
//!
//! Maps every [`TypeExpr`] to a [`TargetType`] and renders it as Rust source.
//! Resolution is a total function over the closed set of type constructors;
//! a `Plain` name that is neither a primitive nor a registered model is an
//! [`Error::UnresolvedType`].
//!
//! # Examples
//!
//! ```
//! use specgen_codegen::naming::RustNaming;
//! use specgen_codegen::resolver::{Resolver, TypePaths};
//! use specgen_core::{HttpErrors, Location, TypeExpr};
//!
//! let errors = HttpErrors::default();
//! let resolver = Resolver::for_errors(&errors);
//! let ty = "int64[]?".parse::<TypeExpr>().unwrap();
//!
//! let target = resolver.resolve(&ty, &Location::root()).unwrap();
//! assert_eq!(target.render(&RustNaming, TypePaths::API), "Option<Vec<i64>>");
//! ```

use crate::naming::NamingPolicy;
use specgen_core::{
    Error, Field, HttpErrors, Location, Model, ModelKind, Primitive, Result, STANDARD_ERROR_MODELS,
    TypeExpr, Version,
};
use std::collections::BTreeMap;

/// Where a referenced model is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelOrigin {
    /// Models of the current version
    Version,
    /// API-specific error models
    Error,
    /// Error models shipped with the shared helpers
    Standard,
}

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    /// Built-in primitive
    Primitive(Primitive),
    /// Reference to a named model
    Model {
        /// Source name of the model
        name: String,
        /// Declaring scope
        origin: ModelOrigin,
        /// `true` for enum models
        is_enum: bool,
    },
    /// Type synthesized by the generator, rendered verbatim
    Local(String),
    /// `Option<T>`
    Option(Box<TargetType>),
    /// `Vec<T>`
    Vec(Box<TargetType>),
    /// `BTreeMap<String, T>`
    Map(Box<TargetType>),
}

/// Module prefixes used when rendering model references from one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePaths {
    /// Prefix of version models
    pub models: &'static str,
    /// Prefix of API-specific error models
    pub errors: &'static str,
}

impl TypePaths {
    /// Files of an API, importing `models` and `errors`
    pub const API: Self = Self {
        models: "models::",
        errors: "errors::",
    };

    /// The `models.rs` file of a version
    pub const MODELS: Self = Self {
        models: "",
        errors: "errors::",
    };

    /// The generated `errors.rs` file
    pub const ERRORS: Self = Self {
        models: "",
        errors: "",
    };
}

impl TargetType {
    /// Renders the type as Rust source.
    #[must_use]
    pub fn render(&self, naming: &dyn NamingPolicy, paths: TypePaths) -> String {
        match self {
            Self::Primitive(primitive) => primitive_type(*primitive).to_string(),
            Self::Model { name, origin, .. } => match origin {
                ModelOrigin::Version => format!("{}{}", paths.models, naming.type_name(name)),
                ModelOrigin::Error => format!("{}{}", paths.errors, naming.type_name(name)),
                ModelOrigin::Standard => format!("errmodels::{name}"),
            },
            Self::Local(name) => name.clone(),
            Self::Option(inner) => format!("Option<{}>", inner.render(naming, paths)),
            Self::Vec(inner) => format!("Vec<{}>", inner.render(naming, paths)),
            Self::Map(inner) => format!("BTreeMap<String, {}>", inner.render(naming, paths)),
        }
    }

    /// Returns the innermost non-container type.
    #[must_use]
    pub fn leaf(&self) -> &Self {
        match self {
            Self::Option(inner) | Self::Vec(inner) | Self::Map(inner) => inner.leaf(),
            Self::Primitive(_) | Self::Model { .. } | Self::Local(_) => self,
        }
    }

    /// Returns `true` for enum model references.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Model { is_enum: true, .. })
    }

    /// Returns `true` when the type is the given primitive.
    #[must_use]
    pub fn is_primitive(&self, primitive: Primitive) -> bool {
        matches!(self, Self::Primitive(p) if *p == primitive)
    }
}

/// Rust spelling of a primitive.
#[must_use]
pub const fn primitive_type(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "String",
        Primitive::Int32 => "i32",
        Primitive::Int64 => "i64",
        Primitive::Float => "f32",
        Primitive::Double => "f64",
        Primitive::Decimal => "Decimal",
        Primitive::Boolean => "bool",
        Primitive::Date => "NaiveDate",
        Primitive::DateTime => "NaiveDateTime",
        Primitive::Uuid => "Uuid",
        Primitive::Json => "serde_json::Value",
        Primitive::Empty => "Empty",
    }
}

/// Returns `true` when any alias of `primitive` occurs in `ty`.
#[must_use]
pub fn contains_primitive(ty: &TypeExpr, primitive: Primitive) -> bool {
    primitive
        .aliases()
        .iter()
        .any(|alias| ty.contains_primitive(alias))
}

/// Resolves type expressions against the model registry.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    version: Option<&'a Version>,
    errors: &'a HttpErrors,
}

impl<'a> Resolver<'a> {
    /// Scope of one version: its models, then the error models.
    #[must_use]
    pub const fn for_version(version: &'a Version, errors: &'a HttpErrors) -> Self {
        Self {
            version: Some(version),
            errors,
        }
    }

    /// Scope of the error taxonomy only.
    #[must_use]
    pub const fn for_errors(errors: &'a HttpErrors) -> Self {
        Self {
            version: None,
            errors,
        }
    }

    /// Finds a model by name, returning its origin and definition.
    ///
    /// Standard error models have no IR definition and return `None` as the
    /// second element.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<(ModelOrigin, Option<&'a Model>)> {
        if let Some(model) = self.version.and_then(|v| v.model(name)) {
            return Some((ModelOrigin::Version, Some(model)));
        }
        if let Some(model) = self.errors.model(name) {
            return Some((ModelOrigin::Error, Some(model)));
        }
        STANDARD_ERROR_MODELS
            .contains(&name)
            .then_some((ModelOrigin::Standard, None))
    }

    /// Resolves a type expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedType`] when a `Plain` name is unknown.
    pub fn resolve(&self, ty: &TypeExpr, location: &Location) -> Result<TargetType> {
        match ty {
            TypeExpr::Plain(name) => self.resolve_name(name, location),
            TypeExpr::Nullable(inner) => {
                Ok(TargetType::Option(Box::new(self.resolve(inner, location)?)))
            }
            TypeExpr::Array(inner) => Ok(TargetType::Vec(Box::new(self.resolve(inner, location)?))),
            TypeExpr::Map(inner) => Ok(TargetType::Map(Box::new(self.resolve(inner, location)?))),
        }
    }

    fn resolve_name(&self, name: &str, location: &Location) -> Result<TargetType> {
        if let Some(primitive) = Primitive::from_name(name) {
            return Ok(TargetType::Primitive(primitive));
        }
        match self.lookup(name) {
            Some((origin, model)) => Ok(TargetType::Model {
                name: name.to_string(),
                origin,
                is_enum: model.is_some_and(Model::is_enum),
            }),
            None => Err(Error::UnresolvedType {
                name: name.to_string(),
                location: location.clone(),
            }),
        }
    }
}

/// By-value references between the models of one scope.
///
/// An edge `a -> b` exists when `a` holds `b` without heap indirection: a
/// `Plain` field or one-of item, or a `Nullable(Plain)` field. Arrays and
/// maps already allocate and carry no edge.
#[derive(Debug, Default)]
pub struct ModelGraph<'a> {
    edges: BTreeMap<&'a str, Vec<Edge<'a>>>,
}

/// A by-value reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    /// Referenced model
    pub target: &'a str,
    /// Field or item carrying the reference
    pub field: &'a str,
    /// `true` when the reference is `Nullable(Plain)`
    pub nullable: bool,
}

impl<'a> ModelGraph<'a> {
    /// Builds the graph of `models`, ignoring references outside the set.
    #[must_use]
    pub fn new(models: &'a [Model]) -> Self {
        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        let mut edges = BTreeMap::new();
        for model in models {
            let fields: &[Field] = match &model.kind {
                ModelKind::Object { fields } | ModelKind::OneOf { items: fields, .. } => {
                    fields.as_slice()
                }
                ModelKind::Enum { .. } => &[],
            };
            let out: Vec<Edge<'a>> = fields
                .iter()
                .filter_map(|field| {
                    let (target, nullable) = match &field.ty {
                        TypeExpr::Plain(name) => (name.as_str(), false),
                        TypeExpr::Nullable(inner) => match inner.as_ref() {
                            TypeExpr::Plain(name) => (name.as_str(), true),
                            _ => return None,
                        },
                        TypeExpr::Array(_) | TypeExpr::Map(_) => return None,
                    };
                    names.contains(&target).then_some(Edge {
                        target,
                        field: field.name.as_str(),
                        nullable,
                    })
                })
                .collect();
            edges.insert(model.name.as_str(), out);
        }
        Self { edges }
    }

    /// Outgoing edges of a model.
    #[must_use]
    pub fn edges(&self, model: &str) -> &[Edge<'a>] {
        self.edges
            .get(model)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` when `to` is reachable from `from`, optionally only
    /// through non-nullable edges.
    #[must_use]
    pub fn reaches(&self, from: &str, to: &str, plain_only: bool) -> bool {
        let mut stack = vec![from];
        let mut seen: Vec<&str> = Vec::new();
        while let Some(current) = stack.pop() {
            if seen.contains(&current) {
                continue;
            }
            seen.push(current);
            for edge in self.edges(current) {
                if plain_only && edge.nullable {
                    continue;
                }
                if edge.target == to {
                    return true;
                }
                stack.push(edge.target);
            }
        }
        false
    }

    /// First model that reaches itself through non-nullable edges only.
    #[must_use]
    pub fn plain_cycle(&self) -> Option<&'a str> {
        self.edges
            .keys()
            .copied()
            .find(|model| self.reaches(model, model, true))
    }

    /// Returns `true` when the nullable field `field` of `model` closes a
    /// cycle and must be boxed.
    #[must_use]
    pub fn needs_box(&self, model: &str, field: &str) -> bool {
        self.edges(model)
            .iter()
            .filter(|edge| edge.nullable && edge.field == field)
            .any(|edge| edge.target == model || self.reaches(edge.target, model, false))
    }
}
