//! Named model definitions.

use crate::ir::{Name, TypeExpr};
use serde::{Deserialize, Serialize};

/// A named model: object, one-of or enum.
///
/// # Examples
///
/// ```
/// use specgen_core::{Model, ModelKind};
///
/// let model: Model = serde_json::from_value(serde_json::json!({
///     "name": "color",
///     "kind": { "enum": { "values": [{ "value": "red" }, { "value": "green" }] } }
/// }))
/// .unwrap();
///
/// assert!(model.is_enum());
/// assert!(matches!(model.kind, ModelKind::Enum { ref values } if values.len() == 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Model name
    pub name: Name,
    /// Shape of the model
    pub kind: ModelKind,
    /// Optional documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Model {
    /// Returns `true` for enum models.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, ModelKind::Enum { .. })
    }

    /// Returns `true` for object models.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self.kind, ModelKind::Object { .. })
    }
}

/// The three model shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Record with ordered fields.
    Object {
        /// Fields in declaration order
        fields: Vec<Field>,
    },
    /// Exactly one of several alternatives.
    OneOf {
        /// Alternatives in declaration order
        items: Vec<Field>,
        /// Tag field name for internally tagged encoding
        #[serde(default, skip_serializing_if = "Option::is_none")]
        discriminator: Option<String>,
    },
    /// Closed set of string literals.
    Enum {
        /// Values in declaration order
        values: Vec<EnumValue>,
    },
}

/// Object field or one-of alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Wire name
    pub name: Name,
    /// Field type
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// Optional documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Field {
    /// Creates an undocumented field.
    #[must_use]
    pub fn new(name: impl Into<Name>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            description: None,
        }
    }
}

/// Enum literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Wire value
    pub value: String,
    /// Optional documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
