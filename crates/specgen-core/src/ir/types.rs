//! Type expressions and primitives.
//!
//! A [`TypeExpr`] is the recursive shape of every type in the IR. It has a
//! compact textual notation used in fixtures and diagnostics: `T?` is
//! nullable, `T[]` is an array, `T{}` is a string-keyed map. Suffixes apply
//! left to right.
//!
//! # Examples
//!
//! ```
//! use specgen_core::TypeExpr;
//!
//! let ty: TypeExpr = "uuid[]?".parse().unwrap();
//! assert_eq!(
//!     ty,
//!     TypeExpr::nullable(TypeExpr::array(TypeExpr::plain("uuid")))
//! );
//! assert!(ty.contains_primitive("uuid"));
//! assert_eq!(ty.to_string(), "uuid[]?");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Recursive type expression.
///
/// Composite variants always own exactly one child.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeExpr {
    /// Primitive or model/enum reference by name.
    Plain(String),
    /// Value that may be absent.
    Nullable(Box<TypeExpr>),
    /// Ordered list of values.
    Array(Box<TypeExpr>),
    /// String-keyed map of values.
    Map(Box<TypeExpr>),
}

impl TypeExpr {
    /// Creates a plain type reference.
    #[must_use]
    pub fn plain(name: impl Into<String>) -> Self {
        Self::Plain(name.into())
    }

    /// Wraps `child` as nullable.
    #[must_use]
    pub fn nullable(child: Self) -> Self {
        Self::Nullable(Box::new(child))
    }

    /// Wraps `child` as an array.
    #[must_use]
    pub fn array(child: Self) -> Self {
        Self::Array(Box::new(child))
    }

    /// Wraps `child` as a map value.
    #[must_use]
    pub fn map(child: Self) -> Self {
        Self::Map(Box::new(child))
    }

    /// Returns `true` if any `Plain` node in the tree is named `target`.
    #[must_use]
    pub fn contains_primitive(&self, target: &str) -> bool {
        match self {
            Self::Plain(name) => name == target,
            Self::Nullable(child) | Self::Array(child) | Self::Map(child) => {
                child.contains_primitive(target)
            }
        }
    }

    /// Returns the innermost plain name.
    #[must_use]
    pub fn leaf(&self) -> &str {
        match self {
            Self::Plain(name) => name,
            Self::Nullable(child) | Self::Array(child) | Self::Map(child) => child.leaf(),
        }
    }

    /// Returns `true` for `Plain("empty")`.
    #[must_use]
    pub fn is_empty_type(&self) -> bool {
        matches!(self, Self::Plain(name) if name == Primitive::Empty.name())
    }

    /// Returns `true` for `Plain("string")`.
    #[must_use]
    pub fn is_string_type(&self) -> bool {
        matches!(self, Self::Plain(name) if name == Primitive::String.name())
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(name) => f.write_str(name),
            Self::Nullable(child) => write!(f, "{child}?"),
            Self::Array(child) => write!(f, "{child}[]"),
            Self::Map(child) => write!(f, "{child}{{}}"),
        }
    }
}

/// Error returned for malformed type notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid type expression '{input}'")]
pub struct ParseTypeError {
    input: String,
}

impl FromStr for TypeExpr {
    type Err = ParseTypeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseTypeError {
            input: input.to_string(),
        };

        let split = input.find(['?', '[', '{']).unwrap_or(input.len());
        let (base, mut suffixes) = input.split_at(split);
        let valid_base = !base.is_empty()
            && base
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_base {
            return Err(invalid());
        }

        let mut expr = Self::plain(base);
        while !suffixes.is_empty() {
            if let Some(rest) = suffixes.strip_prefix('?') {
                expr = Self::nullable(expr);
                suffixes = rest;
            } else if let Some(rest) = suffixes.strip_prefix("[]") {
                expr = Self::array(expr);
                suffixes = rest;
            } else if let Some(rest) = suffixes.strip_prefix("{}") {
                expr = Self::map(expr);
                suffixes = rest;
            } else {
                return Err(invalid());
            }
        }
        Ok(expr)
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = ParseTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeExpr> for String {
    fn from(value: TypeExpr) -> Self {
        value.to_string()
    }
}

/// Built-in primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// UTF-8 text
    String,
    /// 32-bit signed integer (`int`, `int32`)
    Int32,
    /// 64-bit signed integer (`long`, `int64`)
    Int64,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Arbitrary precision decimal
    Decimal,
    /// Boolean (`bool`, `boolean`)
    Boolean,
    /// Calendar date
    Date,
    /// Date and time without offset
    DateTime,
    /// UUID
    Uuid,
    /// Arbitrary JSON value
    Json,
    /// No content
    Empty,
}

impl Primitive {
    /// All primitives, in a fixed order.
    pub const ALL: [Self; 12] = [
        Self::String,
        Self::Int32,
        Self::Int64,
        Self::Float,
        Self::Double,
        Self::Decimal,
        Self::Boolean,
        Self::Date,
        Self::DateTime,
        Self::Uuid,
        Self::Json,
        Self::Empty,
    ];

    /// Looks up a primitive by any of its accepted spellings.
    ///
    /// # Examples
    ///
    /// ```
    /// use specgen_core::Primitive;
    ///
    /// assert_eq!(Primitive::from_name("int64"), Some(Primitive::Int64));
    /// assert_eq!(Primitive::from_name("long"), Some(Primitive::Int64));
    /// assert_eq!(Primitive::from_name("Order"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "string" => Self::String,
            "int" | "int32" => Self::Int32,
            "long" | "int64" => Self::Int64,
            "float" => Self::Float,
            "double" => Self::Double,
            "decimal" => Self::Decimal,
            "bool" | "boolean" => Self::Boolean,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "uuid" => Self::Uuid,
            "json" => Self::Json,
            "empty" => Self::Empty,
            _ => return None,
        };
        Some(primitive)
    }

    /// Returns the canonical spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Uuid => "uuid",
            Self::Json => "json",
            Self::Empty => "empty",
        }
    }

    /// Returns every accepted spelling.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Int32 => &["int", "int32"],
            Self::Int64 => &["long", "int64"],
            Self::Boolean => &["bool", "boolean"],
            Self::String => &["string"],
            Self::Float => &["float"],
            Self::Double => &["double"],
            Self::Decimal => &["decimal"],
            Self::Date => &["date"],
            Self::DateTime => &["datetime"],
            Self::Uuid => &["uuid"],
            Self::Json => &["json"],
            Self::Empty => &["empty"],
        }
    }
}
