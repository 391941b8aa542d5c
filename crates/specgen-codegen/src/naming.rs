//! Identifier casing for the generated code.
//!
//! The IR carries source names as written by the spec author. Every emitter
//! turns them into Rust identifiers through a [`NamingPolicy`], so casing
//! rules live in one place.
//!
//! # Examples
//!
//! ```
//! use specgen_codegen::naming::{NamingPolicy, RustNaming};
//!
//! let naming = RustNaming;
//! assert_eq!(naming.type_name("order_item"), "OrderItem");
//! assert_eq!(naming.field_name("createdAt"), "created_at");
//! assert_eq!(naming.field_name("type"), "r#type");
//! assert_eq!(naming.module_name(""), "root");
//! ```

use convert_case::{Boundary, Case, Casing};
use std::fmt;

/// Maps source names to target identifiers.
pub trait NamingPolicy: fmt::Debug + Send + Sync {
    /// Name of a struct, enum or trait.
    fn type_name(&self, name: &str) -> String;

    /// Name of an enum variant.
    fn variant_name(&self, name: &str) -> String;

    /// Name of a struct field, local variable or parameter.
    fn field_name(&self, name: &str) -> String;

    /// Name of a function or method.
    fn fn_name(&self, name: &str) -> String;

    /// Name of a module; the unnamed version maps to `root`.
    fn module_name(&self, name: &str) -> String;
}

/// Word boundaries of source names. Digits never start a new word, so `v2`
/// stays `v2` instead of becoming `v_2`.
const BOUNDARIES: [Boundary; 4] = [
    Boundary::Underscore,
    Boundary::Hyphen,
    Boundary::Space,
    Boundary::LowerUpper,
];

/// Rust casing: PascalCase types and variants, snake_case everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustNaming;

impl RustNaming {
    fn convert(name: &str, case: Case) -> String {
        let cleaned: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let cased = cleaned.with_boundaries(&BOUNDARIES).to_case(case);
        identifier(cased)
    }
}

impl NamingPolicy for RustNaming {
    fn type_name(&self, name: &str) -> String {
        Self::convert(name, Case::Pascal)
    }

    fn variant_name(&self, name: &str) -> String {
        Self::convert(name, Case::Pascal)
    }

    fn field_name(&self, name: &str) -> String {
        Self::convert(name, Case::Snake)
    }

    fn fn_name(&self, name: &str) -> String {
        Self::convert(name, Case::Snake)
    }

    fn module_name(&self, name: &str) -> String {
        if name.is_empty() {
            return "root".to_string();
        }
        Self::convert(name, Case::Snake)
    }
}

/// Makes a cased word usable as an identifier.
fn identifier(candidate: String) -> String {
    if candidate.is_empty() {
        return "unnamed".to_string();
    }
    let candidate = if candidate.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{candidate}")
    } else {
        candidate
    };
    if matches!(candidate.as_str(), "self" | "Self" | "super" | "crate" | "_") {
        return format!("{candidate}_");
    }
    if syn::parse_str::<syn::Ident>(&candidate).is_ok() {
        candidate
    } else {
        format!("r#{candidate}")
    }
}

/// Strips the raw prefix of an identifier, giving the name serde sees.
#[must_use]
pub fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}
