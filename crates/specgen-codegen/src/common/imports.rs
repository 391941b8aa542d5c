//! Sorted, de-duplicated `use` declarations.

use crate::common::CodeWriter;
use std::collections::BTreeSet;

/// Set of import paths rendered in sorted order.
#[derive(Debug, Default)]
pub struct Imports {
    paths: BTreeSet<String>,
}

impl Imports {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path such as `std::sync::Arc`.
    pub fn add(&mut self, path: impl Into<String>) {
        self.paths.insert(path.into());
    }

    /// Adds a path when `condition` holds.
    pub fn add_if(&mut self, condition: bool, path: impl Into<String>) {
        if condition {
            self.add(path);
        }
    }

    /// Returns `true` when nothing was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Writes one `use` line per path followed by a blank line.
    pub fn write(&self, w: &mut CodeWriter) {
        if self.paths.is_empty() {
            return;
        }
        for path in &self.paths {
            w.line(format!("use {path};"));
        }
        w.blank();
    }

    /// Returns the paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_and_unique() {
        let mut imports = Imports::new();
        imports.add("std::sync::Arc");
        imports.add("axum::Router");
        imports.add("std::sync::Arc");
        imports.add_if(false, "uuid::Uuid");

        let mut w = CodeWriter::new();
        imports.write(&mut w);
        assert_eq!(w.finish(), "use axum::Router;\nuse std::sync::Arc;\n\n");
    }

    #[test]
    fn test_empty_writes_nothing() {
        let mut w = CodeWriter::new();
        Imports::new().write(&mut w);
        assert!(w.finish().is_empty());
    }
}
