//! Output types of a generation run.
//!
//! A run produces an ordered [`GeneratedCode`] set. Nothing is written by the
//! generator itself; a [`Sink`](crate::Sink) decides what happens to each file
//! based on its [`FileKind`].

use serde::{Deserialize, Serialize};

/// Header line carried by every generated artifact.
pub const GENERATED_HEADER: &str = "// Code generated by specgen. DO NOT EDIT.";

/// Ordered collection of artifacts produced by one run.
///
/// # Examples
///
/// ```
/// use specgen_codegen::{GeneratedCode, GeneratedFile};
///
/// let mut code = GeneratedCode::new();
/// code.add_file(GeneratedFile::generated("src/spec/mod.rs", "pub mod empty;\n"));
///
/// assert_eq!(code.file_count(), 1);
/// assert!(code.get("src/spec/mod.rs").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Artifacts in emission order
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates an empty set.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Appends an artifact.
    #[inline]
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Appends every artifact of `other`, keeping its order.
    pub fn merge(&mut self, other: Self) {
        self.files.extend(other.files);
    }

    /// Returns the number of artifacts.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns an iterator over the artifacts in emission order.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Finds an artifact by path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }
}

/// How a sink treats an artifact already present on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Always overwritten
    Generated,
    /// Written only when absent
    Scaffolded,
}

/// A single artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the sink root, `/`-separated
    pub path: String,
    /// File content
    pub content: String,
    /// Overwrite policy
    pub kind: FileKind,
}

impl GeneratedFile {
    /// Creates an artifact that is regenerated on every run.
    #[must_use]
    pub fn generated(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind: FileKind::Generated,
        }
    }

    /// Creates an artifact that is written once and then owned by the user.
    #[must_use]
    pub fn scaffolded(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind: FileKind::Scaffolded,
        }
    }

    /// Returns the file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the file content.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` for artifacts written only when absent.
    #[inline]
    #[must_use]
    pub fn is_scaffold(&self) -> bool {
        self.kind == FileKind::Scaffolded
    }
}
