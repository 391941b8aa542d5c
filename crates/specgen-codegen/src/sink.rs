//! Destination of a generation run.
//!
//! The generator never writes anything itself. A [`Sink`] receives the whole
//! ordered set and applies the overwrite policy of each [`FileKind`]:
//! generated files replace what is there, scaffolds are only written when
//! absent.

use crate::common::{FileKind, GeneratedCode};
use std::collections::BTreeMap;
use std::convert::Infallible;

/// Consumer of generated artifacts.
pub trait Sink {
    /// Summary returned after a successful write
    type Report;

    /// Error raised while writing
    type Error;

    /// Writes `code`, honoring the kind of each artifact.
    ///
    /// # Errors
    ///
    /// Returns the sink-specific error of the first artifact that could not
    /// be written.
    fn accept(&mut self, code: &GeneratedCode) -> Result<Self::Report, Self::Error>;
}

/// In-memory sink keyed by path.
///
/// # Examples
///
/// ```
/// use specgen_codegen::{GeneratedCode, GeneratedFile, MemorySink, Sink};
///
/// let mut sink = MemorySink::new();
/// let mut code = GeneratedCode::new();
/// code.add_file(GeneratedFile::scaffolded("src/services/mod.rs", "pub mod v1;\n"));
/// sink.accept(&code).unwrap();
///
/// // A second run never replaces a scaffold
/// let mut again = GeneratedCode::new();
/// again.add_file(GeneratedFile::scaffolded("src/services/mod.rs", ""));
/// let written = sink.accept(&again).unwrap();
///
/// assert_eq!(written, 0);
/// assert_eq!(sink.get("src/services/mod.rs"), Some("pub mod v1;\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<String, String>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content stored at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Stores `content` at `path` as if a user had edited it.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Returns the stored paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl Sink for MemorySink {
    /// Number of files written
    type Report = usize;
    type Error = Infallible;

    fn accept(&mut self, code: &GeneratedCode) -> Result<usize, Infallible> {
        let mut written = 0;
        for file in code.files() {
            if file.kind == FileKind::Scaffolded && self.files.contains_key(file.path()) {
                continue;
            }
            self.files
                .insert(file.path().to_string(), file.content().to_string());
            written += 1;
        }
        Ok(written)
    }
}
