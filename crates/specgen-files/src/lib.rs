//! Filesystem sink for generated code.
//!
//! Writes the artifacts of a [`GeneratedCode`](specgen_codegen::GeneratedCode)
//! set below a root directory, honoring the overwrite policy of each
//! [`FileKind`](specgen_codegen::FileKind).
//!
//! # Examples
//!
//! ```
//! use specgen_codegen::{CodeGenerator, Sink};
//! use specgen_core::{GeneratorConfig, Spec};
//! use specgen_files::FileSystemSink;
//! # use tempfile::TempDir;
//!
//! # let temp_dir = TempDir::new().unwrap();
//! let spec: Spec = serde_json::from_value(serde_json::json!({
//!     "name": "shop",
//!     "versions": [{
//!         "name": "v1",
//!         "models": [{ "name": "Order", "kind": { "object": { "fields": [] } } }]
//!     }]
//! }))
//! .unwrap();
//!
//! let code = CodeGenerator::new(GeneratorConfig::default())
//!     .unwrap()
//!     .generate_models(&spec)
//!     .unwrap();
//! let report = FileSystemSink::new(temp_dir.path()).accept(&code).unwrap();
//!
//! assert_eq!(report.written.len(), code.file_count());
//! assert!(temp_dir.path().join("src/spec/v1/models.rs").exists());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod error;
pub mod filesystem;

pub use error::{FilesError, Result};
pub use filesystem::{ExportOptions, FileSystemSink, WriteReport};
