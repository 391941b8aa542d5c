//! Building blocks shared by every emitter.

pub mod imports;
pub mod types;
pub mod writer;

pub use imports::Imports;
pub use types::{FileKind, GENERATED_HEADER, GeneratedCode, GeneratedFile};
pub use writer::CodeWriter;
