//! Parse check of emitted Rust.

use crate::common::GeneratedCode;
use specgen_core::{Error, Result};

/// Parses every `.rs` artifact with `syn`.
///
/// # Errors
///
/// Returns [`Error::InvalidOutput`] for the first artifact that does not
/// parse. This is an internal error: valid IR always yields valid Rust.
pub fn check_syntax(code: &GeneratedCode) -> Result<()> {
    for file in code.files().filter(|file| file.path().ends_with(".rs")) {
        if let Err(e) = syn::parse_file(file.content()) {
            return Err(Error::InvalidOutput {
                path: file.path().to_string(),
                message: e.to_string(),
            });
        }
    }
    Ok(())
}
