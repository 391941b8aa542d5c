//! Conversion of parameter failures into validation errors.

use super::errmodels::ValidationError;
use super::params::ParsingError;

impl From<ParsingError> for ValidationError {
    fn from(error: ParsingError) -> Self {
        Self {
            path: error.path,
            code: error.code,
            message: Some(error.message),
        }
    }
}

/// Converts every parsing failure of a parameter group.
#[must_use]
pub fn validation_errors(errors: Vec<ParsingError>) -> Vec<ValidationError> {
    errors.into_iter().map(ValidationError::from).collect()
}
