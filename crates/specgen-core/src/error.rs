//! Error types for specgen.
//!
//! Every generation-time failure is fatal to the run and carries the IR
//! [`Location`] of the offending node, so a run either produces a complete
//! artifact set or reports exactly where the tree is inconsistent.
//!
//! # Examples
//!
//! ```
//! use specgen_core::{Error, Location, Result};
//!
//! fn lookup(name: &str) -> Result<()> {
//!     Err(Error::UnresolvedType {
//!         name: name.to_string(),
//!         location: Location::root().child("v2").child("models"),
//!     })
//! }
//!
//! let err = lookup("Order").unwrap_err();
//! assert!(err.is_resolution_error());
//! assert_eq!(err.to_string(), "Unresolved type reference 'Order' at v2.models");
//! ```

use crate::ir::Location;
use thiserror::Error;

/// Main error type for specgen.
///
/// All crates of the workspace report generation failures through this type.
#[derive(Error, Debug)]
pub enum Error {
    /// A `Plain` type names neither a primitive nor a known model.
    #[error("Unresolved type reference '{name}' at {location}")]
    UnresolvedType {
        /// The unresolved name
        name: String,
        /// Where the reference occurs
        location: Location,
    },

    /// A model reaches itself through plain references only.
    #[error("Model '{model}' references itself without nullable, array or map indirection at {location}")]
    SelfReference {
        /// The model closing the cycle
        model: String,
        /// Location of the model
        location: Location,
    },

    /// Two responses of one operation share a status tag.
    #[error("Duplicate response status '{status}' at {location}")]
    DuplicateResponse {
        /// The repeated status tag
        status: String,
        /// Location of the operation
        location: Location,
    },

    /// A status tag has no HTTP status code.
    #[error("Unknown response status '{status}' at {location}")]
    UnknownStatus {
        /// The unknown tag
        status: String,
        /// Location of the response
        location: Location,
    },

    /// An operation declares no responses.
    #[error("Operation declares no responses at {location}")]
    EmptyResponses {
        /// Location of the operation
        location: Location,
    },

    /// Two responses collapse into the same multi-response variant.
    #[error("Responses '{first}' and '{second}' both map to variant '{variant}' at {location}")]
    AmbiguousResponse {
        /// First status tag
        first: String,
        /// Second status tag
        second: String,
        /// The shared variant name
        variant: String,
        /// Location of the operation
        location: Location,
    },

    /// URL template placeholders and declared URL params differ.
    #[error("URL parameter '{param}' is not matched by the url template '{url}' at {location}")]
    UrlParamMismatch {
        /// The offending parameter or placeholder
        param: String,
        /// The URL template
        url: String,
        /// Location of the endpoint
        location: Location,
    },

    /// A parameter type cannot be carried in a URL, query or header.
    #[error("Type '{ty}' is not supported for parameters at {location}")]
    UnsupportedParamType {
        /// Rendered type expression
        ty: String,
        /// Location of the parameter
        location: Location,
    },

    /// Two parameters of one operation map to the same identifier.
    #[error("Parameters '{first}' and '{second}' both map to identifier '{ident}' at {location}")]
    DuplicateParamName {
        /// First parameter
        first: String,
        /// Second parameter
        second: String,
        /// The shared identifier
        ident: String,
        /// Location of the operation
        location: Location,
    },

    /// A parameter maps to an identifier the generated code binds itself.
    #[error("Parameter '{param}' maps to reserved identifier '{ident}' at {location}")]
    ReservedParamName {
        /// The parameter
        param: String,
        /// The reserved identifier
        ident: String,
        /// Location of the parameter
        location: Location,
    },

    /// A one-of model cannot be represented.
    #[error("Invalid one-of model '{model}': {reason} at {location}")]
    InvalidOneOf {
        /// Model name
        model: String,
        /// Why it is invalid
        reason: String,
        /// Location of the model
        location: Location,
    },

    /// An enum model declares no values.
    #[error("Enum model '{model}' declares no values at {location}")]
    EmptyEnum {
        /// Model name
        model: String,
        /// Location of the model
        location: Location,
    },

    /// Generator configuration is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// A template failed to register or render.
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the failure
        message: String,
    },

    /// An emitted file is not valid Rust.
    #[error("Generated file '{path}' is not valid Rust: {message}")]
    InvalidOutput {
        /// Relative path of the artifact
        path: String,
        /// Parser message
        message: String,
    },
}

impl Error {
    /// Returns `true` for failures to resolve type references.
    ///
    /// # Examples
    ///
    /// ```
    /// use specgen_core::{Error, Location};
    ///
    /// let err = Error::SelfReference {
    ///     model: "Node".to_string(),
    ///     location: Location::root(),
    /// };
    /// assert!(err.is_resolution_error());
    /// ```
    #[must_use]
    pub const fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedType { .. } | Self::SelfReference { .. }
        )
    }

    /// Returns `true` for malformed operation responses.
    #[must_use]
    pub const fn is_response_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateResponse { .. }
                | Self::UnknownStatus { .. }
                | Self::EmptyResponses { .. }
                | Self::AmbiguousResponse { .. }
        )
    }

    /// Returns `true` for malformed operation parameters.
    #[must_use]
    pub const fn is_param_error(&self) -> bool {
        matches!(
            self,
            Self::UrlParamMismatch { .. }
                | Self::UnsupportedParamType { .. }
                | Self::DuplicateParamName { .. }
                | Self::ReservedParamName { .. }
        )
    }

    /// Returns `true` for models that cannot be represented.
    #[must_use]
    pub const fn is_model_error(&self) -> bool {
        matches!(self, Self::InvalidOneOf { .. } | Self::EmptyEnum { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if the generator itself produced broken output.
    #[must_use]
    pub const fn is_internal_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. } | Self::InvalidOutput { .. })
    }
}

/// Result type alias for specgen operations.
pub type Result<T> = std::result::Result<T, Error>;
