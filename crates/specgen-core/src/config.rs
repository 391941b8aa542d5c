//! Generator configuration.
//!
//! # Examples
//!
//! ```
//! use specgen_core::GeneratorConfig;
//!
//! // Use default configuration
//! let config = GeneratorConfig::default();
//! assert_eq!(config.module_path, "crate::spec");
//!
//! // Customize output locations
//! let config = GeneratorConfig::default()
//!     .with_module_path("crate::generated")
//!     .with_generate_path("src/generated");
//! assert!(config.validate().is_ok());
//! ```

use crate::{Error, Result};

/// Where generated code lives and how it is referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Rust path of the generated root module inside the consuming crate.
    ///
    /// Default: `crate::spec`
    pub module_path: String,

    /// Directory of generated artifacts, relative to the sink root.
    ///
    /// Default: `src/spec`
    pub generate_path: String,

    /// Directory of scaffolded service implementations, relative to the sink root.
    ///
    /// Default: `src/services`
    pub services_path: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            module_path: "crate::spec".to_string(),
            generate_path: "src/spec".to_string(),
            services_path: "src/services".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the Rust path of the generated root module.
    #[must_use]
    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = module_path.into();
        self
    }

    /// Sets the directory of generated artifacts.
    #[must_use]
    pub fn with_generate_path(mut self, generate_path: impl Into<String>) -> Self {
        self.generate_path = generate_path.into();
        self
    }

    /// Sets the directory of scaffolded service implementations.
    #[must_use]
    pub fn with_services_path(mut self, services_path: impl Into<String>) -> Self {
        self.services_path = services_path.into();
        self
    }

    /// Checks that the configuration can produce a consistent tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the module path is not a Rust path
    /// or an output directory escapes the sink root.
    ///
    /// # Examples
    ///
    /// ```
    /// use specgen_core::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::default().with_module_path("crate::1spec");
    /// assert!(config.validate().unwrap_err().is_config_error());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let valid_path = self.module_path.split("::").all(|segment| {
            segment
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
        if !valid_path {
            return Err(Error::ConfigError {
                message: format!("'{}' is not a Rust module path", self.module_path),
            });
        }

        for dir in [&self.generate_path, &self.services_path] {
            if dir.starts_with('/') || dir.split('/').any(|part| part == "..") {
                return Err(Error::ConfigError {
                    message: format!("'{dir}' must be a relative path inside the output root"),
                });
            }
        }

        if self.generate_path == self.services_path {
            return Err(Error::ConfigError {
                message: "generated and scaffolded code must not share a directory".to_string(),
            });
        }

        Ok(())
    }
}
