//! Template engine for index files and scaffolds using Handlebars.
//!
//! Generated Rust is assembled with [`CodeWriter`](crate::common::CodeWriter);
//! templates cover the fixed-shape files: `mod.rs` indexes and the service
//! implementation scaffolds.
//!
//! # Examples
//!
//! ```
//! use specgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let index = engine
//!     .render("mod", &json!({ "generated": false, "header": "", "modules": ["v1"] }))
//!     .unwrap();
//! assert_eq!(index, "pub mod v1;\n");
//! ```

use handlebars::Handlebars;
use serde::Serialize;
use specgen_core::{Error, Result};

/// Template engine for code generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing it to be shared by the
/// per-version generation units.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates a new template engine with registered templates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to
    /// register.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        // Output is Rust source, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        let mut engine = Self { handlebars };
        engine.register_template_string("mod", include_str!("../templates/mod.rs.hbs"))?;
        engine.register_template_string(
            "scaffold/service",
            include_str!("../templates/scaffold/service.rs.hbs"),
        )?;
        Ok(engine)
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template is not registered,
    /// the context cannot be serialized or a variable is missing.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                message: format!("Rendering '{template_name}' failed: {e}"),
            })
    }

    /// Registers a custom template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                message: format!("Failed to register template '{name}': {e}"),
            })
    }
}
