//! Emitters turning the validated IR into generated files.
//!
//! Every emitter receives an [`EmitContext`] carrying the spec, the
//! configuration, the naming policy and the template engine; emitters never
//! reach for global state.

pub mod client;
pub mod errors;
pub mod helpers;
pub mod models;
pub mod scaffold;
pub mod service;

use crate::common::{CodeWriter, GENERATED_HEADER, GeneratedFile, Imports};
use crate::naming::NamingPolicy;
use crate::resolver::TypePaths;
use crate::signature::{BodyShape, Returns, Signature};
use crate::template_engine::TemplateEngine;
use serde::Serialize;
use specgen_core::{Api, GeneratorConfig, Primitive, Result, Spec, Version};

/// Which artifact set a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run {
    /// Models and error models only
    Models,
    /// Blocking HTTP client
    Client,
    /// axum service with scaffolds
    Service,
}

/// Read-only state shared by the emitters of one run.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// The validated spec
    pub spec: &'a Spec,
    /// Output configuration
    pub config: &'a GeneratorConfig,
    /// Identifier casing
    pub naming: &'a dyn NamingPolicy,
    /// Templates of index files and scaffolds
    pub engine: &'a TemplateEngine<'static>,
    /// Artifact set being produced
    pub run: Run,
}

#[derive(Serialize)]
struct ModIndex<'m> {
    generated: bool,
    header: &'static str,
    modules: &'m [String],
}

impl EmitContext<'_> {
    /// Rust path of the generated root module.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.config.module_path
    }

    /// Sink path of a generated file.
    #[must_use]
    pub fn generated_path(&self, relative: &str) -> String {
        join(&self.config.generate_path, relative)
    }

    /// Sink path of a scaffolded file.
    #[must_use]
    pub fn scaffold_path(&self, relative: &str) -> String {
        join(&self.config.services_path, relative)
    }

    /// Module name of a version.
    #[must_use]
    pub fn version_module(&self, version: &Version) -> String {
        self.naming.module_name(version.name.as_str())
    }

    /// Module name of an API.
    #[must_use]
    pub fn api_module(&self, api: &Api) -> String {
        self.naming.module_name(api.name.as_str())
    }

    /// Rust path of a version module.
    #[must_use]
    pub fn version_path(&self, version: &Version) -> String {
        format!("{}::{}", self.root(), self.version_module(version))
    }

    /// Renders a `mod.rs` listing `modules`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`](specgen_core::Error::TemplateError)
    /// if rendering fails.
    pub fn mod_index(&self, modules: &[String], generated: bool) -> Result<String> {
        self.engine.render(
            "mod",
            &ModIndex {
                generated,
                header: GENERATED_HEADER,
                modules,
            },
        )
    }

    /// Adds the imports of every primitive `uses` reports, plus `BTreeMap`.
    pub fn type_imports(
        &self,
        imports: &mut Imports,
        uses: impl Fn(Primitive) -> bool,
        uses_map: bool,
    ) {
        imports.add_if(uses(Primitive::Decimal), "rust_decimal::Decimal");
        imports.add_if(uses(Primitive::Date), "chrono::NaiveDate");
        imports.add_if(uses(Primitive::DateTime), "chrono::NaiveDateTime");
        imports.add_if(uses(Primitive::Uuid), "uuid::Uuid");
        imports.add_if(uses(Primitive::Empty), format!("{}::empty::Empty", self.root()));
        imports.add_if(uses_map, "std::collections::BTreeMap");
    }
}

fn join(dir: &str, relative: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        relative.to_string()
    } else {
        format!("{dir}/{relative}")
    }
}

/// Starts a generated file with its header.
#[must_use]
pub fn generated_writer() -> CodeWriter {
    let mut w = CodeWriter::new();
    w.line(GENERATED_HEADER);
    w.blank();
    w
}

/// Finishes a generated file.
#[must_use]
pub fn generated_file(path: String, w: CodeWriter) -> GeneratedFile {
    GeneratedFile::generated(path, w.finish())
}

/// Writes the synthesized form struct of an operation, if it has one.
pub fn write_form_struct(w: &mut CodeWriter, sig: &Signature<'_>, naming: &dyn NamingPolicy) {
    let BodyShape::Form {
        struct_name,
        fields,
        ..
    } = &sig.body
    else {
        return;
    };
    w.line(format!("/// Form fields of `{}`.", sig.operation.name));
    w.line("#[derive(Debug, Clone, PartialEq)]");
    w.open(format!("pub struct {struct_name}"));
    for field in fields {
        w.doc(field.param.description.as_deref());
        w.line(format!(
            "pub {}: {},",
            field.ident,
            field.ty.render(naming, TypePaths::API)
        ));
    }
    w.close("}");
    w.blank();
}

/// Writes the response enum of a multi-response operation, if it has one.
pub fn write_response_enum(w: &mut CodeWriter, sig: &Signature<'_>, naming: &dyn NamingPolicy) {
    let Returns::Multi {
        enum_name,
        variants,
    } = &sig.returns
    else {
        return;
    };
    w.line(format!("/// Responses of `{}`.", sig.operation.name));
    w.line("#[derive(Debug, Clone, PartialEq)]");
    w.open(format!("pub enum {enum_name}"));
    for variant in variants {
        let doc = variant
            .response
            .description
            .clone()
            .unwrap_or_else(|| format!("`{} {}`", variant.code, variant.response.status));
        w.doc(Some(&doc));
        match variant.payload.render(naming, TypePaths::API) {
            Some(payload) => w.line(format!("{}({payload}),", variant.name)),
            None => w.line(format!("{},", variant.name)),
        }
    }
    w.close("}");
    w.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_paths() {
        assert_eq!(join("src/spec/", "mod.rs"), "src/spec/mod.rs");
        assert_eq!(join("", "mod.rs"), "mod.rs");
    }
}
