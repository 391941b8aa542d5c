//! Entry point of code generation.
//!
//! A [`CodeGenerator`] validates a spec once and then runs the emitters of
//! the requested artifact set. Versions are independent units; with the
//! `parallel` feature they are emitted on the rayon pool and merged back in
//! declaration order, so the output never depends on scheduling.
//!
//! # Examples
//!
//! ```
//! use specgen_codegen::CodeGenerator;
//! use specgen_core::{GeneratorConfig, Spec};
//!
//! let spec: Spec = serde_json::from_value(serde_json::json!({
//!     "name": "shop",
//!     "versions": [{
//!         "name": "v1",
//!         "models": [{ "name": "Order", "kind": { "object": { "fields": [] } } }]
//!     }]
//! }))
//! .unwrap();
//!
//! let generator = CodeGenerator::new(GeneratorConfig::default()).unwrap();
//! let code = generator.generate_models(&spec).unwrap();
//!
//! assert!(code.get("src/spec/v1/models.rs").is_some());
//! ```

use crate::common::{GeneratedCode, GeneratedFile};
use crate::emit::{EmitContext, Run, client, errors, helpers, models, scaffold, service};
use crate::naming::{NamingPolicy, RustNaming};
use crate::syntax::check_syntax;
use crate::template_engine::TemplateEngine;
use crate::validate::validate;
use specgen_core::{GeneratorConfig, Result, Spec, Version};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Generator of models, clients and services.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; one generator can serve concurrent runs.
#[derive(Debug)]
pub struct CodeGenerator {
    config: GeneratorConfig,
    naming: Box<dyn NamingPolicy>,
    engine: TemplateEngine<'static>,
}

impl CodeGenerator {
    /// Creates a generator with the default naming policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`](specgen_core::Error::ConfigError) for an
    /// invalid configuration, or a template error if a built-in template
    /// fails to register.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            naming: Box::new(RustNaming),
            engine: TemplateEngine::new()?,
        })
    }

    /// Replaces the naming policy.
    #[must_use]
    pub fn with_naming(mut self, naming: impl NamingPolicy + 'static) -> Self {
        self.naming = Box::new(naming);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates models and error models.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `spec`.
    pub fn generate_models(&self, spec: &Spec) -> Result<GeneratedCode> {
        self.run(spec, Run::Models)
    }

    /// Generates a blocking client per API.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `spec`.
    pub fn generate_client(&self, spec: &Spec) -> Result<GeneratedCode> {
        self.run(spec, Run::Client)
    }

    /// Generates service traits, routers and implementation scaffolds.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `spec`.
    pub fn generate_service(&self, spec: &Spec) -> Result<GeneratedCode> {
        self.run(spec, Run::Service)
    }

    fn run(&self, spec: &Spec, run: Run) -> Result<GeneratedCode> {
        tracing::info!(spec = %spec.name, run = ?run, "Generating code");
        validate(spec, self.naming.as_ref())?;

        let ctx = EmitContext {
            spec,
            config: &self.config,
            naming: self.naming.as_ref(),
            engine: &self.engine,
            run,
        };
        let versions: Vec<&Version> = spec
            .versions
            .iter()
            .filter(|version| run != Run::Models || !version.models.is_empty())
            .collect();

        let helper_files = helpers::emit(&ctx);
        let mut modules: Vec<String> = helpers::helpers(&ctx)
            .iter()
            .map(|helper| helper.module.to_string())
            .collect();
        modules.push("errors".to_string());
        if run == Run::Service {
            modules.push("routing".to_string());
        }
        modules.extend(versions.iter().map(|version| ctx.version_module(version)));
        modules.sort();

        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile::generated(
            ctx.generated_path("mod.rs"),
            ctx.mod_index(&modules, true)?,
        ));
        for file in helper_files {
            code.add_file(file);
        }
        code.add_file(errors::emit(&ctx)?);
        if run == Run::Service {
            code.add_file(service::emit_root_routing(&ctx));
        }

        #[cfg(feature = "parallel")]
        let units: Vec<Result<Vec<GeneratedFile>>> = versions
            .par_iter()
            .map(|version| version_unit(&ctx, version))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let units: Vec<Result<Vec<GeneratedFile>>> = versions
            .iter()
            .map(|version| version_unit(&ctx, version))
            .collect();
        for unit in units {
            for file in unit? {
                code.add_file(file);
            }
        }

        if run == Run::Service {
            for file in scaffold::emit(&ctx)? {
                code.add_file(file);
            }
        }

        check_syntax(&code)?;
        tracing::info!(
            spec = %spec.name,
            run = ?run,
            files = code.file_count(),
            "Generated code"
        );
        Ok(code)
    }
}

/// Files of one version, in emission order.
fn version_unit(ctx: &EmitContext<'_>, version: &Version) -> Result<Vec<GeneratedFile>> {
    let module = ctx.version_module(version);
    let mut modules = Vec::new();
    if !version.models.is_empty() {
        modules.push("models".to_string());
    }
    if ctx.run != Run::Models {
        modules.extend(version.apis.iter().map(|api| ctx.api_module(api)));
    }
    modules.sort();

    let mut files = vec![GeneratedFile::generated(
        ctx.generated_path(&format!("{module}/mod.rs")),
        ctx.mod_index(&modules, true)?,
    )];
    files.extend(models::emit(ctx, version)?);
    match ctx.run {
        Run::Models => {}
        Run::Client => {
            for api in &version.apis {
                files.push(client::emit(ctx, version, api)?);
            }
        }
        Run::Service => {
            for api in &version.apis {
                files.extend(service::emit_api(ctx, version, api)?);
            }
        }
    }
    tracing::debug!(version = %module, files = files.len(), "Generated version");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::GENERATED_HEADER;

    fn spec() -> Spec {
        serde_json::from_value(serde_json::json!({
            "name": "shop",
            "versions": [
                {
                    "name": "v1",
                    "apis": [{
                        "name": "orders",
                        "operations": [{
                            "name": "list",
                            "endpoint": { "method": "GET", "url": "/orders" },
                            "responses": [{ "status": "ok", "body": { "json": "Order[]" } }]
                        }]
                    }],
                    "models": [{ "name": "Order", "kind": { "object": { "fields": [] } } }]
                },
                {
                    "name": "v2",
                    "apis": [{
                        "name": "ping",
                        "operations": [{
                            "name": "ping",
                            "endpoint": { "method": "GET", "url": "/ping" },
                            "responses": [{ "status": "ok" }]
                        }]
                    }]
                }
            ]
        }))
        .unwrap()
    }

    fn paths(code: &GeneratedCode) -> Vec<&str> {
        code.files().map(GeneratedFile::path).collect()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GeneratorConfig::default().with_module_path("not a path");
        assert!(CodeGenerator::new(config).unwrap_err().is_config_error());
    }

    #[test]
    fn test_models_run_skips_versions_without_models() {
        let generator = CodeGenerator::new(GeneratorConfig::default()).unwrap();
        let code = generator.generate_models(&spec()).unwrap();
        assert_eq!(
            paths(&code),
            [
                "src/spec/mod.rs",
                "src/spec/empty.rs",
                "src/spec/errmodels.rs",
                "src/spec/errors.rs",
                "src/spec/v1/mod.rs",
                "src/spec/v1/models.rs",
            ]
        );
        let index = code.get("src/spec/mod.rs").unwrap().content();
        assert_eq!(
            index,
            format!("{GENERATED_HEADER}\n\npub mod empty;\npub mod errmodels;\npub mod errors;\npub mod v1;\n")
        );
    }

    #[test]
    fn test_client_run_layout() {
        let generator = CodeGenerator::new(GeneratorConfig::default()).unwrap();
        let code = generator.generate_client(&spec()).unwrap();
        assert_eq!(
            paths(&code),
            [
                "src/spec/mod.rs",
                "src/spec/empty.rs",
                "src/spec/errmodels.rs",
                "src/spec/params.rs",
                "src/spec/response.rs",
                "src/spec/errors.rs",
                "src/spec/v1/mod.rs",
                "src/spec/v1/models.rs",
                "src/spec/v1/orders.rs",
                "src/spec/v2/mod.rs",
                "src/spec/v2/ping.rs",
            ]
        );
        assert!(code.files().all(|file| !file.is_scaffold()));
        assert!(
            code.get("src/spec/v1/mod.rs")
                .unwrap()
                .content()
                .ends_with("pub mod models;\npub mod orders;\n")
        );
    }

    #[test]
    fn test_service_run_ends_with_scaffolds() {
        let generator = CodeGenerator::new(GeneratorConfig::default()).unwrap();
        let code = generator.generate_service(&spec()).unwrap();
        let all = paths(&code);
        assert!(all.contains(&"src/spec/routing.rs"));
        assert!(all.contains(&"src/spec/v1/orders/mod.rs"));
        assert!(all.contains(&"src/spec/v1/orders/routing.rs"));
        assert_eq!(
            &all[all.len() - 5..],
            [
                "src/services/mod.rs",
                "src/services/v1/mod.rs",
                "src/services/v1/orders.rs",
                "src/services/v2/mod.rs",
                "src/services/v2/ping.rs",
            ]
        );
        let first_scaffold = all.len() - 5;
        assert!(code.files.iter().skip(first_scaffold).all(GeneratedFile::is_scaffold));
        assert!(
            code.files
                .iter()
                .take(first_scaffold)
                .all(|file| file.content().starts_with(GENERATED_HEADER))
        );
    }

    #[test]
    fn test_validation_runs_first() {
        let spec: Spec = serde_json::from_value(serde_json::json!({
            "name": "shop",
            "versions": [{
                "name": "v1",
                "models": [{ "name": "Order", "kind": { "object": { "fields": [
                    { "name": "customer", "type": "Customer" }
                ] } } }]
            }]
        }))
        .unwrap();
        let generator = CodeGenerator::new(GeneratorConfig::default()).unwrap();
        let err = generator.generate_models(&spec).unwrap_err();
        assert!(matches!(err, specgen_core::Error::UnresolvedType { .. }));
    }
}
