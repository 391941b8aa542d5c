//! Service implementation scaffolds.
//!
//! Scaffolds are written once and then owned by the user, so they carry no
//! generated header.

use super::service::{signatures, trait_name};
use super::EmitContext;
use crate::common::{GeneratedFile, Imports};
use crate::naming::unraw;
use crate::resolver::{ModelOrigin, TargetType, TypePaths};
use crate::signature::Signature;
use serde::Serialize;
use specgen_core::{Api, Primitive, Result, Version};

#[derive(Serialize)]
struct ScaffoldContext {
    api: String,
    imports: Vec<String>,
    trait_name: String,
    struct_name: String,
    methods: Vec<MethodContext>,
}

#[derive(Serialize)]
struct MethodContext {
    name: String,
    params: Vec<ParamContext>,
    returns: String,
}

#[derive(Serialize)]
struct ParamContext {
    name: String,
    ty: String,
}

/// Emits the scaffold index files and one implementation per API.
///
/// # Errors
///
/// Returns a template or resolution error.
pub fn emit(ctx: &EmitContext<'_>) -> Result<Vec<GeneratedFile>> {
    let versions: Vec<String> = sorted(ctx.spec.versions.iter().map(|v| ctx.version_module(v)));
    let mut files = vec![GeneratedFile::scaffolded(
        ctx.scaffold_path("mod.rs"),
        ctx.mod_index(&versions, false)?,
    )];
    for version in &ctx.spec.versions {
        let module = ctx.version_module(version);
        let apis = sorted(version.apis.iter().map(|api| ctx.api_module(api)));
        files.push(GeneratedFile::scaffolded(
            ctx.scaffold_path(&format!("{module}/mod.rs")),
            ctx.mod_index(&apis, false)?,
        ));
        for api in &version.apis {
            files.push(implementation(ctx, version, api)?);
        }
    }
    Ok(files)
}

fn sorted(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut names: Vec<String> = names.collect();
    names.sort();
    names
}

fn implementation(ctx: &EmitContext<'_>, version: &Version, api: &Api) -> Result<GeneratedFile> {
    let api_path = format!("{}::{}", ctx.version_path(version), ctx.api_module(api));
    let sigs = signatures(ctx, version, api)?;
    let mut imports = Imports::new();
    imports.add(format!("{}::errors::ServiceError", ctx.root()));
    imports.add(format!("{api_path}::*"));
    signature_imports(ctx, version, &sigs, &mut imports);

    let methods = sigs
        .iter()
        .map(|sig| MethodContext {
            name: sig.fn_name.clone(),
            params: sig
                .service_params(ctx.naming, TypePaths::API)
                .into_iter()
                .map(|(name, ty)| ParamContext {
                    name: format!("_{}", unraw(&name)),
                    ty,
                })
                .collect(),
            returns: sig.return_type(ctx.naming, TypePaths::API),
        })
        .collect();

    let trait_name = trait_name(ctx, api);
    let context = ScaffoldContext {
        api: api.name.to_string(),
        imports: imports.iter().map(str::to_string).collect(),
        struct_name: format!("{trait_name}Impl"),
        trait_name,
        methods,
    };
    let content = ctx.engine.render("scaffold/service", &context)?;
    let path = ctx.scaffold_path(&format!(
        "{}/{}.rs",
        ctx.version_module(version),
        ctx.api_module(api)
    ));
    tracing::debug!(path = %path, "Generated service scaffold");
    Ok(GeneratedFile::scaffolded(path, content))
}

#[derive(Default)]
#[allow(clippy::struct_excessive_bools)]
struct TypeUses {
    primitives: Vec<Primitive>,
    map: bool,
    models: bool,
    errors: bool,
    errmodels: bool,
}

impl TypeUses {
    fn collect(&mut self, ty: &TargetType) {
        match ty {
            TargetType::Primitive(primitive) => self.primitives.push(*primitive),
            TargetType::Model { origin, .. } => match origin {
                ModelOrigin::Version => self.models = true,
                ModelOrigin::Error => self.errors = true,
                ModelOrigin::Standard => self.errmodels = true,
            },
            TargetType::Local(_) => {}
            TargetType::Option(inner) | TargetType::Vec(inner) => self.collect(inner),
            TargetType::Map(inner) => {
                self.map = true;
                self.collect(inner);
            }
        }
    }
}

/// Imports of the types the implementation methods spell out.
fn signature_imports(ctx: &EmitContext<'_>, version: &Version, sigs: &[Signature<'_>], imports: &mut Imports) {
    let mut uses = TypeUses::default();
    for ty in sigs.iter().flat_map(Signature::service_types) {
        uses.collect(ty);
    }
    let root = ctx.root();
    imports.add_if(uses.models, format!("{}::models", ctx.version_path(version)));
    imports.add_if(uses.errors, format!("{root}::errors"));
    imports.add_if(uses.errmodels, format!("{root}::errmodels"));
    ctx.type_imports(imports, |primitive| uses.primitives.contains(&primitive), uses.map);
}
