//! Model emission.
//!
//! Objects become structs, enums become unit enums with their wire values,
//! and one-ofs become tagged enums. A nullable field that closes a model
//! cycle is boxed.

use super::{EmitContext, generated_file, generated_writer};
use crate::common::{CodeWriter, GeneratedFile, Imports};
use crate::marshal::literal;
use crate::naming::{NamingPolicy, unraw};
use crate::resolver::{ModelGraph, Resolver, TargetType, TypePaths};
use crate::usage::{models_have_map, models_have_type, models_reference};
use specgen_core::{
    EnumValue, Field, Location, Model, ModelKind, Result, STANDARD_ERROR_MODELS, Version,
};

/// Emits `<version>/models.rs`, or nothing for a version without models.
///
/// # Errors
///
/// Returns a resolution error for an unvalidated model.
pub fn emit(ctx: &EmitContext<'_>, version: &Version) -> Result<Option<GeneratedFile>> {
    if version.models.is_empty() {
        return Ok(None);
    }
    let errors = &ctx.spec.http_errors;
    let mut imports = Imports::new();
    imports.add("serde::{Deserialize, Serialize}");
    imports.add_if(
        models_reference(&version.models, |name| {
            version.model(name).is_none() && errors.model(name).is_some()
        }),
        format!("{}::errors", ctx.root()),
    );
    imports.add_if(
        models_reference(&version.models, |name| {
            version.model(name).is_none() && STANDARD_ERROR_MODELS.contains(&name)
        }),
        format!("{}::errmodels", ctx.root()),
    );
    ctx.type_imports(
        &mut imports,
        |primitive| models_have_type(&version.models, primitive),
        models_have_map(&version.models),
    );

    let mut w = generated_writer();
    imports.write(&mut w);
    let resolver = Resolver::for_version(version, errors);
    let at = Location::root().child(ctx.version_module(version)).child("models");
    write_models(
        &mut w,
        &version.models,
        &resolver,
        ctx.naming,
        TypePaths::MODELS,
        &at,
    )?;

    let path = ctx.generated_path(&format!("{}/models.rs", ctx.version_module(version)));
    tracing::debug!(path = %path, models = version.models.len(), "Generated models");
    Ok(Some(generated_file(path, w)))
}

/// Writes the definitions of `models`.
///
/// # Errors
///
/// Returns a resolution error for an unvalidated model.
pub fn write_models(
    w: &mut CodeWriter,
    models: &[Model],
    resolver: &Resolver<'_>,
    naming: &dyn NamingPolicy,
    paths: TypePaths,
    at: &Location,
) -> Result<()> {
    let graph = ModelGraph::new(models);
    for model in models {
        let at = at.child(model.name.as_str());
        let writer = ModelWriter {
            model,
            graph: &graph,
            resolver,
            naming,
            paths,
        };
        match &model.kind {
            ModelKind::Object { fields } => writer.object(w, fields, &at)?,
            ModelKind::OneOf {
                items,
                discriminator,
            } => writer.one_of(w, items, discriminator.as_deref(), &at)?,
            ModelKind::Enum { values } => writer.enumeration(w, values),
        }
        w.blank();
    }
    Ok(())
}

struct ModelWriter<'m, 'r> {
    model: &'m Model,
    graph: &'m ModelGraph<'m>,
    resolver: &'m Resolver<'r>,
    naming: &'m dyn NamingPolicy,
    paths: TypePaths,
}

impl ModelWriter<'_, '_> {
    fn type_name(&self) -> String {
        self.naming.type_name(self.model.name.as_str())
    }

    /// Rendered type of a field, boxing the edge that closes a cycle.
    fn field_type(&self, field: &Field, at: &Location) -> Result<String> {
        let ty = self.resolver.resolve(&field.ty, &at.child(field.name.as_str()))?;
        let boxed = self
            .graph
            .needs_box(self.model.name.as_str(), field.name.as_str());
        Ok(match ty {
            TargetType::Option(inner) if boxed => {
                format!("Option<Box<{}>>", inner.render(self.naming, self.paths))
            }
            ty => ty.render(self.naming, self.paths),
        })
    }

    fn object(&self, w: &mut CodeWriter, fields: &[Field], at: &Location) -> Result<()> {
        w.doc(self.model.description.as_deref());
        w.line("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]");
        w.open(format!("pub struct {}", self.type_name()));
        for field in fields {
            let ident = self.naming.field_name(field.name.as_str());
            let ty = self.field_type(field, at)?;
            let mut serde = Vec::new();
            if unraw(&ident) != field.name.as_str() {
                serde.push(format!("rename = {}", literal(field.name.as_str())));
            }
            if ty.starts_with("Option<") {
                serde.push("default".to_string());
                serde.push("skip_serializing_if = \"Option::is_none\"".to_string());
            }
            w.doc(field.description.as_deref());
            if !serde.is_empty() {
                w.line(format!("#[serde({})]", serde.join(", ")));
            }
            w.line(format!("pub {ident}: {ty},"));
        }
        w.close("}");
        Ok(())
    }

    fn one_of(
        &self,
        w: &mut CodeWriter,
        items: &[Field],
        discriminator: Option<&str>,
        at: &Location,
    ) -> Result<()> {
        w.doc(self.model.description.as_deref());
        w.line("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]");
        if let Some(tag) = discriminator {
            w.line(format!("#[serde(tag = {})]", literal(tag)));
        }
        w.open(format!("pub enum {}", self.type_name()));
        for item in items {
            let ty = self.field_type(item, at)?;
            w.doc(item.description.as_deref());
            w.line(format!("#[serde(rename = {})]", literal(item.name.as_str())));
            w.line(format!(
                "{}({ty}),",
                self.naming.variant_name(item.name.as_str())
            ));
        }
        w.close("}");
        Ok(())
    }

    fn enumeration(&self, w: &mut CodeWriter, values: &[EnumValue]) {
        let name = self.type_name();
        let variants: Vec<(String, String)> = values
            .iter()
            .map(|value| (self.naming.variant_name(&value.value), literal(&value.value)))
            .collect();

        w.doc(self.model.description.as_deref());
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]");
        w.open(format!("pub enum {name}"));
        for (value, (variant, wire)) in values.iter().zip(&variants) {
            w.doc(value.description.as_deref());
            w.line(format!("#[serde(rename = {wire})]"));
            w.line(format!("{variant},"));
        }
        w.close("}");
        w.blank();

        let wires: Vec<&str> = variants.iter().map(|(_, wire)| wire.as_str()).collect();
        w.open(format!("impl {name}"));
        w.line("/// Wire values in declaration order.");
        w.line(format!(
            "pub const VALUES: &'static [&'static str] = &[{}];",
            wires.join(", ")
        ));
        w.blank();
        w.line("/// Wire value of the variant.");
        w.line("#[must_use]");
        w.open("pub const fn as_str(self) -> &'static str");
        w.open("match self");
        for (variant, wire) in &variants {
            w.line(format!("Self::{variant} => {wire},"));
        }
        w.close("}");
        w.close("}");
        w.close("}");
        w.blank();

        w.open(format!("impl std::fmt::Display for {name}"));
        w.open("fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result");
        w.line("f.write_str(self.as_str())");
        w.close("}");
        w.close("}");
        w.blank();

        w.open(format!("impl std::str::FromStr for {name}"));
        w.line("type Err = String;");
        w.blank();
        w.open("fn from_str(value: &str) -> std::result::Result<Self, Self::Err>");
        w.open("match value");
        for (variant, wire) in &variants {
            w.line(format!("{wire} => Ok(Self::{variant}),"));
        }
        w.line(format!(
            "_ => Err(format!(\"unknown {name} value '{{value}}'\")),"
        ));
        w.close("}");
        w.close("}");
        w.close("}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::RustNaming;
    use specgen_core::HttpErrors;

    fn render(models: serde_json::Value) -> String {
        let version: Version =
            serde_json::from_value(serde_json::json!({ "name": "v1", "models": models })).unwrap();
        let errors = HttpErrors::default();
        let resolver = Resolver::for_version(&version, &errors);
        let mut w = CodeWriter::new();
        write_models(
            &mut w,
            &version.models,
            &resolver,
            &RustNaming,
            TypePaths::MODELS,
            &Location::root(),
        )
        .unwrap();
        w.finish()
    }

    #[test]
    fn test_object_fields() {
        let code = render(serde_json::json!([{
            "name": "order",
            "description": "A placed order.",
            "kind": { "object": { "fields": [
                { "name": "id", "type": "uuid" },
                { "name": "createdAt", "type": "datetime" },
                { "name": "type", "type": "string" },
                { "name": "note", "type": "string?" },
                { "name": "tags", "type": "string{}" }
            ] } }
        }]));
        assert!(code.starts_with("/// A placed order.\n"));
        assert!(code.contains("pub struct Order {\n"));
        assert!(code.contains("    pub id: Uuid,\n"));
        assert!(code.contains("    #[serde(rename = \"createdAt\")]\n    pub created_at: NaiveDateTime,\n"));
        assert!(code.contains("    pub r#type: String,\n"));
        assert!(!code.contains("rename = \"type\""));
        assert!(code.contains(
            "    #[serde(default, skip_serializing_if = \"Option::is_none\")]\n    pub note: Option<String>,\n"
        ));
        assert!(code.contains("    pub tags: BTreeMap<String, String>,\n"));
    }

    #[test]
    fn test_cycle_is_boxed() {
        let code = render(serde_json::json!([
            { "name": "Node", "kind": { "object": { "fields": [
                { "name": "next", "type": "Node?" },
                { "name": "children", "type": "Node[]" }
            ] } } },
            { "name": "Pair", "kind": { "object": { "fields": [{ "name": "node", "type": "Node?" }] } } }
        ]));
        assert!(code.contains("pub next: Option<Box<Node>>,"));
        assert!(code.contains("pub children: Vec<Node>,"));
        assert!(code.contains("pub node: Option<Node>,"));
    }

    #[test]
    fn test_enum_model() {
        let code = render(serde_json::json!([{
            "name": "status",
            "kind": { "enum": { "values": [{ "value": "in-stock" }, { "value": "sold_out" }] } }
        }]));
        assert!(code.contains("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]\npub enum Status {"));
        assert!(code.contains("    #[serde(rename = \"in-stock\")]\n    InStock,\n"));
        assert!(code.contains("pub const VALUES: &'static [&'static str] = &[\"in-stock\", \"sold_out\"];"));
        assert!(code.contains("Self::SoldOut => \"sold_out\","));
        assert!(code.contains("\"in-stock\" => Ok(Self::InStock),"));
        assert!(code.contains("_ => Err(format!(\"unknown Status value '{value}'\")),"));
        assert!(syn::parse_file(&code).is_ok());
    }

    #[test]
    fn test_one_of_tagging() {
        let models = serde_json::json!([
            { "name": "Circle", "kind": { "object": { "fields": [{ "name": "r", "type": "double" }] } } },
            { "name": "Shape", "kind": { "one_of": {
                "items": [{ "name": "circle", "type": "Circle" }],
                "discriminator": "kind"
            } } },
            { "name": "Value", "kind": { "one_of": {
                "items": [{ "name": "text", "type": "string" }, { "name": "number", "type": "long" }]
            } } }
        ]);
        let code = render(models);
        assert!(code.contains("#[serde(tag = \"kind\")]\npub enum Shape {\n    #[serde(rename = \"circle\")]\n    Circle(Circle),\n}"));
        assert!(code.contains("pub enum Value {\n    #[serde(rename = \"text\")]\n    Text(String),\n    #[serde(rename = \"number\")]\n    Number(i64),\n}"));
        assert!(syn::parse_file(&code).is_ok());
    }
}
