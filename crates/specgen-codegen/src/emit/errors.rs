//! The generated `errors.rs`: API-specific error models plus the error enum
//! of the run.

use super::{EmitContext, Run, generated_file, generated_writer};
use crate::common::{CodeWriter, GeneratedFile, Imports};
use crate::dispatch::{ErrorVariant, error_variants};
use crate::emit::models::write_models;
use crate::resolver::{Resolver, TypePaths};
use crate::usage::{errors_have_map, errors_have_type, models_reference};
use specgen_core::{Location, Result, STANDARD_ERROR_MODELS};

/// Emits `errors.rs`.
///
/// # Errors
///
/// Returns a resolution or status error for an unvalidated taxonomy.
pub fn emit(ctx: &EmitContext<'_>) -> Result<GeneratedFile> {
    let errors = &ctx.spec.http_errors;
    let variants = error_variants(errors, ctx.naming)?;
    let root = ctx.root();

    let mut imports = Imports::new();
    imports.add_if(!errors.models.is_empty(), "serde::{Deserialize, Serialize}");
    let references_standard = models_reference(&errors.models, |name| {
        errors.model(name).is_none() && STANDARD_ERROR_MODELS.contains(&name)
    });
    imports.add_if(
        ctx.run != Run::Models || references_standard,
        format!("{root}::errmodels"),
    );
    match ctx.run {
        Run::Models => {}
        Run::Client => imports.add(format!("{root}::response")),
        Run::Service => {
            imports.add(format!("{root}::respond::{{self, LogFields}}"));
            imports.add("axum::response::Response");
        }
    }
    ctx.type_imports(
        &mut imports,
        |primitive| errors_have_type(errors, primitive),
        errors_have_map(errors),
    );

    let mut w = generated_writer();
    imports.write(&mut w);
    write_models(
        &mut w,
        &errors.models,
        &Resolver::for_errors(errors),
        ctx.naming,
        TypePaths::ERRORS,
        &Location::root().child("http_errors").child("models"),
    )?;
    match ctx.run {
        Run::Models => {}
        Run::Client => write_client_error(&mut w, ctx, &variants),
        Run::Service => write_service_error(&mut w, ctx, &variants),
    }

    let path = ctx.generated_path("errors.rs");
    tracing::debug!(path = %path, errors = variants.len(), "Generated error taxonomy");
    Ok(generated_file(path, w))
}

fn error_message(error: &ErrorVariant) -> String {
    let payload = if error.standard { "{0}" } else { "{0:?}" };
    format!("#[error(\"{} {}: {payload}\")]", error.code, error.status)
}

fn write_error_doc(w: &mut CodeWriter, error: &ErrorVariant) {
    let doc = error
        .description
        .clone()
        .unwrap_or_else(|| format!("`{} {}` response", error.code, error.status));
    w.doc(Some(&doc));
}

fn write_client_error(w: &mut CodeWriter, ctx: &EmitContext<'_>, variants: &[ErrorVariant]) {
    w.line("/// Errors returned by generated clients.");
    w.line("#[derive(Debug, thiserror::Error)]");
    w.open("pub enum ClientError");
    for error in variants {
        write_error_doc(w, error);
        w.line(error_message(error));
        w.line(format!(
            "{}({}),",
            error.name,
            error.ty.render(ctx.naming, TypePaths::ERRORS)
        ));
    }
    w.line("/// A status code no response or error declares");
    w.line("#[error(\"Unexpected status code {0}\")]");
    w.line("UnexpectedStatus(u16),");
    w.line("/// The request could not be sent");
    w.line("#[error(\"Request failed: {0}\")]");
    w.line("Transport(#[source] reqwest::Error),");
    w.line("/// The response body could not be decoded");
    w.line("#[error(transparent)]");
    w.line("Response(#[from] response::ResponseError),");
    w.close("}");
}

fn write_service_error(w: &mut CodeWriter, ctx: &EmitContext<'_>, variants: &[ErrorVariant]) {
    const BOXED: &str = "Box<dyn std::error::Error + Send + Sync>";

    w.line("/// Errors returned by service implementations.");
    w.line("#[derive(Debug, thiserror::Error)]");
    w.open("pub enum ServiceError");
    for error in variants {
        write_error_doc(w, error);
        if error.name == "InternalServerError" && error.standard {
            w.line("#[error(\"{0}\")]");
            w.line(format!("InternalServerError(#[source] {BOXED}),"));
        } else {
            w.line(error_message(error));
            w.line(format!(
                "{}({}),",
                error.name,
                error.ty.render(ctx.naming, TypePaths::ERRORS)
            ));
        }
    }
    w.close("}");
    w.blank();

    w.open("impl ServiceError");
    w.line("/// Wraps an implementation failure as a 500 response.");
    w.open(format!("pub fn internal(error: impl Into<{BOXED}>) -> Self"));
    w.line("Self::InternalServerError(error.into())");
    w.close("}");
    w.close("}");
    w.blank();

    w.open(format!("impl From<{BOXED}> for ServiceError"));
    w.open(format!("fn from(error: {BOXED}) -> Self"));
    w.line("Self::InternalServerError(error)");
    w.close("}");
    w.close("}");
    w.blank();

    w.line("/// Writes the response of a failed service call.");
    w.open("pub fn respond_error(log_fields: &LogFields, error: ServiceError) -> Response");
    w.open("match error");
    for error in variants {
        let pattern = format!("ServiceError::{}(error) =>", error.name);
        match (error.standard, error.name.as_str()) {
            (true, "BadRequest") => {
                w.line(format!("{pattern} respond::bad_request(log_fields, error),"));
            }
            (true, "NotFound") => {
                w.line(format!("{pattern} respond::not_found(log_fields, error.message),"));
            }
            (true, "InternalServerError") => {
                w.line(format!("{pattern} respond::internal_server_error("));
                w.indent();
                w.line("log_fields,");
                w.line("format!(\"Error returned from service implementation: {error}\"),");
                w.dedent();
                w.line("),");
            }
            _ => w.line(format!(
                "{pattern} respond::json(log_fields, {}, &error),",
                error.code
            )),
        }
    }
    w.close("}");
    w.close("}");
}
