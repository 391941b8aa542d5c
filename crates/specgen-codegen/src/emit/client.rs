//! Client emission: one blocking `Client` per API.

use super::service::{api_type_imports, signatures};
use super::{EmitContext, generated_file, generated_writer, write_form_struct, write_response_enum};
use crate::common::{CodeWriter, GeneratedFile, Imports};
use crate::dispatch::{ErrorVariant, client_dispatch, error_variants};
use crate::marshal::{ParamCodec, encode_group, literal};
use crate::resolver::{ModelOrigin, TargetType, TypePaths};
use crate::signature::{BodyShape, Signature};
use crate::usage::{api_has_params, api_has_body_of_kind};
use specgen_core::{Api, BodyKind, ParamLocation, Result, Version};

/// Emits `<version>/<api>.rs`.
///
/// # Errors
///
/// Returns a resolution error for an unvalidated API.
pub fn emit(ctx: &EmitContext<'_>, version: &Version, api: &Api) -> Result<GeneratedFile> {
    let sigs = signatures(ctx, version, api)?;
    let errors = error_variants(&ctx.spec.http_errors, ctx.naming)?;
    let root = ctx.root();

    let mut imports = Imports::new();
    imports.add(format!("{root}::errmodels"));
    imports.add(format!("{root}::errors::ClientError"));
    imports.add(format!("{root}::response"));
    imports.add_if(
        errors.iter().any(|error| {
            matches!(
                error.ty.leaf(),
                TargetType::Model {
                    origin: ModelOrigin::Error,
                    ..
                }
            )
        }),
        format!("{root}::errors"),
    );
    let writes_pairs = api_has_params(api, ParamLocation::Query)
        || api_has_params(api, ParamLocation::Header)
        || api_has_body_of_kind(api, BodyKind::FormData)
        || api_has_body_of_kind(api, BodyKind::FormUrlEncoded);
    imports.add_if(writes_pairs, format!("{root}::params::ParamsWriter"));
    api_type_imports(ctx, version, api, &mut imports);

    let mut w = generated_writer();
    imports.write(&mut w);
    for sig in &sigs {
        write_form_struct(&mut w, sig, ctx.naming);
        write_response_enum(&mut w, sig, ctx.naming);
    }

    w.line(format!("/// Client of the `{}` API.", api.name));
    w.line("#[derive(Debug, Clone)]");
    w.open("pub struct Client");
    w.line("base_url: String,");
    w.line("http: reqwest::blocking::Client,");
    w.close("}");
    w.blank();

    w.open("impl Client");
    w.line("/// Creates a client sending requests to `base_url`.");
    w.line("#[must_use]");
    w.open("pub fn new(base_url: impl Into<String>) -> Self");
    w.line("Self::with_http_client(base_url, reqwest::blocking::Client::new())");
    w.close("}");
    w.blank();
    w.line("/// Creates a client sending requests through `http`.");
    w.line("#[must_use]");
    w.open("pub fn with_http_client(base_url: impl Into<String>, http: reqwest::blocking::Client) -> Self");
    w.line("let base_url = base_url.into().trim_end_matches('/').to_string();");
    w.line("Self { base_url, http }");
    w.close("}");
    for sig in &sigs {
        w.blank();
        write_method(&mut w, ctx, version, api, sig, &errors);
    }
    w.close("}");

    let path = ctx.generated_path(&format!(
        "{}/{}.rs",
        ctx.version_module(version),
        ctx.api_module(api)
    ));
    tracing::debug!(path = %path, operations = sigs.len(), "Generated client");
    Ok(generated_file(path, w))
}

/// Splits a URL template into a `format!` string and its arguments.
fn url_format(template: &str, url: &[ParamCodec<'_>]) -> (String, Vec<String>) {
    let mut format = String::new();
    let mut args = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(end) = rest[start..].find('}').map(|end| start + end) else {
            break;
        };
        format.push_str(&rest[..start]);
        format.push_str("{}");
        let name = &rest[start + 1..end];
        if let Some(codec) = url.iter().find(|codec| codec.param.name.as_str() == name) {
            args.push(codec.url_arg());
        }
        rest = &rest[end + 1..];
    }
    format.push_str(rest);
    (format, args)
}

fn write_method(
    w: &mut CodeWriter,
    ctx: &EmitContext<'_>,
    version: &Version,
    api: &Api,
    sig: &Signature<'_>,
    errors: &[ErrorVariant],
) {
    let operation = sig.operation;
    let operation_id = literal(&format!("{}.{}", api.name, operation.name));
    let method = operation.endpoint.method.as_str();
    let params = sig.client_params(ctx.naming, TypePaths::API);
    let separator = if params.is_empty() { "" } else { ", " };

    w.doc(operation.description.as_deref());
    if operation.description.is_some() {
        w.line("///");
    }
    w.line(format!(
        "/// Sends `{method} {}{}`.",
        version.url_prefix(),
        operation.endpoint.url
    ));
    w.line("///");
    w.line("/// # Errors");
    w.line("///");
    w.line("/// Returns [`ClientError`] for declared error responses, unexpected");
    w.line("/// status codes and transport or decoding failures.");
    w.open(format!(
        "pub fn {}(&self{separator}{}) -> Result<{}, ClientError>",
        sig.fn_name,
        Signature::render_params(&params),
        sig.return_type(ctx.naming, TypePaths::API)
    ));

    let (format, args) = url_format(
        &format!("{}{}", version.url_prefix(), operation.endpoint.url),
        &sig.url,
    );
    let args: String = args.iter().map(|arg| format!(", {arg}")).collect();
    w.line(format!(
        "let request_url = format!({}, self.base_url{args});",
        literal(&format!("{{}}{format}"))
    ));
    w.line(format!(
        "tracing::info!(operation_id = {operation_id}, method = {}, url = %request_url, \"Sending request\");",
        literal(method)
    ));
    w.line(format!(
        "let request_builder = self.http.request(reqwest::Method::{method}, &request_url);"
    ));

    if !sig.query.is_empty() {
        encode_group(w, "query_writer", "", &sig.query);
        w.line("let request_builder = request_builder.query(&query_writer.into_pairs());");
    }
    if !sig.header.is_empty() {
        encode_group(w, "header_writer", "", &sig.header);
        w.line("let request_builder = header_writer");
        w.indent();
        w.line(".into_pairs()");
        w.line(".into_iter()");
        w.line(".fold(request_builder, |builder, (name, value)| builder.header(name, value));");
        w.dedent();
    }
    write_body(w, sig);

    w.line("let http_response = request_builder.send().map_err(ClientError::Transport)?;");
    w.line("let status = http_response.status().as_u16();");
    w.line(format!(
        "tracing::info!(operation_id = {operation_id}, status, \"Received response\");"
    ));
    client_dispatch(w, sig, errors, ctx.naming);
    w.close("}");
}

fn write_body(w: &mut CodeWriter, sig: &Signature<'_>) {
    match &sig.body {
        BodyShape::None => {}
        BodyShape::Text => {
            w.line("let request_builder = request_builder");
            w.indent();
            w.line(".header(reqwest::header::CONTENT_TYPE, \"text/plain\")");
            w.line(".body(body.to_string());");
            w.dedent();
        }
        BodyShape::Json(_) => w.line("let request_builder = request_builder.json(body);"),
        BodyShape::Form {
            fields, multipart, ..
        } => {
            if fields.is_empty() {
                w.line("let form_writer = ParamsWriter::new();");
            } else {
                encode_group(w, "form_writer", "body.", fields);
            }
            if *multipart {
                w.line("let multipart_form = form_writer");
                w.indent();
                w.line(".into_pairs()");
                w.line(".into_iter()");
                w.line(".fold(reqwest::blocking::multipart::Form::new(), |form, (name, value)| {");
                w.indent();
                w.line("form.text(name, value)");
                w.dedent();
                w.line("});");
                w.dedent();
                w.line("let request_builder = request_builder.multipart(multipart_form);");
            } else {
                w.line("let request_builder = request_builder.form(&form_writer.into_pairs());");
            }
        }
    }
}
