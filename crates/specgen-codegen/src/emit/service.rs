//! Service emission: the trait of every API, its axum handlers and router,
//! and the root router merging every API.
//!
//! A handler walks the request through fixed stages: URL parameters, header
//! parameters, query parameters, then the body, then the service call. Each
//! stage returns the error response of its first failing group.

use super::{
    EmitContext, generated_file, generated_writer, write_form_struct, write_response_enum,
};
use crate::common::{CodeWriter, GeneratedFile, Imports};
use crate::dispatch::service_dispatch;
use crate::marshal::{DecodeGroup, decode_group, literal};
use crate::naming::unraw;
use crate::resolver::{Resolver, TypePaths};
use crate::signature::{BodyShape, Signature};
use crate::usage::{
    api_has_body_of_kind, api_has_map, api_has_params, api_has_type, api_reads_headers,
    api_uses_error_models, api_uses_models, api_uses_standard_errors,
};
use specgen_core::{Api, BodyKind, Location, ParamLocation, RequestBody, Result, Version};

/// Name of the service trait of an API.
#[must_use]
pub fn trait_name(ctx: &EmitContext<'_>, api: &Api) -> String {
    format!("{}Service", ctx.naming.type_name(api.name.as_str()))
}

/// Builds the signatures of every operation of an API.
///
/// # Errors
///
/// Returns a resolution error for an unvalidated operation.
pub fn signatures<'a>(
    ctx: &EmitContext<'_>,
    version: &'a Version,
    api: &'a Api,
) -> Result<Vec<Signature<'a>>> {
    let resolver = Resolver::for_version(version, &ctx.spec.http_errors);
    let at = Location::root()
        .child(ctx.version_module(version))
        .child(api.name.as_str());
    api.operations
        .iter()
        .map(|op| Signature::build(op, &resolver, ctx.naming, &at.child(op.name.as_str())))
        .collect()
}

/// Emits `<version>/<api>/mod.rs` and `<version>/<api>/routing.rs`.
///
/// # Errors
///
/// Returns a resolution error for an unvalidated API.
pub fn emit_api(ctx: &EmitContext<'_>, version: &Version, api: &Api) -> Result<Vec<GeneratedFile>> {
    let sigs = signatures(ctx, version, api)?;
    let dir = format!("{}/{}", ctx.version_module(version), ctx.api_module(api));
    let module = generated_file(
        ctx.generated_path(&format!("{dir}/mod.rs")),
        api_module(ctx, version, api, &sigs),
    );
    let routing = generated_file(
        ctx.generated_path(&format!("{dir}/routing.rs")),
        api_routing(ctx, version, api, &sigs),
    );
    tracing::debug!(api = %api.name, operations = sigs.len(), "Generated service API");
    Ok(vec![module, routing])
}

/// Imports naming the models and types of an API's signatures.
pub fn api_type_imports(ctx: &EmitContext<'_>, version: &Version, api: &Api, imports: &mut Imports) {
    let root = ctx.root();
    imports.add_if(
        api_uses_models(api, version),
        format!("{}::models", ctx.version_path(version)),
    );
    imports.add_if(
        api_uses_error_models(api, &ctx.spec.http_errors),
        format!("{root}::errors"),
    );
    imports.add_if(api_uses_standard_errors(api), format!("{root}::errmodels"));
    ctx.type_imports(
        imports,
        |primitive| api_has_type(api, primitive),
        api_has_map(api),
    );
}

fn api_module(ctx: &EmitContext<'_>, version: &Version, api: &Api, sigs: &[Signature<'_>]) -> CodeWriter {
    let mut imports = Imports::new();
    imports.add(format!("{}::errors::ServiceError", ctx.root()));
    api_type_imports(ctx, version, api, &mut imports);

    let mut w = generated_writer();
    w.line("pub mod routing;");
    w.blank();
    imports.write(&mut w);

    for sig in sigs {
        write_form_struct(&mut w, sig, ctx.naming);
        write_response_enum(&mut w, sig, ctx.naming);
    }

    w.line(format!("/// Operations of the `{}` API.", api.name));
    w.line("#[async_trait::async_trait]");
    w.open(format!("pub trait {}: Send + Sync", trait_name(ctx, api)));
    for (index, sig) in sigs.iter().enumerate() {
        if index > 0 {
            w.blank();
        }
        w.doc(sig.operation.description.as_deref());
        let params = sig.service_params(ctx.naming, TypePaths::API);
        let separator = if params.is_empty() { "" } else { ", " };
        w.line(format!(
            "async fn {}(&self{separator}{}) -> Result<{}, ServiceError>;",
            sig.fn_name,
            Signature::render_params(&params),
            sig.return_type(ctx.naming, TypePaths::API)
        ));
    }
    w.close("}");
    w
}

#[allow(clippy::struct_excessive_bools)]
struct RoutingImports {
    url: bool,
    query: bool,
    header: bool,
    form: bool,
    multipart: bool,
    urlencoded: bool,
    urlencoded_fields: bool,
    text: bool,
    json: bool,
}

impl RoutingImports {
    fn of(api: &Api) -> Self {
        Self {
            url: api_has_params(api, ParamLocation::Url),
            query: api_has_params(api, ParamLocation::Query),
            header: api_has_params(api, ParamLocation::Header),
            form: api_has_params(api, ParamLocation::Form),
            multipart: api_has_body_of_kind(api, BodyKind::FormData),
            urlencoded: api_has_body_of_kind(api, BodyKind::FormUrlEncoded),
            urlencoded_fields: api.operations.iter().any(|op| {
                matches!(&op.body, RequestBody::FormUrlEncoded { params } if !params.is_empty())
            }),
            text: api_has_body_of_kind(api, BodyKind::RawString),
            json: api_has_body_of_kind(api, BodyKind::Json),
        }
    }

    fn write(&self, ctx: &EmitContext<'_>, api: &Api, w: &mut CodeWriter) {
        let root = ctx.root();
        let any_body = self.multipart || self.urlencoded || self.text || self.json;
        let bad_request = self.query || self.header || self.form || self.text;

        let mut imports = Imports::new();
        imports.add(format!("{root}::errors"));
        imports.add(format!("{root}::respond::{{self, LogFields}}"));
        imports.add_if(
            self.url || self.query || self.header || self.form,
            format!("{root}::params::ParamsParser"),
        );
        imports.add_if(
            bad_request,
            format!("{root}::errmodels::{{BadRequestError, ErrorLocation}}"),
        );
        imports.add_if(self.query || self.header || self.form, format!("{root}::convert"));
        imports.add_if(self.header || any_body, format!("{root}::content_type"));
        imports.add_if(self.json, format!("{root}::json"));
        imports.add_if(self.multipart || self.urlencoded_fields, format!("{root}::form"));

        imports.add("axum::Router");
        imports.add("axum::extract::State");
        imports.add("axum::response::Response");
        imports.add("axum::routing::{MethodFilter, on}");
        imports.add_if(self.url, "axum::extract::Path");
        imports.add_if(self.query, "axum::extract::Query");
        imports.add_if(self.multipart, "axum::extract::Multipart");
        imports.add_if(self.multipart, "axum::extract::multipart::MultipartRejection");
        imports.add_if(api_reads_headers(api), "axum::http::HeaderMap");
        imports.add_if(self.urlencoded_fields || self.text || self.json, "axum::body::Bytes");
        imports.add("std::sync::Arc");

        w.line("use super::*;");
        imports.write(w);
    }
}

fn api_routing(ctx: &EmitContext<'_>, version: &Version, api: &Api, sigs: &[Signature<'_>]) -> CodeWriter {
    let mut w = generated_writer();
    RoutingImports::of(api).write(ctx, api, &mut w);

    let prefix = version.url_prefix();
    let mut paths: Vec<(String, Vec<&Signature<'_>>)> = Vec::new();
    for sig in sigs {
        let path = format!("{prefix}{}", sig.operation.endpoint.url);
        match paths.iter_mut().find(|(existing, _)| *existing == path) {
            Some((_, group)) => group.push(sig),
            None => paths.push((path, vec![sig])),
        }
    }

    w.line(format!("/// Router of the `{}` API.", api.name));
    w.open(format!(
        "pub fn routes(service: Arc<dyn {}>) -> Router",
        trait_name(ctx, api)
    ));
    w.line("Router::new()");
    w.indent();
    for (path, group) in &paths {
        let methods: Vec<String> = group
            .iter()
            .map(|sig| {
                format!(
                    "on(MethodFilter::{}, {})",
                    sig.operation.endpoint.method, sig.fn_name
                )
            })
            .collect();
        w.line(format!(".route({}, {})", literal(path), methods.join(".")));
    }
    w.line(".with_state(service)");
    w.dedent();
    w.close("}");

    for sig in sigs {
        w.blank();
        write_handler(&mut w, ctx, api, &prefix, sig);
    }
    w
}

fn bad_request(location: &str, message: &str) -> String {
    format!(
        "return respond::bad_request(&log_fields, BadRequestError::new(ErrorLocation::{location}, \
         {message:?}, convert::validation_errors({{errors}})));"
    )
}

fn write_content_type_check(w: &mut CodeWriter, expected: &str) {
    w.open(format!(
        "if let Err(response) = content_type::check(&log_fields, &request_headers, {})",
        literal(expected)
    ));
    w.line("return response;");
    w.close("}");
}

fn write_handler(w: &mut CodeWriter, ctx: &EmitContext<'_>, api: &Api, prefix: &str, sig: &Signature<'_>) {
    let operation = sig.operation;
    let mut extractors = vec![format!(
        "State(service_impl): State<Arc<dyn {}>>",
        trait_name(ctx, api)
    )];
    if !sig.url.is_empty() {
        extractors.push("Path(url_pairs): Path<Vec<(String, String)>>".to_string());
    }
    if !sig.query.is_empty() {
        extractors.push("Query(query_pairs): Query<Vec<(String, String)>>".to_string());
    }
    let multipart = matches!(sig.body, BodyShape::Form { multipart: true, .. });
    if !sig.header.is_empty() || !matches!(sig.body, BodyShape::None) {
        extractors.push("request_headers: HeaderMap".to_string());
    }
    match &sig.body {
        BodyShape::None => {}
        BodyShape::Form { multipart: true, .. } => {
            extractors.push("multipart_body: Result<Multipart, MultipartRejection>".to_string());
        }
        // An empty urlencoded form is never read
        BodyShape::Form { fields, .. } if fields.is_empty() => {}
        BodyShape::Text | BodyShape::Json(_) | BodyShape::Form { .. } => {
            extractors.push("request_body: Bytes".to_string());
        }
    }

    w.line(format!("async fn {}(", sig.fn_name));
    w.indent();
    for extractor in &extractors {
        w.line(format!("{extractor},"));
    }
    w.dedent();
    w.open(") -> Response");

    let operation_id = format!("{}.{}", api.name, operation.name);
    let url = format!("{prefix}{}", operation.endpoint.url);
    w.line(format!(
        "let log_fields = LogFields::new({}, {}, {});",
        literal(&operation_id),
        literal(operation.endpoint.method.as_str()),
        literal(&url)
    ));
    w.line("log_fields.received();");

    decode_group(
        w,
        DecodeGroup {
            parser: "url_parser",
            source: "ParamsParser::url(url_pairs)",
            on_error: "return respond::not_found(&log_fields, \"Failed to parse url parameters\");",
        },
        &sig.url,
        ctx.naming,
    );
    decode_group(
        w,
        DecodeGroup {
            parser: "header_parser",
            source: "ParamsParser::header(content_type::header_pairs(&request_headers))",
            on_error: &bad_request("Header", "Failed to parse header"),
        },
        &sig.header,
        ctx.naming,
    );
    decode_group(
        w,
        DecodeGroup {
            parser: "query_parser",
            source: "ParamsParser::query(query_pairs)",
            on_error: &bad_request("Query", "Failed to parse query"),
        },
        &sig.query,
        ctx.naming,
    );
    write_body_decoding(w, ctx, sig, multipart);

    let mut args: Vec<&str> = Vec::new();
    if !matches!(sig.body, BodyShape::None) {
        args.push("body");
    }
    args.extend(sig.params().map(|codec| codec.ident.as_str()));
    service_dispatch(
        w,
        sig,
        &format!("service_impl.{}({}).await", sig.fn_name, args.join(", ")),
    );
    w.close("}");
}

fn write_body_decoding(w: &mut CodeWriter, ctx: &EmitContext<'_>, sig: &Signature<'_>, multipart: bool) {
    match &sig.body {
        BodyShape::None => {}
        BodyShape::Text => {
            write_content_type_check(w, "text/plain");
            w.open("let body = match String::from_utf8(request_body.to_vec())");
            w.line("Ok(body) => body,");
            w.open("Err(error) =>");
            w.line("return respond::bad_request(");
            w.indent();
            w.line("&log_fields,");
            w.line("BadRequestError::new(");
            w.indent();
            w.line("ErrorLocation::Body,");
            w.line("format!(\"Reading request body failed: {error}\"),");
            w.line("Vec::new(),");
            w.dedent();
            w.line("),");
            w.dedent();
            w.line(");");
            w.close("}");
            w.close("};");
        }
        BodyShape::Json(ty) => {
            write_content_type_check(w, "application/json");
            w.open(format!(
                "let body: {} = match json::decode(&request_body)",
                ty.render(ctx.naming, TypePaths::API)
            ));
            w.line("Ok(body) => body,");
            w.line("Err(error) => return respond::bad_request(&log_fields, error),");
            w.close("};");
        }
        BodyShape::Form {
            struct_name,
            fields,
            ..
        } => {
            let expected = if multipart {
                "multipart/form-data"
            } else {
                "application/x-www-form-urlencoded"
            };
            write_content_type_check(w, expected);
            if fields.is_empty() {
                if multipart {
                    w.open("if let Err(error) = form::multipart_pairs(multipart_body).await");
                    w.line("return respond::bad_request(&log_fields, error);");
                    w.close("}");
                }
                w.line(format!("let body = {struct_name} {{}};"));
                return;
            }
            let source = if multipart {
                w.open("let form_pairs = match form::multipart_pairs(multipart_body).await");
                w.line("Ok(pairs) => pairs,");
                w.line("Err(error) => return respond::bad_request(&log_fields, error),");
                w.close("};");
                "ParamsParser::form(form_pairs)"
            } else {
                "ParamsParser::form(form::urlencoded_pairs(&request_body))"
            };
            w.open("let body =");
            decode_group(
                w,
                DecodeGroup {
                    parser: "form_parser",
                    source,
                    on_error: &bad_request("Body", "Failed to parse body"),
                },
                fields,
                ctx.naming,
            );
            let idents: Vec<&str> = fields.iter().map(|codec| codec.ident.as_str()).collect();
            w.line(format!("{struct_name} {{ {} }}", idents.join(", ")));
            w.close("};");
        }
    }
}

/// Emits the root `routing.rs` merging the router of every API.
#[must_use]
pub fn emit_root_routing(ctx: &EmitContext<'_>) -> GeneratedFile {
    let mut w = generated_writer();
    w.line("use axum::Router;");
    let apis: Vec<(String, String, String)> = ctx
        .spec
        .versions
        .iter()
        .flat_map(|version| {
            version.apis.iter().map(move |api| {
                let binding = format!(
                    "{}_{}",
                    unraw(&ctx.version_module(version)),
                    unraw(&ctx.api_module(api))
                );
                let module = format!("{}::{}", ctx.version_path(version), ctx.api_module(api));
                (binding, module, trait_name(ctx, api))
            })
        })
        .collect();
    if !apis.is_empty() {
        w.line("use std::sync::Arc;");
    }
    w.blank();

    w.line("/// Router serving every API of every version.");
    let params: Vec<String> = apis
        .iter()
        .map(|(binding, module, name)| format!("{binding}: Arc<dyn {module}::{name}>"))
        .collect();
    w.open(format!("pub fn routes({}) -> Router", params.join(", ")));
    w.line("Router::new()");
    w.indent();
    for (binding, module, _) in &apis {
        w.line(format!(".merge({module}::routing::routes({binding}))"));
    }
    w.dedent();
    w.close("}");

    generated_file(ctx.generated_path("routing.rs"), w)
}
