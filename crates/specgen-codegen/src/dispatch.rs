//! Response Dispatch Codegen.
//!
//! The client matches the received status code against the declared
//! responses in declaration order, then against the error taxonomy (the
//! three standard errors first, API-specific errors after), and reports any
//! other status as unexpected. The service maps each success variant to a
//! writer call with its status code and hands service errors to the
//! generated `respond_error`.

use crate::common::CodeWriter;
use crate::naming::NamingPolicy;
use crate::resolver::{Resolver, TargetType, TypePaths};
use crate::signature::{Payload, Returns, Signature};
use specgen_core::{Error, HttpErrors, Location, Result};

/// One entry of the error taxonomy.
#[derive(Debug, Clone)]
pub struct ErrorVariant {
    /// Variant name of `ClientError` / `ServiceError`
    pub name: String,
    /// Status tag as declared
    pub status: String,
    /// HTTP status code
    pub code: u16,
    /// Resolved body type
    pub ty: TargetType,
    /// `true` for the three standard errors
    pub standard: bool,
    /// Optional documentation
    pub description: Option<String>,
}

/// Resolves the error taxonomy, standard errors first.
///
/// # Errors
///
/// Returns a resolution or status error for an unvalidated taxonomy.
pub fn error_variants(errors: &HttpErrors, naming: &dyn NamingPolicy) -> Result<Vec<ErrorVariant>> {
    let resolver = Resolver::for_errors(errors);
    let at = Location::root().child("http_errors");
    let standard_count = errors.all_responses().len() - errors.responses.len();
    errors
        .all_responses()
        .into_iter()
        .enumerate()
        .map(|(index, response)| {
            let location = at.child(response.status.as_str());
            let code = response.status.code().ok_or_else(|| Error::UnknownStatus {
                status: response.status.to_string(),
                location: location.clone(),
            })?;
            Ok(ErrorVariant {
                name: naming.variant_name(response.status.as_str()),
                status: response.status.to_string(),
                code,
                ty: resolver.resolve(&response.ty, &location)?,
                standard: index < standard_count,
                description: response.description,
            })
        })
        .collect()
}

/// Writes the status matching of a client method. `http_response` holds the
/// received response and `status` its code.
pub fn client_dispatch(
    w: &mut CodeWriter,
    sig: &Signature<'_>,
    errors: &[ErrorVariant],
    naming: &dyn NamingPolicy,
) {
    for variant in sig.returns.variants() {
        w.open(format!("if status == {}", variant.code));
        let value = match &variant.payload {
            Payload::Empty => {
                w.line("response::empty(http_response)?;");
                None
            }
            Payload::Text => {
                w.line("let result = response::text(http_response)?;");
                Some("result")
            }
            Payload::Json(ty) => {
                w.line(format!(
                    "let result: {} = response::json(http_response)?;",
                    ty.render(naming, TypePaths::API)
                ));
                Some("result")
            }
        };
        let returned = match (&sig.returns, value) {
            (Returns::Single(_), None) => "()".to_string(),
            (Returns::Single(_), Some(value)) => value.to_string(),
            (Returns::Multi { enum_name, .. }, None) => format!("{enum_name}::{}", variant.name),
            (Returns::Multi { enum_name, .. }, Some(value)) => {
                format!("{enum_name}::{}({value})", variant.name)
            }
        };
        w.line(format!("return Ok({returned});"));
        w.close("}");
    }
    for error in errors {
        w.open(format!("if status == {}", error.code));
        w.line(format!(
            "let error: {} = response::json(http_response)?;",
            error.ty.render(naming, TypePaths::API)
        ));
        w.line(format!("return Err(ClientError::{}(error));", error.name));
        w.close("}");
    }
    w.line("Err(ClientError::UnexpectedStatus(status))");
}

/// Writes the `match` turning the service result into a response.
pub fn service_dispatch(w: &mut CodeWriter, sig: &Signature<'_>, call: &str) {
    w.open(format!("match {call}"));
    for variant in sig.returns.variants() {
        let code = variant.code;
        let (pattern, writer) = match &variant.payload {
            Payload::Empty => (None, format!("respond::empty(&log_fields, {code})")),
            Payload::Text => (
                Some("response"),
                format!("respond::text(&log_fields, {code}, response)"),
            ),
            Payload::Json(_) => (
                Some("response"),
                format!("respond::json(&log_fields, {code}, &response)"),
            ),
        };
        let matched = match (&sig.returns, pattern) {
            (Returns::Single(_), None) => "()".to_string(),
            (Returns::Single(_), Some(binding)) => binding.to_string(),
            (Returns::Multi { enum_name, .. }, None) => format!("{enum_name}::{}", variant.name),
            (Returns::Multi { enum_name, .. }, Some(binding)) => {
                format!("{enum_name}::{}({binding})", variant.name)
            }
        };
        w.line(format!("Ok({matched}) => {writer},"));
    }
    w.line("Err(error) => errors::respond_error(&log_fields, error),");
    w.close("}");
}
