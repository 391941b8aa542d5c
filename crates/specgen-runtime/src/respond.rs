//! Response writers for generated handlers.
//!
//! Every writer logs the outcome with the [`LogFields`] of the operation.

use super::errmodels::{BadRequestError, InternalServerError, NotFoundError};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Identifies the operation in every log line of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFields {
    /// `<api>.<operation>`
    pub operation_id: &'static str,
    /// HTTP method
    pub method: &'static str,
    /// URL template
    pub url: &'static str,
}

impl LogFields {
    /// Creates the log fields of an operation.
    #[must_use]
    pub const fn new(operation_id: &'static str, method: &'static str, url: &'static str) -> Self {
        Self {
            operation_id,
            method,
            url,
        }
    }

    /// Logs the arrival of a request.
    pub fn received(&self) {
        tracing::info!(
            operation_id = self.operation_id,
            method = self.method,
            url = self.url,
            "Received request"
        );
    }

    fn completed(&self, status: u16) {
        tracing::info!(
            operation_id = self.operation_id,
            method = self.method,
            url = self.url,
            status,
            "Completed request"
        );
    }
}

/// Writes a JSON body.
pub fn json<T: Serialize>(log: &LogFields, status: u16, data: &T) -> Response {
    match serde_json::to_vec(data) {
        Ok(body) => {
            log.completed(status);
            with_body(status, "application/json", body)
        }
        Err(error) => {
            internal_server_error(log, format!("Failed to serialize response body: {error}"))
        }
    }
}

/// Writes a plain text body.
pub fn text(log: &LogFields, status: u16, data: impl Into<String>) -> Response {
    log.completed(status);
    with_body(status, "text/plain", data.into().into_bytes())
}

/// Writes a response without a body.
pub fn empty(log: &LogFields, status: u16) -> Response {
    log.completed(status);
    status_code(status).into_response()
}

/// Writes a 400 response.
pub fn bad_request(log: &LogFields, error: BadRequestError) -> Response {
    tracing::warn!(
        operation_id = log.operation_id,
        location = ?error.location,
        message = %error.message,
        errors = error.errors.len(),
        "Bad request"
    );
    json(log, 400, &error)
}

/// Writes a 404 response.
pub fn not_found(log: &LogFields, message: impl Into<String>) -> Response {
    let error = NotFoundError {
        message: message.into(),
    };
    tracing::warn!(operation_id = log.operation_id, message = %error.message, "Not found");
    json(log, 404, &error)
}

/// Writes a 500 response.
pub fn internal_server_error(log: &LogFields, message: impl Into<String>) -> Response {
    let error = InternalServerError {
        message: message.into(),
    };
    tracing::error!(operation_id = log.operation_id, message = %error.message, "Internal server error");
    let body = serde_json::to_vec(&error).unwrap_or_default();
    log.completed(500);
    with_body(500, "application/json", body)
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn with_body(status: u16, content_type: &'static str, body: Vec<u8>) -> Response {
    (status_code(status), [(header::CONTENT_TYPE, content_type)], body).into_response()
}
