//! Application error type.
//!
//! One taxonomy for every failure the dashboard can hit at a request
//! boundary: connectivity, non-2xx statuses, backend-reported errors,
//! malformed payloads and client-side validation. Handlers in the dev
//! backend return these directly; the envelope rendering lives in the
//! `IntoResponse` impl.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::response::ApiResponse;

/// Result alias used across all crates.
pub type AppResult<T> = Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request did not complete within the configured deadline.
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure before an HTTP status was received.
    #[error("backend unreachable: {0}")]
    Network(String),

    /// Non-2xx HTTP status. The message is the backend's own wording
    /// when the body carried a parseable envelope.
    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// A 2xx response whose envelope reported failure.
    #[error("{message}")]
    Backend { code: String, message: String },

    /// The response body did not match the expected envelope shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),

    /// Client-side validation rejected the payload before any request.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A record references a server identifier that is not in the
    /// currently loaded server inventory.
    #[error("{entity} references unknown server '{server_id}'")]
    DanglingReference { entity: &'static str, server_id: String },

    /// Requested record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Local I/O failure (e.g. writing a downloaded export).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Machine-readable code used in the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Timeout => "TIMEOUT",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Status { .. } => "UPSTREAM_STATUS",
            AppError::Backend { .. } => "BACKEND_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::DanglingReference { .. } => "DANGLING_REFERENCE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Io(_) => "IO_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::DanglingReference { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts `validator` errors into a single readable message.
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string().replace('\n', "; "))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(code = self.code(), error = %self, "request failed");
        let body = ApiResponse::err(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(AppError::Timeout.code(), "TIMEOUT");
        assert_eq!(
            AppError::DanglingReference { entity: "database", server_id: "srv-9".into() }.code(),
            "DANGLING_REFERENCE"
        );
    }

    #[test]
    fn dangling_reference_names_the_server() {
        let err = AppError::DanglingReference { entity: "file share", server_id: "web-01".into() };
        assert_eq!(err.to_string(), "file share references unknown server 'web-01'");
    }
}
