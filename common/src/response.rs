//! API response wrapper types.
//!
//! Every JSON endpoint of the migration backend answers with the same
//! envelope, and the client decodes it in exactly one place. There is no
//! per-endpoint "bare array or wrapped object" branching anywhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response wrapper.
///
/// All endpoints return responses in this format for consistency.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,

    /// Response data (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error details (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// Response metadata.
    pub meta: ResponseMeta,
}

/// API error details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code for client handling (e.g. "VALIDATION_ERROR", "NOT_FOUND").
    pub code: String,

    /// Human-readable error message.
    pub message: String,

    /// Additional error details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Response metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResponseMeta {
    /// Request ID for tracing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Response timestamp.
    pub timestamp: DateTime<Utc>,

    /// Service name that handled the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            request_id: None,
            timestamp: Utc::now(),
            service: None,
        }
    }
}

impl ResponseMeta {
    /// Creates a new ResponseMeta with service name.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
            ..Default::default()
        }
    }
}

impl<T> ApiResponse<T> {
    /// Creates a successful response with data.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: ResponseMeta::default(),
        }
    }

    /// Creates a successful response with service name.
    pub fn ok_with_service(data: T, service: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: ResponseMeta::with_service(service),
        }
    }

    /// Sets the request ID on the response.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.meta.request_id = Some(request_id.into());
        self
    }
}

impl ApiResponse<()> {
    /// Creates an error response.
    pub fn err(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
                details: None,
            }),
            meta: ResponseMeta::default(),
        }
    }

    /// Creates an error response with details.
    pub fn err_with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            }),
            meta: ResponseMeta::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_round_trips() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1u32, 2, 3])).unwrap();
        let parsed: ApiResponse<Vec<u32>> = serde_json::from_value(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.data.unwrap(), vec![1, 2, 3]);
        assert!(parsed.error.is_none());
    }

    #[test]
    fn err_envelope_carries_code_and_message() {
        let body = serde_json::to_value(ApiResponse::err("NOT_FOUND", "server 7 not found")).unwrap();
        let parsed: ApiResponse<serde_json::Value> = serde_json::from_value(body).unwrap();
        assert!(!parsed.success);
        let error = parsed.error.unwrap();
        assert_eq!(error.code, "NOT_FOUND");
        assert_eq!(error.message, "server 7 not found");
    }
}
