//! HTTP transport for the backend API.

use std::time::Duration;

use async_trait::async_trait;

use common::config::BackendSettings;
use common::errors::{AppError, AppResult};
use common::utils::IdGenerator;

/// Raw outcome of one HTTP exchange: status plus the parsed JSON body.
///
/// A non-JSON body on an error status is represented as `Value::Null`;
/// the client layer turns that into a plain status error.
#[derive(Debug, Clone)]
pub struct ResponsePayload {
    /// HTTP status code.
    pub status: u16,
    /// Response body parsed as JSON.
    pub body: serde_json::Value,
}

/// Transport seam between the typed client and the wire.
///
/// The production implementation is [`HttpTransport`]; tests provide an
/// in-memory implementation serving canned envelopes.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issues a GET and returns the JSON payload.
    async fn get(&self, path: &str) -> AppResult<ResponsePayload>;

    /// Issues a POST with a JSON body.
    async fn post(&self, path: &str, body: serde_json::Value) -> AppResult<ResponsePayload>;

    /// Issues a PUT with a JSON body.
    async fn put(&self, path: &str, body: serde_json::Value) -> AppResult<ResponsePayload>;

    /// Issues a DELETE.
    async fn delete(&self, path: &str) -> AppResult<ResponsePayload>;

    /// Issues a GET and returns the raw bytes (file downloads).
    async fn get_bytes(&self, path: &str) -> AppResult<Vec<u8>>;
}

/// Reqwest-backed transport.
///
/// One client instance is built per process with the configured timeout;
/// every request goes through it, so no component can opt out of the
/// deadline. Each request carries a fresh `x-request-id` header for
/// correlation with backend logs.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport for the given backend settings.
    pub fn new(settings: &BackendSettings) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            base_url: settings.base_url.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> AppResult<ResponsePayload> {
        let request_id = IdGenerator::request_id();
        let response = request
            .header("x-request-id", &request_id)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_transport_error)?;

        let body = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) if (200..300).contains(&status) => {
                tracing::debug!(status, request_id = %request_id, "response body is not JSON");
                return Err(AppError::Decode(e.to_string()));
            }
            // Error statuses are allowed to carry non-JSON bodies.
            Err(_) => serde_json::Value::Null,
        };

        Ok(ResponsePayload { status, body })
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get(&self, path: &str) -> AppResult<ResponsePayload> {
        self.execute(self.client.get(self.url(path))).await
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> AppResult<ResponsePayload> {
        self.execute(self.client.post(self.url(path)).json(&body)).await
    }

    async fn put(&self, path: &str, body: serde_json::Value) -> AppResult<ResponsePayload> {
        self.execute(self.client.put(self.url(path)).json(&body)).await
    }

    async fn delete(&self, path: &str) -> AppResult<ResponsePayload> {
        self.execute(self.client.delete(self.url(path))).await
    }

    async fn get_bytes(&self, path: &str) -> AppResult<Vec<u8>> {
        let response = self
            .client
            .get(self.url(path))
            .header("x-request-id", IdGenerator::request_id())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                status: status.as_u16(),
                message: format!("download failed with HTTP {}", status.as_u16()),
            });
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        Ok(bytes.to_vec())
    }
}

fn map_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Timeout
    } else {
        AppError::Network(e.to_string())
    }
}
