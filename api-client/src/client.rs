//! Typed endpoint methods over an [`ApiTransport`].

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use common::errors::{AppError, AppResult};
use common::models::{
    CostReport, DashboardSummary, ExportArtifact, ExportRequest, HealthStatus, InventoryEntity,
    SingletonEntity, StrategyReport, TimelineReport,
};
use common::response::ApiResponse;

use crate::transport::{ApiTransport, ResponsePayload};

/// Typed client for every backend endpoint the dashboard uses.
///
/// Envelope interpretation happens in exactly one place ([`decode`]):
/// a 2xx envelope yields its data, an envelope-reported failure yields
/// the backend's own error wording, and a non-2xx response surfaces the
/// backend message verbatim when one was supplied.
pub struct MigrationClient<T> {
    transport: T,
}

impl<T: ApiTransport> MigrationClient<T> {
    /// Wraps a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    // -- inventory collections ---------------------------------------------

    /// Fetches the full collection for an inventory entity.
    pub async fn list<E: InventoryEntity>(&self) -> AppResult<Vec<E>> {
        let payload = self.transport.get(&format!("/api/{}", E::COLLECTION)).await?;
        decode(payload)
    }

    /// Creates a record and returns the stored row.
    pub async fn create<E: InventoryEntity>(&self, draft: &E::Draft) -> AppResult<E> {
        let body = to_body(draft)?;
        let payload = self
            .transport
            .post(&format!("/api/{}", E::COLLECTION), body)
            .await?;
        decode(payload)
    }

    /// Updates a record in place and returns the stored row.
    pub async fn update<E: InventoryEntity>(&self, id: i64, draft: &E::Draft) -> AppResult<E> {
        let body = to_body(draft)?;
        let payload = self
            .transport
            .put(&format!("/api/{}/{id}", E::COLLECTION), body)
            .await?;
        decode(payload)
    }

    /// Deletes a record by id.
    pub async fn delete<E: InventoryEntity>(&self, id: i64) -> AppResult<()> {
        let payload = self
            .transport
            .delete(&format!("/api/{}/{id}", E::COLLECTION))
            .await?;
        let _: bool = decode(payload)?;
        Ok(())
    }

    // -- singleton configuration -------------------------------------------

    /// Fetches a singleton record; `None` when nothing is configured yet.
    pub async fn fetch_singleton<S: SingletonEntity>(&self) -> AppResult<Option<S>> {
        let payload = self.transport.get(&format!("/api/{}", S::PATH)).await?;
        decode_optional(payload)
    }

    /// Creates the singleton record (first save).
    pub async fn create_singleton<S: SingletonEntity>(&self, draft: &S::Draft) -> AppResult<S> {
        let body = to_body(draft)?;
        let payload = self.transport.post(&format!("/api/{}", S::PATH), body).await?;
        decode(payload)
    }

    /// Updates the existing singleton record.
    pub async fn update_singleton<S: SingletonEntity>(
        &self,
        id: i64,
        draft: &S::Draft,
    ) -> AppResult<S> {
        let body = to_body(draft)?;
        let payload = self
            .transport
            .put(&format!("/api/{}/{id}", S::PATH), body)
            .await?;
        decode(payload)
    }

    // -- computed reports ---------------------------------------------------

    /// Fetches the aggregated dashboard overview.
    pub async fn dashboard(&self) -> AppResult<DashboardSummary> {
        decode(self.transport.get("/api/dashboard").await?)
    }

    /// Fetches the cost estimation report.
    pub async fn cost_estimation(&self) -> AppResult<CostReport> {
        decode(self.transport.get("/api/cost-estimation").await?)
    }

    /// Fetches the migration strategy report.
    pub async fn migration_strategy(&self) -> AppResult<StrategyReport> {
        decode(self.transport.get("/api/migration-strategy").await?)
    }

    /// Requests a timeline, optionally anchored at a caller-chosen start date.
    pub async fn timeline(&self, start_date: Option<NaiveDate>) -> AppResult<TimelineReport> {
        let body = match start_date {
            Some(date) => serde_json::json!({ "start_date": date }),
            None => serde_json::json!({}),
        };
        decode(self.transport.post("/api/timeline", body).await?)
    }

    // -- exports -------------------------------------------------------------

    /// Triggers report generation on the backend.
    pub async fn export(&self, request: &ExportRequest) -> AppResult<ExportArtifact> {
        let body = to_body(request)?;
        decode(self.transport.post("/api/export", body).await?)
    }

    /// Lists previously generated report files.
    pub async fn exports(&self) -> AppResult<Vec<ExportArtifact>> {
        decode(self.transport.get("/api/exports").await?)
    }

    /// Downloads a generated file's raw bytes.
    pub async fn download(&self, filename: &str) -> AppResult<Vec<u8>> {
        self.transport
            .get_bytes(&format!("/api/download/{filename}"))
            .await
    }

    // -- health --------------------------------------------------------------

    /// Fetches the backend health status.
    pub async fn health(&self) -> AppResult<HealthStatus> {
        decode(self.transport.get("/api/health").await?)
    }
}

fn to_body<B: Serialize>(body: &B) -> AppResult<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| AppError::Decode(e.to_string()))
}

/// Interprets a response envelope, requiring data on success.
fn decode<D: DeserializeOwned>(payload: ResponsePayload) -> AppResult<D> {
    decode_optional(payload)?.ok_or_else(|| {
        AppError::Decode("response envelope reported success without data".to_string())
    })
}

/// Interprets a response envelope, allowing an absent data field.
fn decode_optional<D: DeserializeOwned>(payload: ResponsePayload) -> AppResult<Option<D>> {
    let ok_status = (200..300).contains(&payload.status);

    let envelope: ApiResponse<D> = match serde_json::from_value(payload.body) {
        Ok(envelope) => envelope,
        Err(e) => {
            return if ok_status {
                Err(AppError::Decode(e.to_string()))
            } else {
                Err(AppError::Status {
                    status: payload.status,
                    message: format!("HTTP {}", payload.status),
                })
            };
        }
    };

    if let Some(error) = envelope.error {
        // Surface the backend's own wording.
        return if ok_status {
            Err(AppError::Backend {
                code: error.code,
                message: error.message,
            })
        } else {
            Err(AppError::Status {
                status: payload.status,
                message: error.message,
            })
        };
    }

    if !ok_status {
        return Err(AppError::Status {
            status: payload.status,
            message: format!("HTTP {}", payload.status),
        });
    }

    if !envelope.success {
        return Err(AppError::Backend {
            code: "UNKNOWN".to_string(),
            message: "backend reported failure without details".to_string(),
        });
    }

    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(status: u16, body: serde_json::Value) -> ResponsePayload {
        ResponsePayload { status, body }
    }

    #[test]
    fn success_envelope_yields_data() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1u32, 2])).unwrap();
        let rows: Vec<u32> = decode(payload(200, body)).unwrap();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn backend_error_message_is_kept_verbatim() {
        let body = serde_json::to_value(ApiResponse::err(
            "VALIDATION_ERROR",
            "server_id must be 1-100 characters",
        ))
        .unwrap();
        let err = decode::<Vec<u32>>(payload(400, body)).unwrap_err();
        match err {
            AppError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "server_id must be 1-100 characters");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body_becomes_plain_status() {
        let err = decode::<Vec<u32>>(payload(502, serde_json::Value::Null)).unwrap_err();
        match err {
            AppError::Status { status, .. } => assert_eq!(status, 502),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_on_success_is_a_decode_error() {
        let body = serde_json::json!({ "rows": [1, 2, 3] });
        let err = decode::<Vec<u32>>(payload(200, body)).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn missing_singleton_decodes_to_none() {
        let body = serde_json::json!({
            "success": true,
            "data": null,
            "meta": { "timestamp": "2026-01-01T00:00:00Z" }
        });
        let result: Option<serde_json::Value> = decode_optional(payload(200, body)).unwrap();
        assert!(result.is_none());
    }
}
