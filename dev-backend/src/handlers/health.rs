//! Health check handler.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use common::models::status::{HealthStatus, InventoryCounts};
use common::response::ApiResponse;

use super::SERVICE_NAME;
use crate::state::AppState;

/// Health check with inventory counts.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = ApiResponse<HealthStatus>)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let (servers, databases, file_shares) = state.store.counts().await;
    Json(ApiResponse::ok_with_service(
        HealthStatus {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            inventory: InventoryCounts {
                servers,
                databases,
                file_shares,
            },
        },
        SERVICE_NAME,
    ))
}
