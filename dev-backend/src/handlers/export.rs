//! Export and download handlers.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use validator::Validate;

use common::errors::AppError;
use common::models::{ExportArtifact, ExportRequest};
use common::response::ApiResponse;

use super::SERVICE_NAME;
use crate::state::AppState;

type Reply<T> = Result<Json<ApiResponse<T>>, AppError>;

fn ok<T>(data: T) -> Reply<T> {
    Ok(Json(ApiResponse::ok_with_service(data, SERVICE_NAME)))
}

/// Generate a report file.
#[utoipa::path(
    post,
    path = "/api/export",
    tag = "export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Report generated", body = ApiResponse<ExportArtifact>),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn export_report(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Reply<ExportArtifact> {
    request.validate().map_err(AppError::from_validation)?;
    let snapshot = state.store.snapshot().await;
    let artifact = state.exporter.generate(&snapshot, &request)?;
    ok(artifact)
}

/// List generated report files, newest first.
#[utoipa::path(
    get,
    path = "/api/exports",
    tag = "export",
    responses(
        (status = 200, description = "Generated files", body = ApiResponse<Vec<ExportArtifact>>)
    )
)]
pub async fn list_exports(State(state): State<AppState>) -> Reply<Vec<ExportArtifact>> {
    ok(state.exporter.list()?)
}

/// Serve a generated file's raw bytes.
#[utoipa::path(
    get,
    path = "/api/download/{filename}",
    tag = "export",
    params(("filename" = String, Path, description = "Generated file name")),
    responses(
        (status = 200, description = "File bytes"),
        (status = 404, description = "File not found")
    )
)]
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.exporter.read(&filename)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
