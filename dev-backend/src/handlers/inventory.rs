//! Inventory collection handlers.

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;

use common::errors::AppError;
use common::models::{
    DatabaseDraft, DatabaseItem, FileShareDraft, FileShareItem, ResourceRateDraft,
    ResourceRateItem, ServerDraft, ServerItem,
};
use common::response::ApiResponse;

use super::SERVICE_NAME;
use crate::state::AppState;

type Reply<T> = Result<Json<ApiResponse<T>>, AppError>;

fn ok<T>(data: T) -> Reply<T> {
    Ok(Json(ApiResponse::ok_with_service(data, SERVICE_NAME)))
}

// ---------------------------------------------------------------------------
// Servers

/// List the server inventory.
#[utoipa::path(
    get,
    path = "/api/servers",
    tag = "inventory",
    responses(
        (status = 200, description = "Server inventory", body = ApiResponse<Vec<ServerItem>>)
    )
)]
pub async fn list_servers(State(state): State<AppState>) -> Reply<Vec<ServerItem>> {
    ok(state.store.list_servers().await)
}

/// Add a server.
#[utoipa::path(
    post,
    path = "/api/servers",
    tag = "inventory",
    request_body = ServerDraft,
    responses(
        (status = 200, description = "Server created", body = ApiResponse<ServerItem>),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_server(
    State(state): State<AppState>,
    Json(draft): Json<ServerDraft>,
) -> Reply<ServerItem> {
    draft.validate().map_err(AppError::from_validation)?;
    let row = state.store.create_server(draft).await?;
    tracing::info!(id = row.id, server_id = %row.server_id, "server created");
    ok(row)
}

/// Update a server in place.
#[utoipa::path(
    put,
    path = "/api/servers/{id}",
    tag = "inventory",
    params(("id" = i64, Path, description = "Record id")),
    request_body = ServerDraft,
    responses(
        (status = 200, description = "Server updated", body = ApiResponse<ServerItem>),
        (status = 404, description = "Server not found")
    )
)]
pub async fn update_server(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<ServerDraft>,
) -> Reply<ServerItem> {
    draft.validate().map_err(AppError::from_validation)?;
    ok(state.store.update_server(id, draft).await?)
}

/// Delete a server by id.
#[utoipa::path(
    delete,
    path = "/api/servers/{id}",
    tag = "inventory",
    params(("id" = i64, Path, description = "Record id")),
    responses(
        (status = 200, description = "Server deleted", body = ApiResponse<bool>),
        (status = 404, description = "Server not found")
    )
)]
pub async fn delete_server(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<bool> {
    state.store.delete_server(id).await?;
    tracing::info!(id, "server deleted");
    ok(true)
}

// ---------------------------------------------------------------------------
// Databases

/// List the database inventory.
#[utoipa::path(
    get,
    path = "/api/databases",
    tag = "inventory",
    responses(
        (status = 200, description = "Database inventory", body = ApiResponse<Vec<DatabaseItem>>)
    )
)]
pub async fn list_databases(State(state): State<AppState>) -> Reply<Vec<DatabaseItem>> {
    ok(state.store.list_databases().await)
}

/// Add a database.
#[utoipa::path(
    post,
    path = "/api/databases",
    tag = "inventory",
    request_body = DatabaseDraft,
    responses(
        (status = 200, description = "Database created", body = ApiResponse<DatabaseItem>),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_database(
    State(state): State<AppState>,
    Json(draft): Json<DatabaseDraft>,
) -> Reply<DatabaseItem> {
    draft.validate().map_err(AppError::from_validation)?;
    let row = state.store.create_database(draft).await?;
    tracing::info!(id = row.id, name = %row.name, "database created");
    ok(row)
}

/// Update a database in place.
#[utoipa::path(
    put,
    path = "/api/databases/{id}",
    tag = "inventory",
    params(("id" = i64, Path, description = "Record id")),
    request_body = DatabaseDraft,
    responses(
        (status = 200, description = "Database updated", body = ApiResponse<DatabaseItem>),
        (status = 404, description = "Database not found")
    )
)]
pub async fn update_database(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<DatabaseDraft>,
) -> Reply<DatabaseItem> {
    draft.validate().map_err(AppError::from_validation)?;
    ok(state.store.update_database(id, draft).await?)
}

/// Delete a database by id.
#[utoipa::path(
    delete,
    path = "/api/databases/{id}",
    tag = "inventory",
    params(("id" = i64, Path, description = "Record id")),
    responses(
        (status = 200, description = "Database deleted", body = ApiResponse<bool>),
        (status = 404, description = "Database not found")
    )
)]
pub async fn delete_database(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<bool> {
    state.store.delete_database(id).await?;
    ok(true)
}

// ---------------------------------------------------------------------------
// File shares

/// List the file share inventory.
#[utoipa::path(
    get,
    path = "/api/file-shares",
    tag = "inventory",
    responses(
        (status = 200, description = "File share inventory", body = ApiResponse<Vec<FileShareItem>>)
    )
)]
pub async fn list_file_shares(State(state): State<AppState>) -> Reply<Vec<FileShareItem>> {
    ok(state.store.list_file_shares().await)
}

/// Add a file share.
#[utoipa::path(
    post,
    path = "/api/file-shares",
    tag = "inventory",
    request_body = FileShareDraft,
    responses(
        (status = 200, description = "File share created", body = ApiResponse<FileShareItem>),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_file_share(
    State(state): State<AppState>,
    Json(draft): Json<FileShareDraft>,
) -> Reply<FileShareItem> {
    draft.validate().map_err(AppError::from_validation)?;
    let row = state.store.create_file_share(draft).await?;
    tracing::info!(id = row.id, name = %row.name, "file share created");
    ok(row)
}

/// Update a file share in place.
#[utoipa::path(
    put,
    path = "/api/file-shares/{id}",
    tag = "inventory",
    params(("id" = i64, Path, description = "Record id")),
    request_body = FileShareDraft,
    responses(
        (status = 200, description = "File share updated", body = ApiResponse<FileShareItem>),
        (status = 404, description = "File share not found")
    )
)]
pub async fn update_file_share(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<FileShareDraft>,
) -> Reply<FileShareItem> {
    draft.validate().map_err(AppError::from_validation)?;
    ok(state.store.update_file_share(id, draft).await?)
}

/// Delete a file share by id.
#[utoipa::path(
    delete,
    path = "/api/file-shares/{id}",
    tag = "inventory",
    params(("id" = i64, Path, description = "Record id")),
    responses(
        (status = 200, description = "File share deleted", body = ApiResponse<bool>),
        (status = 404, description = "File share not found")
    )
)]
pub async fn delete_file_share(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<bool> {
    state.store.delete_file_share(id).await?;
    ok(true)
}

// ---------------------------------------------------------------------------
// Resource rates

/// List the billing rates.
#[utoipa::path(
    get,
    path = "/api/resource-rates",
    tag = "inventory",
    responses(
        (status = 200, description = "Billing rates", body = ApiResponse<Vec<ResourceRateItem>>)
    )
)]
pub async fn list_resource_rates(State(state): State<AppState>) -> Reply<Vec<ResourceRateItem>> {
    ok(state.store.list_resource_rates().await)
}

/// Add a billing rate.
#[utoipa::path(
    post,
    path = "/api/resource-rates",
    tag = "inventory",
    request_body = ResourceRateDraft,
    responses(
        (status = 200, description = "Billing rate created", body = ApiResponse<ResourceRateItem>),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_resource_rate(
    State(state): State<AppState>,
    Json(draft): Json<ResourceRateDraft>,
) -> Reply<ResourceRateItem> {
    draft.validate().map_err(AppError::from_validation)?;
    let row = state.store.create_resource_rate(draft).await?;
    tracing::info!(id = row.id, role = %row.role, "resource rate created");
    ok(row)
}

/// Update a billing rate in place.
#[utoipa::path(
    put,
    path = "/api/resource-rates/{id}",
    tag = "inventory",
    params(("id" = i64, Path, description = "Record id")),
    request_body = ResourceRateDraft,
    responses(
        (status = 200, description = "Billing rate updated", body = ApiResponse<ResourceRateItem>),
        (status = 404, description = "Billing rate not found")
    )
)]
pub async fn update_resource_rate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<ResourceRateDraft>,
) -> Reply<ResourceRateItem> {
    draft.validate().map_err(AppError::from_validation)?;
    ok(state.store.update_resource_rate(id, draft).await?)
}

/// Delete a billing rate by id.
#[utoipa::path(
    delete,
    path = "/api/resource-rates/{id}",
    tag = "inventory",
    params(("id" = i64, Path, description = "Record id")),
    responses(
        (status = 200, description = "Billing rate deleted", body = ApiResponse<bool>),
        (status = 404, description = "Billing rate not found")
    )
)]
pub async fn delete_resource_rate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Reply<bool> {
    state.store.delete_resource_rate(id).await?;
    ok(true)
}
