//! Configuration singleton handlers.

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;

use common::errors::AppError;
use common::models::{
    BusinessConstraintDraft, BusinessConstraintItem, CloudPreferenceDraft, CloudPreferenceItem,
};
use common::response::ApiResponse;

use super::SERVICE_NAME;
use crate::state::AppState;

type Reply<T> = Result<Json<ApiResponse<T>>, AppError>;

fn ok<T>(data: T) -> Reply<T> {
    Ok(Json(ApiResponse::ok_with_service(data, SERVICE_NAME)))
}

/// Fetch the cloud preferences; `data` is null until configured.
#[utoipa::path(
    get,
    path = "/api/cloud-preferences",
    tag = "configuration",
    responses(
        (status = 200, description = "Stored preferences or null", body = ApiResponse<Option<CloudPreferenceItem>>)
    )
)]
pub async fn get_cloud_preferences(
    State(state): State<AppState>,
) -> Reply<Option<CloudPreferenceItem>> {
    ok(state.store.cloud_preferences().await)
}

/// Create the cloud preference record (first save).
#[utoipa::path(
    post,
    path = "/api/cloud-preferences",
    tag = "configuration",
    request_body = CloudPreferenceDraft,
    responses(
        (status = 200, description = "Preferences created", body = ApiResponse<CloudPreferenceItem>),
        (status = 400, description = "Already configured or invalid payload")
    )
)]
pub async fn create_cloud_preferences(
    State(state): State<AppState>,
    Json(draft): Json<CloudPreferenceDraft>,
) -> Reply<CloudPreferenceItem> {
    draft.validate().map_err(AppError::from_validation)?;
    let item = state.store.create_cloud_preferences(draft).await?;
    tracing::info!(provider = %item.provider, region = %item.region, "cloud preferences created");
    ok(item)
}

/// Update the cloud preference record.
#[utoipa::path(
    put,
    path = "/api/cloud-preferences/{id}",
    tag = "configuration",
    params(("id" = i64, Path, description = "Record id")),
    request_body = CloudPreferenceDraft,
    responses(
        (status = 200, description = "Preferences updated", body = ApiResponse<CloudPreferenceItem>),
        (status = 404, description = "No preferences stored under this id")
    )
)]
pub async fn update_cloud_preferences(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<CloudPreferenceDraft>,
) -> Reply<CloudPreferenceItem> {
    draft.validate().map_err(AppError::from_validation)?;
    ok(state.store.update_cloud_preferences(id, draft).await?)
}

/// Fetch the business constraints; `data` is null until configured.
#[utoipa::path(
    get,
    path = "/api/business-constraints",
    tag = "configuration",
    responses(
        (status = 200, description = "Stored constraints or null", body = ApiResponse<Option<BusinessConstraintItem>>)
    )
)]
pub async fn get_business_constraints(
    State(state): State<AppState>,
) -> Reply<Option<BusinessConstraintItem>> {
    ok(state.store.business_constraints().await)
}

/// Create the business constraint record (first save).
#[utoipa::path(
    post,
    path = "/api/business-constraints",
    tag = "configuration",
    request_body = BusinessConstraintDraft,
    responses(
        (status = 200, description = "Constraints created", body = ApiResponse<BusinessConstraintItem>),
        (status = 400, description = "Already configured or invalid payload")
    )
)]
pub async fn create_business_constraints(
    State(state): State<AppState>,
    Json(draft): Json<BusinessConstraintDraft>,
) -> Reply<BusinessConstraintItem> {
    draft.validate().map_err(AppError::from_validation)?;
    let item = state.store.create_business_constraints(draft).await?;
    tracing::info!(cutover = %item.cutover_date, "business constraints created");
    ok(item)
}

/// Update the business constraint record.
#[utoipa::path(
    put,
    path = "/api/business-constraints/{id}",
    tag = "configuration",
    params(("id" = i64, Path, description = "Record id")),
    request_body = BusinessConstraintDraft,
    responses(
        (status = 200, description = "Constraints updated", body = ApiResponse<BusinessConstraintItem>),
        (status = 404, description = "No constraints stored under this id")
    )
)]
pub async fn update_business_constraints(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<BusinessConstraintDraft>,
) -> Reply<BusinessConstraintItem> {
    draft.validate().map_err(AppError::from_validation)?;
    ok(state.store.update_business_constraints(id, draft).await?)
}
