//! Computed report handlers.

use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use common::errors::AppError;
use common::models::{CostReport, DashboardSummary, StrategyReport, TimelineReport};
use common::response::ApiResponse;

use super::SERVICE_NAME;
use crate::planner;
use crate::state::AppState;

type Reply<T> = Result<Json<ApiResponse<T>>, AppError>;

fn ok<T>(data: T) -> Reply<T> {
    Ok(Json(ApiResponse::ok_with_service(data, SERVICE_NAME)))
}

/// Aggregated dashboard overview.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "analysis",
    responses(
        (status = 200, description = "Dashboard overview", body = ApiResponse<DashboardSummary>)
    )
)]
pub async fn dashboard(State(state): State<AppState>) -> Reply<DashboardSummary> {
    let snapshot = state.store.snapshot().await;
    ok(planner::dashboard_summary(&snapshot))
}

/// Cost estimation report.
#[utoipa::path(
    get,
    path = "/api/cost-estimation",
    tag = "analysis",
    responses(
        (status = 200, description = "Cost estimation", body = ApiResponse<CostReport>)
    )
)]
pub async fn cost_estimation(State(state): State<AppState>) -> Reply<CostReport> {
    let snapshot = state.store.snapshot().await;
    ok(planner::cost_report(&snapshot))
}

/// Migration strategy report.
#[utoipa::path(
    get,
    path = "/api/migration-strategy",
    tag = "analysis",
    responses(
        (status = 200, description = "Migration strategy", body = ApiResponse<StrategyReport>)
    )
)]
pub async fn migration_strategy(State(state): State<AppState>) -> Reply<StrategyReport> {
    let snapshot = state.store.snapshot().await;
    ok(planner::strategy_report(&snapshot))
}

/// Optional parameters for timeline generation.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TimelineParams {
    /// Project start date; defaults to today.
    pub start_date: Option<NaiveDate>,
}

/// Migration timeline, optionally anchored at a start date.
#[utoipa::path(
    post,
    path = "/api/timeline",
    tag = "analysis",
    request_body = TimelineParams,
    responses(
        (status = 200, description = "Migration timeline", body = ApiResponse<TimelineReport>)
    )
)]
pub async fn timeline(
    State(state): State<AppState>,
    Json(params): Json<TimelineParams>,
) -> Reply<TimelineReport> {
    let snapshot = state.store.snapshot().await;
    ok(planner::timeline_report(&snapshot, params.start_date))
}
