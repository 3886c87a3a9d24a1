//! Route table.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{analysis, configuration, export, health, inventory};
use crate::state::AppState;

/// Builds the API route table.
pub fn router() -> Router<AppState> {
    Router::new()
        // Inventory collections
        .route(
            "/api/servers",
            get(inventory::list_servers).post(inventory::create_server),
        )
        .route(
            "/api/servers/{id}",
            axum::routing::put(inventory::update_server).delete(inventory::delete_server),
        )
        .route(
            "/api/databases",
            get(inventory::list_databases).post(inventory::create_database),
        )
        .route(
            "/api/databases/{id}",
            axum::routing::put(inventory::update_database).delete(inventory::delete_database),
        )
        .route(
            "/api/file-shares",
            get(inventory::list_file_shares).post(inventory::create_file_share),
        )
        .route(
            "/api/file-shares/{id}",
            axum::routing::put(inventory::update_file_share).delete(inventory::delete_file_share),
        )
        .route(
            "/api/resource-rates",
            get(inventory::list_resource_rates).post(inventory::create_resource_rate),
        )
        .route(
            "/api/resource-rates/{id}",
            axum::routing::put(inventory::update_resource_rate)
                .delete(inventory::delete_resource_rate),
        )
        // Configuration singletons
        .route(
            "/api/cloud-preferences",
            get(configuration::get_cloud_preferences).post(configuration::create_cloud_preferences),
        )
        .route(
            "/api/cloud-preferences/{id}",
            axum::routing::put(configuration::update_cloud_preferences),
        )
        .route(
            "/api/business-constraints",
            get(configuration::get_business_constraints)
                .post(configuration::create_business_constraints),
        )
        .route(
            "/api/business-constraints/{id}",
            axum::routing::put(configuration::update_business_constraints),
        )
        // Computed reports
        .route("/api/dashboard", get(analysis::dashboard))
        .route("/api/cost-estimation", get(analysis::cost_estimation))
        .route("/api/migration-strategy", get(analysis::migration_strategy))
        .route("/api/timeline", post(analysis::timeline))
        // Exports
        .route("/api/export", post(export::export_report))
        .route("/api/exports", get(export::list_exports))
        .route("/api/download/{filename}", get(export::download))
        // Health
        .route("/api/health", get(health::health_check))
}
