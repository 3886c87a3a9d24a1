//! Development migration backend.
//!
//! Serves the complete REST surface of the migration backend from
//! in-memory tables. Start with `DEV_BACKEND_SEED=1` to preload the
//! sample inventory.

use std::path::PathBuf;

use axum::routing::get;
use axum::Json;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa::OpenApi;

use common::config::AppConfig;

use dev_backend::{create_router, AppState};

const SERVICE_NAME: &str = "dev-backend";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Migration Backend API",
        version = "0.1.0",
        description = "In-memory backend for the migration planning dashboard"
    ),
    paths(
        dev_backend::handlers::inventory::list_servers,
        dev_backend::handlers::inventory::create_server,
        dev_backend::handlers::inventory::update_server,
        dev_backend::handlers::inventory::delete_server,
        dev_backend::handlers::inventory::list_databases,
        dev_backend::handlers::inventory::create_database,
        dev_backend::handlers::inventory::update_database,
        dev_backend::handlers::inventory::delete_database,
        dev_backend::handlers::inventory::list_file_shares,
        dev_backend::handlers::inventory::create_file_share,
        dev_backend::handlers::inventory::update_file_share,
        dev_backend::handlers::inventory::delete_file_share,
        dev_backend::handlers::inventory::list_resource_rates,
        dev_backend::handlers::inventory::create_resource_rate,
        dev_backend::handlers::inventory::update_resource_rate,
        dev_backend::handlers::inventory::delete_resource_rate,
        dev_backend::handlers::configuration::get_cloud_preferences,
        dev_backend::handlers::configuration::create_cloud_preferences,
        dev_backend::handlers::configuration::update_cloud_preferences,
        dev_backend::handlers::configuration::get_business_constraints,
        dev_backend::handlers::configuration::create_business_constraints,
        dev_backend::handlers::configuration::update_business_constraints,
        dev_backend::handlers::analysis::dashboard,
        dev_backend::handlers::analysis::cost_estimation,
        dev_backend::handlers::analysis::migration_strategy,
        dev_backend::handlers::analysis::timeline,
        dev_backend::handlers::export::export_report,
        dev_backend::handlers::export::list_exports,
        dev_backend::handlers::export::download,
        dev_backend::handlers::health::health_check,
    ),
    components(schemas(
        common::models::ServerItem,
        common::models::ServerDraft,
        common::models::DiskType,
        common::models::DatabaseItem,
        common::models::DatabaseDraft,
        common::models::WriteFrequency,
        common::models::FileShareItem,
        common::models::FileShareDraft,
        common::models::AccessPattern,
        common::models::ResourceRateItem,
        common::models::ResourceRateDraft,
        common::models::CloudPreferenceItem,
        common::models::CloudPreferenceDraft,
        common::models::CloudProvider,
        common::models::BusinessConstraintItem,
        common::models::BusinessConstraintDraft,
        common::models::DowntimeTolerance,
        common::models::CostReport,
        common::models::StrategyReport,
        common::models::TimelineReport,
        common::models::ExportRequest,
        common::models::ExportArtifact,
        common::models::ExportFormat,
        common::models::ReportSection,
        common::models::HealthStatus,
        common::models::DashboardSummary,
        dev_backend::handlers::analysis::TimelineParams,
    )),
    tags(
        (name = "inventory", description = "Inventory CRUD endpoints"),
        (name = "configuration", description = "Configuration singletons"),
        (name = "analysis", description = "Computed reports"),
        (name = "export", description = "Report file generation"),
        (name = "health", description = "Health check")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::load_with_service(SERVICE_NAME);
    let exports_dir = std::env::var("EXPORTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("exports"));

    let state = AppState::new(config.clone(), exports_dir)
        .expect("failed to initialize application state (check EXPORTS_DIR)");

    if std::env::var("DEV_BACKEND_SEED").map(|v| v == "1").unwrap_or(false) {
        state.store.seed_sample_data().await;
        let (servers, databases, file_shares) = state.store.counts().await;
        info!(servers, databases, file_shares, "seeded sample inventory");
    }

    let app = create_router(state).route("/api-docs/openapi.json", get(openapi_json));

    let addr = config.bind_addr();
    info!(service = SERVICE_NAME, address = %addr, "starting backend");

    let listener = TcpListener::bind(&addr).await.expect("failed to bind address");
    axum::serve(listener, app).await.expect("server failed");
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
