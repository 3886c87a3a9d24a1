//! End-to-end tests: the real HTTP transport, typed client and panels
//! against the dev backend mounted on an ephemeral port.

use std::sync::Arc;

use chrono::NaiveDate;

use api_client::{HttpTransport, MigrationClient};
use common::config::{AppConfig, BackendSettings};
use common::errors::AppError;
use common::models::{
    CloudPreferenceDraft, CloudPreferenceItem, CloudProvider, DatabaseDraft, DatabaseItem,
    DiskType, ExportFormat, InventoryEntity, ReportSection, ResourceRateDraft, ResourceRateItem,
    ServerDraft, ServerItem, SingletonEntity, WriteFrequency,
};
use common::utils::IdGenerator;

use dashboard::analysis::TimelinePanel;
use dashboard::config_form::SingletonForm;
use dashboard::export::ExportPanel;
use dashboard::inventory::{ensure_server_reference, InventoryPanel};

use dev_backend::{create_router, AppState};

type Client = Arc<MigrationClient<HttpTransport>>;

/// Mounts a fresh dev backend on an ephemeral port and returns a client
/// pointed at it.
async fn spawn_backend() -> Client {
    let exports_dir =
        std::env::temp_dir().join(format!("dashboard-e2e-{}", IdGenerator::short_id()));
    let state = AppState::new(AppConfig::load_with_service("dev-backend"), exports_dir)
        .expect("state init");
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let settings = BackendSettings::for_base_url(format!("http://{addr}"));
    Arc::new(MigrationClient::new(
        HttpTransport::new(&settings).expect("transport"),
    ))
}

fn server_draft(server_id: &str, disk_gb: u32) -> ServerDraft {
    ServerDraft {
        server_id: server_id.into(),
        os_type: "Ubuntu 22.04".into(),
        vcpu: 4,
        ram_gb: 16,
        disk_size_gb: disk_gb,
        disk_type: DiskType::Ssd,
        uptime_pattern: "24x7".into(),
        current_hosting: "On-Premise".into(),
        technology: "Nginx".into(),
        technology_version: None,
    }
}

#[tokio::test]
async fn resource_rate_round_trip_computes_total_cost() {
    let client = spawn_backend().await;
    let mut panel = InventoryPanel::<_, ResourceRateItem>::new(client.clone());

    panel
        .create(ResourceRateDraft {
            role: "Cloud Architect".into(),
            duration_weeks: 12,
            hours_per_week: 40,
            rate_per_hour: 175.0,
        })
        .await
        .expect("create resource rate");

    let rows = panel.rows();
    assert_eq!(rows.len(), 1);
    let rate = rows[0];
    assert_eq!(rate.role, "Cloud Architect");
    assert_eq!(rate.total_cost(), 84_000.0);
    assert_eq!(panel.stats().metric_total, 84_000.0);
}

#[tokio::test]
async fn row_count_and_stats_track_the_fetched_collection() {
    let client = spawn_backend().await;
    let mut panel = InventoryPanel::<_, ServerItem>::new(client.clone());

    panel.create(server_draft("web-01", 100)).await.expect("create web-01");
    panel.create(server_draft("db-01", 500)).await.expect("create db-01");

    assert_eq!(panel.rows().len(), panel.records().len());
    assert_eq!(panel.stats().count, 2);
    assert_eq!(panel.stats().metric_total, 600.0);
    assert_eq!(panel.stats().metric_average, 300.0);

    let doomed = panel
        .records()
        .iter()
        .find(|s| s.server_id == "db-01")
        .map(|s| s.id())
        .expect("db-01 present");
    panel.delete(doomed, true).await.expect("delete db-01");

    // The deleted id is gone from rows and from every statistic.
    assert_eq!(panel.stats().count, 1);
    assert_eq!(panel.stats().metric_total, 100.0);
    assert!(panel.records().iter().all(|s| s.id() != doomed));
}

#[tokio::test]
async fn rejected_create_leaves_displayed_collection_unchanged() {
    let client = spawn_backend().await;
    let mut panel = InventoryPanel::<_, ServerItem>::new(client.clone());

    panel.create(server_draft("web-01", 100)).await.expect("first create");

    // Duplicate server_id is rejected server-side with a 400.
    let err = panel.create(server_draft("web-01", 250)).await.unwrap_err();
    match err {
        AppError::Status { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("already exists"), "verbatim message: {message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(panel.stats().count, 1);
    assert_eq!(panel.stats().metric_total, 100.0);
}

#[tokio::test]
async fn dangling_database_reference_is_caught_before_any_request() {
    let client = spawn_backend().await;
    let mut servers = InventoryPanel::<_, ServerItem>::new(client.clone());
    servers.create(server_draft("web-01", 100)).await.expect("create server");

    let err = ensure_server_reference("database", "db-99", servers.records()).unwrap_err();
    assert!(matches!(err, AppError::DanglingReference { .. }));

    // A valid reference goes through end to end.
    ensure_server_reference("database", "web-01", servers.records()).expect("valid reference");
    let mut databases = InventoryPanel::<_, DatabaseItem>::new(client.clone());
    databases
        .create(DatabaseDraft {
            name: "production-db".into(),
            engine: "MySQL".into(),
            size_gb: 50,
            server_id: "web-01".into(),
            write_frequency: WriteFrequency::High,
            backup_frequency: "Daily".into(),
            ha_dr_required: true,
            licensing_model: "Open Source".into(),
            downtime_tolerance: "Low".into(),
            real_time_sync: true,
        })
        .await
        .expect("create database");
    assert_eq!(databases.stats().flagged_count, 1);
}

#[tokio::test]
async fn timeline_derives_end_date_from_start_plus_weeks() {
    let client = spawn_backend().await;
    let mut panel = TimelinePanel::new(client.clone());
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    panel.set_start_date(start);
    panel.refresh().await.expect("timeline fetch");

    let report = panel.report().expect("report held");
    // Empty inventory: the 16-week baseline.
    assert_eq!(report.overview.total_duration_weeks, 16);
    assert_eq!(
        panel.project_end(),
        NaiveDate::from_ymd_opt(2024, 6, 21)
    );

    // The backend omits ai_insights; the viewer simply has none to render.
    assert!(report.ai_insights.is_none());

    // Derived schedule covers the whole project contiguously.
    let schedule = panel.schedule();
    assert_eq!(schedule.first().unwrap().starts_on, start);
    assert_eq!(
        schedule.last().unwrap().ends_on,
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
    );
}

#[tokio::test]
async fn singleton_form_posts_then_puts() {
    let client = spawn_backend().await;
    let mut form = SingletonForm::<_, CloudPreferenceItem>::new(client.clone());

    form.load().await.expect("initial load");
    assert!(form.stored().is_none());

    form.set_draft(CloudPreferenceDraft {
        provider: CloudProvider::Aws,
        region: "eu-central-1".into(),
        preferred_services: vec!["EC2".into(), "RDS".into()],
        network_config: "Virtual Private Cloud (VPC)".into(),
    });
    form.save().await.expect("first save creates");
    let created_id = form.stored().expect("stored after create").id;

    let mut draft = form.stored().unwrap().to_draft();
    draft.region = "eu-west-1".into();
    form.set_draft(draft);
    form.save().await.expect("second save updates");

    let stored = form.stored().expect("stored after update");
    assert_eq!(stored.id, created_id);
    assert_eq!(stored.region, "eu-west-1");
    assert!(stored.updated_at.is_some());
}

#[tokio::test]
async fn export_then_download_round_trips_the_artifact() {
    let client = spawn_backend().await;
    let mut servers = InventoryPanel::<_, ServerItem>::new(client.clone());
    servers.create(server_draft("web-01", 100)).await.expect("create server");

    let mut panel = ExportPanel::new(client.clone());
    let artifact = panel
        .export(
            ExportFormat::Json,
            vec![ReportSection::Inventory, ReportSection::CostEstimation],
        )
        .await
        .expect("export");

    assert!(artifact.filename.ends_with(".json"));
    assert_eq!(panel.history().len(), 1);

    let listed = panel.remote_artifacts().await.expect("list exports");
    assert!(listed.iter().any(|a| a.filename == artifact.filename));

    let out_dir =
        std::env::temp_dir().join(format!("dashboard-dl-{}", IdGenerator::short_id()));
    tokio::fs::create_dir_all(&out_dir).await.expect("make out dir");
    let path = panel
        .download_to(&artifact.filename, &out_dir)
        .await
        .expect("download");

    let bytes = tokio::fs::read(&path).await.expect("read downloaded file");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("valid JSON artifact");
    assert!(value.get("inventory").is_some());
    assert!(value.get("cost_estimation").is_some());
}

#[tokio::test]
async fn health_reports_inventory_counts() {
    let client = spawn_backend().await;
    let mut servers = InventoryPanel::<_, ServerItem>::new(client.clone());
    servers.create(server_draft("web-01", 100)).await.expect("create server");

    let health = client.health().await.expect("health");
    assert_eq!(health.status, "healthy");
    assert_eq!(health.inventory.servers, 1);
    assert_eq!(health.inventory.databases, 0);
}
