//! Migration planning dashboard CLI.

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use api_client::{HttpTransport, MigrationClient};
use common::config::BackendSettings;
use common::models::{
    BusinessConstraintItem, CloudPreferenceItem, DatabaseItem, FileShareItem, InventoryEntity,
    ReportSection, ResourceRateItem, ServerItem,
};
use common::utils::{format_currency, format_gb};

use dashboard::analysis::{CostPanel, DataOrigin, StrategyPanel, TimelinePanel};
use dashboard::cli::{
    Cli, Command, ConstraintCommand, DatabaseCommand, DownloadArgs, ExportArgs, FileShareCommand,
    ListArgs, PreferenceCommand, RateCommand, ServerCommand, TimelineArgs,
};
use dashboard::config_form::{cutover_advisory, window_recommendation, SingletonForm};
use dashboard::export::ExportPanel;
use dashboard::inventory::{ensure_server_reference, InventoryPanel};
use dashboard::render::{print_heading, print_sample_banner, print_stats, print_table};

type Client = Arc<MigrationClient<HttpTransport>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = BackendSettings::load();
    if let Some(url) = &cli.backend_url {
        settings = BackendSettings::for_base_url(url.clone());
    }
    let client: Client = Arc::new(MigrationClient::new(HttpTransport::new(&settings)?));

    if let Err(e) = run(cli.command, &client).await {
        eprintln!("error: {e}");
        eprintln!("hint: check that the backend at {} is reachable, then retry", settings.base_url);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Command, client: &Client) -> anyhow::Result<()> {
    match command {
        Command::Servers { command } => run_servers(command, client).await,
        Command::Databases { command } => run_databases(command, client).await,
        Command::FileShares { command } => run_file_shares(command, client).await,
        Command::Rates { command } => run_rates(command, client).await,
        Command::Preferences { command } => run_preferences(command, client).await,
        Command::Constraints { command } => run_constraints(command, client).await,
        Command::Overview => run_overview(client).await,
        Command::Cost => run_cost(client).await,
        Command::Strategy => run_strategy(client).await,
        Command::Timeline(args) => run_timeline(args, client).await,
        Command::Export(args) => run_export(args, client).await,
        Command::Exports => run_exports(client).await,
        Command::Download(args) => run_download(args, client).await,
        Command::Health => run_health(client).await,
    }
}

// ---------------------------------------------------------------------------
// Inventory commands

async fn run_list<E: InventoryEntity>(
    client: &Client,
    args: ListArgs,
    headers: &[&str],
    to_row: fn(&E) -> Vec<String>,
) -> anyhow::Result<()> {
    let mut panel = InventoryPanel::<_, E>::new(client.clone());
    panel.refresh().await?;
    panel.set_sort(args.sort_key(), args.sort_direction());
    panel.set_filter(args.filter.clone());

    let rows: Vec<Vec<String>> = panel.rows().into_iter().map(to_row).collect();
    print_table(headers, &rows);
    print_stats::<E>(panel.stats());
    Ok(())
}

async fn run_create<E: InventoryEntity>(client: &Client, draft: E::Draft) -> anyhow::Result<()> {
    let mut panel = InventoryPanel::<_, E>::new(client.clone());
    panel.create(draft).await?;
    println!("{} created ({} records total)", E::ENTITY, panel.stats().count);
    Ok(())
}

async fn run_update<E: InventoryEntity>(
    client: &Client,
    id: i64,
    draft: E::Draft,
) -> anyhow::Result<()> {
    let mut panel = InventoryPanel::<_, E>::new(client.clone());
    panel.update(id, draft).await?;
    println!("{} {id} updated", E::ENTITY);
    Ok(())
}

async fn run_remove<E: InventoryEntity>(client: &Client, id: i64, yes: bool) -> anyhow::Result<()> {
    let confirmed = yes || confirm(&format!("Delete {} {id}?", E::ENTITY));
    if !confirmed {
        println!("aborted");
        return Ok(());
    }
    let mut panel = InventoryPanel::<_, E>::new(client.clone());
    panel.delete(id, true).await?;
    println!("{} {id} deleted ({} records remain)", E::ENTITY, panel.stats().count);
    Ok(())
}

/// Resolves a database/file-share server reference against the live
/// server inventory before any write is attempted.
async fn check_server_reference(
    client: &Client,
    entity: &'static str,
    server_id: &str,
) -> anyhow::Result<()> {
    let servers: Vec<ServerItem> = client.list().await?;
    ensure_server_reference(entity, server_id, &servers)?;
    Ok(())
}

async fn run_servers(command: ServerCommand, client: &Client) -> anyhow::Result<()> {
    match command {
        ServerCommand::List(args) => {
            run_list::<ServerItem>(
                client,
                args,
                &["ID", "SERVER", "OS", "VCPU", "RAM", "DISK", "HOSTING", "TECHNOLOGY"],
                |s| {
                    vec![
                        s.id.to_string(),
                        s.server_id.clone(),
                        s.os_type.clone(),
                        s.vcpu.to_string(),
                        format!("{} GB", s.ram_gb),
                        format!("{} {}", format_gb(f64::from(s.disk_size_gb)), s.disk_type),
                        s.current_hosting.clone(),
                        s.technology.clone(),
                    ]
                },
            )
            .await
        }
        ServerCommand::Add(args) => run_create::<ServerItem>(client, args.into_draft()).await,
        ServerCommand::Update { id, args } => {
            run_update::<ServerItem>(client, id, args.into_draft()).await
        }
        ServerCommand::Remove { id, yes } => run_remove::<ServerItem>(client, id, yes).await,
    }
}

async fn run_databases(command: DatabaseCommand, client: &Client) -> anyhow::Result<()> {
    match command {
        DatabaseCommand::List(args) => {
            run_list::<DatabaseItem>(
                client,
                args,
                &["ID", "NAME", "ENGINE", "SIZE", "SERVER", "HA/DR", "SYNC"],
                |d| {
                    vec![
                        d.id.to_string(),
                        d.name.clone(),
                        d.engine.clone(),
                        format_gb(f64::from(d.size_gb)),
                        d.server_id.clone(),
                        if d.ha_dr_required { "yes" } else { "no" }.into(),
                        if d.real_time_sync { "yes" } else { "no" }.into(),
                    ]
                },
            )
            .await
        }
        DatabaseCommand::Add(args) => {
            check_server_reference(client, "database", &args.server_id).await?;
            run_create::<DatabaseItem>(client, args.into_draft()).await
        }
        DatabaseCommand::Update { id, args } => {
            check_server_reference(client, "database", &args.server_id).await?;
            run_update::<DatabaseItem>(client, id, args.into_draft()).await
        }
        DatabaseCommand::Remove { id, yes } => run_remove::<DatabaseItem>(client, id, yes).await,
    }
}

async fn run_file_shares(command: FileShareCommand, client: &Client) -> anyhow::Result<()> {
    match command {
        FileShareCommand::List(args) => {
            run_list::<FileShareItem>(
                client,
                args,
                &["ID", "NAME", "SIZE", "SERVER", "ACCESS", "RETENTION", "SNAPSHOT"],
                |f| {
                    vec![
                        f.id.to_string(),
                        f.name.clone(),
                        format_gb(f64::from(f.size_gb)),
                        f.server_id.clone(),
                        f.access_pattern.to_string(),
                        format!("{} days", f.retention_days),
                        if f.snapshot_required { "yes" } else { "no" }.into(),
                    ]
                },
            )
            .await
        }
        FileShareCommand::Add(args) => {
            check_server_reference(client, "file share", &args.server_id).await?;
            run_create::<FileShareItem>(client, args.into_draft()).await
        }
        FileShareCommand::Update { id, args } => {
            check_server_reference(client, "file share", &args.server_id).await?;
            run_update::<FileShareItem>(client, id, args.into_draft()).await
        }
        FileShareCommand::Remove { id, yes } => run_remove::<FileShareItem>(client, id, yes).await,
    }
}

async fn run_rates(command: RateCommand, client: &Client) -> anyhow::Result<()> {
    match command {
        RateCommand::List(args) => {
            run_list::<ResourceRateItem>(
                client,
                args,
                &["ID", "ROLE", "WEEKS", "HOURS/WEEK", "RATE/HOUR", "TOTAL"],
                |r| {
                    vec![
                        r.id.to_string(),
                        r.role.clone(),
                        r.duration_weeks.to_string(),
                        r.hours_per_week.to_string(),
                        format_currency(r.rate_per_hour),
                        format_currency(r.total_cost()),
                    ]
                },
            )
            .await
        }
        RateCommand::Add(args) => {
            let draft = args.into_draft();
            println!("cost preview: {}", format_currency(draft.preview_cost()));
            run_create::<ResourceRateItem>(client, draft).await
        }
        RateCommand::Update { id, args } => {
            run_update::<ResourceRateItem>(client, id, args.into_draft()).await
        }
        RateCommand::Remove { id, yes } => run_remove::<ResourceRateItem>(client, id, yes).await,
    }
}

// ---------------------------------------------------------------------------
// Configuration commands

async fn run_preferences(command: PreferenceCommand, client: &Client) -> anyhow::Result<()> {
    let mut form = SingletonForm::<_, CloudPreferenceItem>::new(client.clone());
    match command {
        PreferenceCommand::Show => {
            form.load().await?;
            match form.stored() {
                Some(prefs) => {
                    print_heading("Cloud preferences");
                    println!("provider:  {}", prefs.provider);
                    println!("region:    {}", prefs.region);
                    println!("network:   {}", prefs.network_config);
                    println!(
                        "services:  {}",
                        if prefs.preferred_services.is_empty() {
                            "none selected".to_string()
                        } else {
                            prefs.preferred_services.join(", ")
                        }
                    );
                    let [compute, database, storage] = prefs.provider.core_services();
                    println!(
                        "suggested core services: {compute} (compute), {database} (database), {storage} (storage)"
                    );
                }
                None => println!("no cloud preferences configured yet"),
            }
            Ok(())
        }
        PreferenceCommand::Set(args) => {
            form.load().await?;
            form.set_draft(args.into_draft());
            form.save().await?;
            println!("cloud preferences saved");
            Ok(())
        }
    }
}

async fn run_constraints(command: ConstraintCommand, client: &Client) -> anyhow::Result<()> {
    let mut form = SingletonForm::<_, BusinessConstraintItem>::new(client.clone());
    match command {
        ConstraintCommand::Show => {
            form.load().await?;
            match form.stored() {
                Some(constraints) => {
                    print_heading("Business constraints");
                    println!("migration window:   {}", constraints.migration_window);
                    println!("cutover date:       {}", constraints.cutover_date);
                    println!("downtime tolerance: {}", constraints.downtime_tolerance);
                    match constraints.budget_cap {
                        Some(cap) => println!("budget cap:         {}", format_currency(cap)),
                        None => println!("budget cap:         not specified"),
                    }
                    println!(
                        "\nrecommended window: {}",
                        window_recommendation(constraints.downtime_tolerance)
                    );
                    let today = chrono::Utc::now().date_naive();
                    println!(
                        "lead time:          {}",
                        cutover_advisory(constraints.cutover_date, today).message
                    );
                }
                None => println!("no business constraints configured yet"),
            }
            Ok(())
        }
        ConstraintCommand::Set(args) => {
            form.load().await?;
            let draft = args.into_draft();
            println!(
                "recommended window for this tolerance: {}",
                window_recommendation(draft.downtime_tolerance)
            );
            form.set_draft(draft);
            form.save().await?;
            println!("business constraints saved");
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis commands

async fn run_overview(client: &Client) -> anyhow::Result<()> {
    let summary = client.dashboard().await?;
    print_heading("Infrastructure");
    println!("servers:     {}", summary.inventory.servers);
    println!("databases:   {}", summary.inventory.databases);
    println!("file shares: {}", summary.inventory.file_shares);
    println!("total items: {}", summary.total_items);

    print_heading("Estimated cost");
    println!(
        "monthly: {}   annual: {}   ({})",
        format_currency(summary.cost.monthly_cost),
        format_currency(summary.cost.annual_cost),
        summary.cost.currency
    );

    print_heading("Timeline");
    println!(
        "{} weeks across {} phases, {} complexity",
        summary.timeline.estimated_duration_weeks,
        summary.timeline.phases,
        summary.timeline.complexity
    );
    Ok(())
}

async fn run_cost(client: &Client) -> anyhow::Result<()> {
    let mut panel = CostPanel::new(client.clone());
    panel.refresh().await?;
    let Some(report) = panel.report() else {
        return Ok(());
    };

    print_heading("Cost breakdown (monthly)");
    let b = &report.breakdown;
    println!("compute    servers {} + databases {} = {}",
        format_currency(b.compute.servers),
        format_currency(b.compute.databases),
        format_currency(b.compute.monthly_total));
    println!("storage    file shares {} + backups {} = {}",
        format_currency(b.storage.file_shares),
        format_currency(b.storage.backups),
        format_currency(b.storage.monthly_total));
    println!("networking transfer {} + vpn {} = {}",
        format_currency(b.networking.data_transfer),
        format_currency(b.networking.vpn_gateway),
        format_currency(b.networking.monthly_total));

    print_heading("Summary");
    println!(
        "monthly: {}   annual: {}   ({})",
        format_currency(report.summary.monthly_cost),
        format_currency(report.summary.annual_cost),
        report.summary.currency
    );

    print_heading("Savings analysis");
    println!(
        "on-premises {} vs cloud optimized {} -> potential savings {}/month, ROI in {} months",
        format_currency(report.savings.on_premises_estimated),
        format_currency(report.savings.cloud_optimized),
        format_currency(report.savings.potential_monthly_savings),
        report.savings.roi_months
    );

    if let Some(ai) = &report.ai_insights {
        print_heading("AI insights");
        println!("confidence: {}%", ai.confidence_level);
        for recommendation in &ai.recommendations {
            println!("- {recommendation}");
        }
    }
    Ok(())
}

async fn run_strategy(client: &Client) -> anyhow::Result<()> {
    let mut panel = StrategyPanel::new(client.clone());
    panel.refresh().await?;
    let Some(report) = panel.report() else {
        return Ok(());
    };

    print_heading("Strategy overview");
    println!("approach:   {}", report.overview.recommended_approach);
    println!("complexity: {}", report.overview.complexity_level);
    println!("duration:   {} weeks", report.overview.estimated_duration_weeks);
    println!("confidence: {}%", report.overview.confidence_score);
    println!("workloads:  {}", report.overview.total_workloads);

    print_heading("Phases");
    let rows: Vec<Vec<String>> = report
        .phases
        .iter()
        .map(|p| {
            vec![
                p.phase.to_string(),
                p.name.clone(),
                format!("{} wk", p.duration_weeks),
                p.description.clone(),
            ]
        })
        .collect();
    print_table(&["#", "PHASE", "DURATION", "DESCRIPTION"], &rows);

    print_heading("Risk assessment");
    println!(
        "high: {}   medium: {}   low: {}",
        report.risk_assessment.high_risk_items,
        report.risk_assessment.medium_risk_items,
        report.risk_assessment.low_risk_items
    );
    for mitigation in &report.risk_assessment.mitigation_strategies {
        println!("- {mitigation}");
    }

    print_heading("Recommendations");
    for recommendation in &report.recommendations {
        println!("- {recommendation}");
    }

    if let Some(ai) = &report.ai_insights {
        print_heading("AI insights");
        println!("confidence: {}%", ai.confidence_level);
        for recommendation in &ai.recommendations {
            println!("- {recommendation}");
        }
    }
    Ok(())
}

async fn run_timeline(args: TimelineArgs, client: &Client) -> anyhow::Result<()> {
    let mut panel = TimelinePanel::new(client.clone());
    if let Some(start) = args.start {
        panel.set_start_date(start);
    }

    if let Err(e) = panel.refresh().await {
        if !args.sample {
            return Err(e.into());
        }
        eprintln!("warning: {e}; falling back to sample data");
        panel.use_sample_data();
    }

    if panel.origin() == DataOrigin::Sample {
        print_sample_banner();
    }

    let Some(report) = panel.report() else {
        return Ok(());
    };
    print_heading("Project overview");
    println!("duration:   {} weeks", report.overview.total_duration_weeks);
    println!("start:      {}", panel.effective_start_date());
    if let Some(end) = panel.project_end() {
        println!("end:        {end}");
    }
    println!("confidence: {}", report.overview.confidence_level);

    print_heading("Phases");
    let schedule = panel.schedule();
    let rows: Vec<Vec<String>> = report
        .phases
        .iter()
        .zip(&schedule)
        .map(|(phase, slot)| {
            vec![
                phase.phase.to_string(),
                phase.title.clone(),
                format!("{} wk", phase.duration_weeks),
                slot.starts_on.to_string(),
                slot.ends_on.to_string(),
            ]
        })
        .collect();
    print_table(&["#", "PHASE", "DURATION", "STARTS", "ENDS"], &rows);

    if !report.critical_path.is_empty() {
        print_heading("Critical path");
        println!("{}", report.critical_path.join(" -> "));
    }

    if let Some(ai) = &report.ai_insights {
        print_heading("AI insights");
        println!("confidence: {}%", ai.confidence_level);
        for recommendation in &ai.recommendations {
            println!("- {recommendation}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Export commands

async fn run_export(args: ExportArgs, client: &Client) -> anyhow::Result<()> {
    let sections = if args.sections.is_empty() {
        vec![
            ReportSection::Inventory,
            ReportSection::CostEstimation,
            ReportSection::MigrationStrategy,
            ReportSection::Timeline,
        ]
    } else {
        args.sections
    };

    let mut panel = ExportPanel::new(client.clone());
    let artifact = panel.export(args.format, sections).await?;
    println!(
        "generated {} ({} bytes) at {}",
        artifact.filename, artifact.size_bytes, artifact.created_at
    );
    println!("download with: migration-dashboard download {}", artifact.filename);
    Ok(())
}

async fn run_exports(client: &Client) -> anyhow::Result<()> {
    let panel = ExportPanel::new(client.clone());
    let artifacts = panel.remote_artifacts().await?;
    let rows: Vec<Vec<String>> = artifacts
        .iter()
        .map(|a| {
            vec![
                a.filename.clone(),
                a.format.to_string(),
                a.size_bytes.to_string(),
                a.created_at.to_rfc3339(),
            ]
        })
        .collect();
    print_table(&["FILE", "FORMAT", "BYTES", "CREATED"], &rows);
    Ok(())
}

async fn run_download(args: DownloadArgs, client: &Client) -> anyhow::Result<()> {
    let panel = ExportPanel::new(client.clone());
    let path = panel.download_to(&args.filename, &args.out).await?;
    println!("saved {}", path.display());
    Ok(())
}

async fn run_health(client: &Client) -> anyhow::Result<()> {
    let health = client.health().await?;
    println!(
        "{} {} v{} at {} ({} servers, {} databases, {} file shares)",
        health.service,
        health.status,
        health.version,
        health.timestamp.to_rfc3339(),
        health.inventory.servers,
        health.inventory.databases,
        health.inventory.file_shares
    );
    Ok(())
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush().ok();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
