//! Command-line interface definitions.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use common::models::{
    AccessPattern, BusinessConstraintDraft, CloudPreferenceDraft, CloudProvider, DatabaseDraft,
    DiskType, DowntimeTolerance, ExportFormat, FileShareDraft, ReportSection, ResourceRateDraft,
    ServerDraft, WriteFrequency,
};

use crate::inventory::{SortDirection, SortKey};

/// Terminal dashboard for cloud migration planning.
#[derive(Parser)]
#[command(name = "migration-dashboard", version, about)]
pub struct Cli {
    /// Backend base URL (overrides MIGRATION_BACKEND_URL).
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage the server inventory.
    Servers {
        #[command(subcommand)]
        command: ServerCommand,
    },
    /// Manage the database inventory.
    Databases {
        #[command(subcommand)]
        command: DatabaseCommand,
    },
    /// Manage the file share inventory.
    FileShares {
        #[command(subcommand)]
        command: FileShareCommand,
    },
    /// Manage professional-services billing rates.
    Rates {
        #[command(subcommand)]
        command: RateCommand,
    },
    /// View or edit cloud preferences.
    Preferences {
        #[command(subcommand)]
        command: PreferenceCommand,
    },
    /// View or edit business constraints.
    Constraints {
        #[command(subcommand)]
        command: ConstraintCommand,
    },
    /// Aggregated inventory and cost overview.
    Overview,
    /// Cost estimation report.
    Cost,
    /// Migration strategy report.
    Strategy,
    /// Migration timeline.
    Timeline(TimelineArgs),
    /// Generate a report file on the backend.
    Export(ExportArgs),
    /// List generated report files.
    Exports,
    /// Download a generated report file.
    Download(DownloadArgs),
    /// Backend health check.
    Health,
}

/// Shared flags for `list` subcommands. Sorting and filtering operate on
/// the already-fetched collection; they never re-query the backend.
#[derive(Args)]
pub struct ListArgs {
    /// Column to sort by.
    #[arg(long, value_enum, default_value_t = SortKeyArg::Id)]
    pub sort: SortKeyArg,
    /// Sort descending instead of ascending.
    #[arg(long)]
    pub desc: bool,
    /// Case-insensitive substring filter.
    #[arg(long)]
    pub filter: Option<String>,
}

impl ListArgs {
    pub fn sort_key(&self) -> SortKey {
        self.sort.into()
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortKeyArg {
    Id,
    Name,
    Size,
}

impl From<SortKeyArg> for SortKey {
    fn from(value: SortKeyArg) -> Self {
        match value {
            SortKeyArg::Id => SortKey::Id,
            SortKeyArg::Name => SortKey::Name,
            SortKeyArg::Size => SortKey::Metric,
        }
    }
}

// ---------------------------------------------------------------------------
// Servers

#[derive(Subcommand)]
pub enum ServerCommand {
    /// List servers with derived statistics.
    List(ListArgs),
    /// Add a server.
    Add(ServerArgs),
    /// Update a server in place.
    Update {
        /// Record id.
        id: i64,
        #[command(flatten)]
        args: ServerArgs,
    },
    /// Delete a server by id.
    Remove {
        /// Record id.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct ServerArgs {
    /// Unique server identifier (e.g. "web-server-01").
    #[arg(long)]
    pub server_id: String,
    /// Operating system.
    #[arg(long)]
    pub os_type: String,
    /// Virtual CPU count.
    #[arg(long)]
    pub vcpu: u32,
    /// Memory in GB.
    #[arg(long)]
    pub ram_gb: u32,
    /// Disk size in GB.
    #[arg(long)]
    pub disk_size_gb: u32,
    /// Disk technology.
    #[arg(long, value_enum, default_value_t = DiskTypeArg::Ssd)]
    pub disk_type: DiskTypeArg,
    /// Uptime pattern.
    #[arg(long, default_value = "24x7")]
    pub uptime_pattern: String,
    /// Current hosting location.
    #[arg(long, default_value = "On-Premise")]
    pub current_hosting: String,
    /// Technology stack descriptor.
    #[arg(long, default_value = "")]
    pub technology: String,
    /// Technology stack version.
    #[arg(long)]
    pub technology_version: Option<String>,
}

impl ServerArgs {
    pub fn into_draft(self) -> ServerDraft {
        ServerDraft {
            server_id: self.server_id,
            os_type: self.os_type,
            vcpu: self.vcpu,
            ram_gb: self.ram_gb,
            disk_size_gb: self.disk_size_gb,
            disk_type: self.disk_type.into(),
            uptime_pattern: self.uptime_pattern,
            current_hosting: self.current_hosting,
            technology: self.technology,
            technology_version: self.technology_version,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DiskTypeArg {
    Ssd,
    Hdd,
    Nvme,
}

impl From<DiskTypeArg> for DiskType {
    fn from(value: DiskTypeArg) -> Self {
        match value {
            DiskTypeArg::Ssd => DiskType::Ssd,
            DiskTypeArg::Hdd => DiskType::Hdd,
            DiskTypeArg::Nvme => DiskType::Nvme,
        }
    }
}

// ---------------------------------------------------------------------------
// Databases

#[derive(Subcommand)]
pub enum DatabaseCommand {
    /// List databases with derived statistics.
    List(ListArgs),
    /// Add a database.
    Add(DatabaseArgs),
    /// Update a database in place.
    Update {
        /// Record id.
        id: i64,
        #[command(flatten)]
        args: DatabaseArgs,
    },
    /// Delete a database by id.
    Remove {
        /// Record id.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct DatabaseArgs {
    /// Database display name.
    #[arg(long)]
    pub name: String,
    /// Engine (e.g. "PostgreSQL").
    #[arg(long)]
    pub engine: String,
    /// Data size in GB.
    #[arg(long)]
    pub size_gb: u32,
    /// `server_id` of the owning server; checked against the inventory.
    #[arg(long)]
    pub server_id: String,
    /// Write frequency.
    #[arg(long, value_enum, default_value_t = WriteFrequencyArg::Medium)]
    pub write_frequency: WriteFrequencyArg,
    /// Backup cadence.
    #[arg(long, default_value = "Daily")]
    pub backup_frequency: String,
    /// Require HA/DR after migration.
    #[arg(long)]
    pub ha_dr: bool,
    /// Licensing model.
    #[arg(long, default_value = "Open Source")]
    pub licensing_model: String,
    /// Acceptable downtime during cutover.
    #[arg(long, default_value = "Medium")]
    pub downtime_tolerance: String,
    /// Require real-time sync during migration.
    #[arg(long)]
    pub real_time_sync: bool,
}

impl DatabaseArgs {
    pub fn into_draft(self) -> DatabaseDraft {
        DatabaseDraft {
            name: self.name,
            engine: self.engine,
            size_gb: self.size_gb,
            server_id: self.server_id,
            write_frequency: self.write_frequency.into(),
            backup_frequency: self.backup_frequency,
            ha_dr_required: self.ha_dr,
            licensing_model: self.licensing_model,
            downtime_tolerance: self.downtime_tolerance,
            real_time_sync: self.real_time_sync,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum WriteFrequencyArg {
    Low,
    Medium,
    High,
}

impl From<WriteFrequencyArg> for WriteFrequency {
    fn from(value: WriteFrequencyArg) -> Self {
        match value {
            WriteFrequencyArg::Low => WriteFrequency::Low,
            WriteFrequencyArg::Medium => WriteFrequency::Medium,
            WriteFrequencyArg::High => WriteFrequency::High,
        }
    }
}

// ---------------------------------------------------------------------------
// File shares

#[derive(Subcommand)]
pub enum FileShareCommand {
    /// List file shares with derived statistics.
    List(ListArgs),
    /// Add a file share.
    Add(FileShareArgs),
    /// Update a file share in place.
    Update {
        /// Record id.
        id: i64,
        #[command(flatten)]
        args: FileShareArgs,
    },
    /// Delete a file share by id.
    Remove {
        /// Record id.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct FileShareArgs {
    /// Share display name.
    #[arg(long)]
    pub name: String,
    /// Total size in GB.
    #[arg(long)]
    pub size_gb: u32,
    /// `server_id` of the owning server; checked against the inventory.
    #[arg(long)]
    pub server_id: String,
    /// Access temperature.
    #[arg(long, value_enum, default_value_t = AccessPatternArg::Warm)]
    pub access_pattern: AccessPatternArg,
    /// Retention requirement in days.
    #[arg(long, default_value_t = 30)]
    pub retention_days: u32,
    /// Carry snapshots over to the target.
    #[arg(long)]
    pub snapshots: bool,
    /// Write frequency.
    #[arg(long, value_enum, default_value_t = WriteFrequencyArg::Medium)]
    pub write_frequency: WriteFrequencyArg,
    /// Require real-time sync during migration.
    #[arg(long)]
    pub real_time_sync: bool,
}

impl FileShareArgs {
    pub fn into_draft(self) -> FileShareDraft {
        FileShareDraft {
            name: self.name,
            size_gb: self.size_gb,
            server_id: self.server_id,
            access_pattern: self.access_pattern.into(),
            retention_days: self.retention_days,
            snapshot_required: self.snapshots,
            write_frequency: self.write_frequency.into(),
            real_time_sync: self.real_time_sync,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AccessPatternArg {
    Hot,
    Warm,
    Cold,
}

impl From<AccessPatternArg> for AccessPattern {
    fn from(value: AccessPatternArg) -> Self {
        match value {
            AccessPatternArg::Hot => AccessPattern::Hot,
            AccessPatternArg::Warm => AccessPattern::Warm,
            AccessPatternArg::Cold => AccessPattern::Cold,
        }
    }
}

// ---------------------------------------------------------------------------
// Resource rates

#[derive(Subcommand)]
pub enum RateCommand {
    /// List billing rates with computed totals.
    List(ListArgs),
    /// Add a billing rate.
    Add(RateArgs),
    /// Update a billing rate in place.
    Update {
        /// Record id.
        id: i64,
        #[command(flatten)]
        args: RateArgs,
    },
    /// Delete a billing rate by id.
    Remove {
        /// Record id.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct RateArgs {
    /// Role name (e.g. "Cloud Architect").
    #[arg(long)]
    pub role: String,
    /// Engagement length in weeks.
    #[arg(long)]
    pub duration_weeks: u32,
    /// Billable hours per week.
    #[arg(long, default_value_t = 40)]
    pub hours_per_week: u32,
    /// Hourly rate in USD.
    #[arg(long)]
    pub rate_per_hour: f64,
}

impl RateArgs {
    pub fn into_draft(self) -> ResourceRateDraft {
        ResourceRateDraft {
            role: self.role,
            duration_weeks: self.duration_weeks,
            hours_per_week: self.hours_per_week,
            rate_per_hour: self.rate_per_hour,
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration singletons

#[derive(Subcommand)]
pub enum PreferenceCommand {
    /// Show the stored cloud preferences.
    Show,
    /// Save cloud preferences (creates or updates the record).
    Set(PreferenceArgs),
}

#[derive(Args)]
pub struct PreferenceArgs {
    /// Target cloud provider.
    #[arg(long, value_enum)]
    pub provider: ProviderArg,
    /// Primary region.
    #[arg(long)]
    pub region: String,
    /// Preferred service; repeat for several.
    #[arg(long = "service")]
    pub services: Vec<String>,
    /// Network topology.
    #[arg(long, default_value = "Virtual Private Cloud (VPC)")]
    pub network_config: String,
}

impl PreferenceArgs {
    pub fn into_draft(self) -> CloudPreferenceDraft {
        CloudPreferenceDraft {
            provider: self.provider.into(),
            region: self.region,
            preferred_services: self.services,
            network_config: self.network_config,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProviderArg {
    Aws,
    Azure,
    Gcp,
}

impl From<ProviderArg> for CloudProvider {
    fn from(value: ProviderArg) -> Self {
        match value {
            ProviderArg::Aws => CloudProvider::Aws,
            ProviderArg::Azure => CloudProvider::Azure,
            ProviderArg::Gcp => CloudProvider::Gcp,
        }
    }
}

#[derive(Subcommand)]
pub enum ConstraintCommand {
    /// Show the stored business constraints with advisory text.
    Show,
    /// Save business constraints (creates or updates the record).
    Set(ConstraintArgs),
}

#[derive(Args)]
pub struct ConstraintArgs {
    /// Allowed migration window.
    #[arg(long, default_value = "Weekends Only")]
    pub migration_window: String,
    /// Target cutover date (YYYY-MM-DD).
    #[arg(long)]
    pub cutover_date: NaiveDate,
    /// Maximum acceptable downtime.
    #[arg(long, value_enum, default_value_t = DowntimeArg::Low)]
    pub downtime_tolerance: DowntimeArg,
    /// Maximum project budget in USD.
    #[arg(long)]
    pub budget_cap: Option<f64>,
}

impl ConstraintArgs {
    pub fn into_draft(self) -> BusinessConstraintDraft {
        BusinessConstraintDraft {
            migration_window: self.migration_window,
            cutover_date: self.cutover_date,
            downtime_tolerance: self.downtime_tolerance.into(),
            budget_cap: self.budget_cap,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DowntimeArg {
    None,
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl From<DowntimeArg> for DowntimeTolerance {
    fn from(value: DowntimeArg) -> Self {
        match value {
            DowntimeArg::None => DowntimeTolerance::None,
            DowntimeArg::VeryLow => DowntimeTolerance::VeryLow,
            DowntimeArg::Low => DowntimeTolerance::Low,
            DowntimeArg::Medium => DowntimeTolerance::Medium,
            DowntimeArg::High => DowntimeTolerance::High,
            DowntimeArg::VeryHigh => DowntimeTolerance::VeryHigh,
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis and exports

#[derive(Args)]
pub struct TimelineArgs {
    /// Custom start date (YYYY-MM-DD); end dates are derived from it.
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// On fetch failure, fall back to built-in sample data (always
    /// rendered with an explicit sample banner).
    #[arg(long)]
    pub sample: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output format: json, csv or markdown.
    #[arg(long)]
    pub format: ExportFormat,
    /// Sections to include: inventory, cost, strategy, timeline.
    /// Defaults to all.
    #[arg(long, value_delimiter = ',')]
    pub sections: Vec<ReportSection>,
}

#[derive(Args)]
pub struct DownloadArgs {
    /// File name as reported by `exports`.
    pub filename: String,
    /// Directory to save into.
    #[arg(long, default_value = ".")]
    pub out: std::path::PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn timeline_start_date_parses() {
        let cli = Cli::try_parse_from([
            "migration-dashboard",
            "timeline",
            "--start",
            "2024-03-01",
        ])
        .unwrap();
        match cli.command {
            Command::Timeline(args) => {
                assert_eq!(args.start, NaiveDate::from_ymd_opt(2024, 3, 1));
            }
            _ => panic!("expected timeline command"),
        }
    }

    #[test]
    fn export_sections_split_on_commas() {
        let cli = Cli::try_parse_from([
            "migration-dashboard",
            "export",
            "--format",
            "csv",
            "--sections",
            "inventory,cost",
        ])
        .unwrap();
        match cli.command {
            Command::Export(args) => {
                assert_eq!(args.format, ExportFormat::Csv);
                assert_eq!(
                    args.sections,
                    vec![ReportSection::Inventory, ReportSection::CostEstimation]
                );
            }
            _ => panic!("expected export command"),
        }
    }
}
