//! Shared data models.
//!
//! Flat records mirrored from backend storage, plus the traits that let
//! the dashboard treat every inventory collection and singleton
//! configuration record through one generic code path.

pub mod analysis;
pub mod constraints;
pub mod database;
pub mod export;
pub mod file_share;
pub mod preferences;
pub mod resource_rate;
pub mod server;
pub mod status;

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

// Re-export commonly used types
pub use analysis::{AiInsights, CostReport, StrategyReport, TimelineReport};
pub use constraints::{BusinessConstraintDraft, BusinessConstraintItem, DowntimeTolerance};
pub use database::{DatabaseDraft, DatabaseItem, WriteFrequency};
pub use export::{ExportArtifact, ExportFormat, ExportRequest, ReportSection};
pub use file_share::{AccessPattern, FileShareDraft, FileShareItem};
pub use preferences::{CloudPreferenceDraft, CloudPreferenceItem, CloudProvider};
pub use resource_rate::{ResourceRateDraft, ResourceRateItem};
pub use server::{DiskType, ServerDraft, ServerItem};
pub use status::{DashboardSummary, HealthStatus};

/// A record kept in one of the inventory collections.
///
/// The associated constants drive endpoint paths and statistic labels;
/// the methods feed generic sorting, filtering and derived statistics.
pub trait InventoryEntity:
    Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Collection path segment under `/api` (e.g. `servers`).
    const COLLECTION: &'static str;
    /// Singular name used in messages.
    const ENTITY: &'static str;
    /// Label for the summed metric (e.g. "total size (GB)").
    const METRIC_LABEL: &'static str;
    /// Label for the boolean-flag count (e.g. "HA/DR required").
    const FLAG_LABEL: &'static str;

    /// Payload accepted by create and update.
    type Draft: Validate + Serialize + Clone + Send + Sync;

    /// Backend-assigned identifier, unique within the collection.
    fn id(&self) -> i64;

    /// Human-facing name shown in the first table column.
    fn display_name(&self) -> &str;

    /// Value contributing to the summed statistic.
    fn metric(&self) -> f64;

    /// Whether this record counts toward the flag statistic.
    fn flagged(&self) -> bool;

    /// Text the client-side substring filter matches against.
    fn search_text(&self) -> String;
}

/// A singleton configuration record (at most one row exists).
pub trait SingletonEntity:
    Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Path segment under `/api` (e.g. `cloud-preferences`).
    const PATH: &'static str;
    /// Singular name used in messages.
    const ENTITY: &'static str;

    /// Payload accepted by create and update.
    type Draft: Validate + Serialize + Clone + Send + Sync;

    /// Backend-assigned identifier.
    fn id(&self) -> i64;

    /// Copies the stored record into an editable draft.
    fn to_draft(&self) -> Self::Draft;
}
