//! Database inventory models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::InventoryEntity;

/// How often an inventory component is written to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum WriteFrequency {
    /// Rarely written (archives, reporting copies).
    Low,
    /// Regular business writes.
    Medium,
    /// Write-heavy (transactional, caching).
    High,
}

impl std::fmt::Display for WriteFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteFrequency::Low => write!(f, "Low"),
            WriteFrequency::Medium => write!(f, "Medium"),
            WriteFrequency::High => write!(f, "High"),
        }
    }
}

/// A database tracked for migration planning.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatabaseItem {
    /// Unique record identifier.
    pub id: i64,
    /// Database display name.
    pub name: String,
    /// Engine (e.g. "PostgreSQL", "SQL Server").
    pub engine: String,
    /// Data size in GB.
    pub size_gb: u32,
    /// `server_id` of the owning server.
    pub server_id: String,
    /// Write frequency.
    pub write_frequency: WriteFrequency,
    /// Backup cadence (e.g. "Daily", "Weekly").
    pub backup_frequency: String,
    /// Whether HA/DR is required after migration.
    pub ha_dr_required: bool,
    /// Licensing model (e.g. "Open Source", "Commercial").
    pub licensing_model: String,
    /// Acceptable downtime during cutover.
    pub downtime_tolerance: String,
    /// Whether the database needs real-time sync during migration.
    pub real_time_sync: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for a database.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DatabaseDraft {
    /// Database display name.
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    /// Engine.
    #[validate(length(min = 1, message = "engine is required"))]
    pub engine: String,
    /// Data size in GB.
    #[validate(range(min = 1, message = "size_gb must be positive"))]
    pub size_gb: u32,
    /// `server_id` of the owning server.
    #[validate(length(min = 1, message = "server_id is required"))]
    pub server_id: String,
    /// Write frequency.
    pub write_frequency: WriteFrequency,
    /// Backup cadence.
    #[validate(length(min = 1, message = "backup_frequency is required"))]
    pub backup_frequency: String,
    /// Whether HA/DR is required after migration.
    pub ha_dr_required: bool,
    /// Licensing model.
    #[validate(length(min = 1, message = "licensing_model is required"))]
    pub licensing_model: String,
    /// Acceptable downtime during cutover.
    #[validate(length(min = 1, message = "downtime_tolerance is required"))]
    pub downtime_tolerance: String,
    /// Whether the database needs real-time sync during migration.
    pub real_time_sync: bool,
}

impl InventoryEntity for DatabaseItem {
    const COLLECTION: &'static str = "databases";
    const ENTITY: &'static str = "database";
    const METRIC_LABEL: &'static str = "total size (GB)";
    const FLAG_LABEL: &'static str = "HA/DR required";

    type Draft = DatabaseDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn metric(&self) -> f64 {
        f64::from(self.size_gb)
    }

    fn flagged(&self) -> bool {
        self.ha_dr_required
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.engine, self.server_id)
    }
}
