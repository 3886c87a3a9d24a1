//! File share inventory models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::database::WriteFrequency;
use super::InventoryEntity;

/// Access temperature of a file share.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum AccessPattern {
    /// Frequently accessed.
    Hot,
    /// Occasionally accessed.
    Warm,
    /// Archival.
    Cold,
}

impl std::fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessPattern::Hot => write!(f, "Hot"),
            AccessPattern::Warm => write!(f, "Warm"),
            AccessPattern::Cold => write!(f, "Cold"),
        }
    }
}

/// A file share tracked for migration planning.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileShareItem {
    /// Unique record identifier.
    pub id: i64,
    /// Share display name.
    pub name: String,
    /// Total size in GB.
    pub size_gb: u32,
    /// `server_id` of the owning server.
    pub server_id: String,
    /// Access temperature.
    pub access_pattern: AccessPattern,
    /// Retention requirement in days.
    pub retention_days: u32,
    /// Whether snapshots must be carried over.
    pub snapshot_required: bool,
    /// Write frequency.
    pub write_frequency: WriteFrequency,
    /// Whether the share needs real-time sync during migration.
    pub real_time_sync: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for a file share.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FileShareDraft {
    /// Share display name.
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    /// Total size in GB.
    #[validate(range(min = 1, message = "size_gb must be positive"))]
    pub size_gb: u32,
    /// `server_id` of the owning server.
    #[validate(length(min = 1, message = "server_id is required"))]
    pub server_id: String,
    /// Access temperature.
    pub access_pattern: AccessPattern,
    /// Retention requirement in days.
    #[validate(range(min = 1, max = 3650, message = "retention_days must be 1-3650"))]
    pub retention_days: u32,
    /// Whether snapshots must be carried over.
    pub snapshot_required: bool,
    /// Write frequency.
    pub write_frequency: WriteFrequency,
    /// Whether the share needs real-time sync during migration.
    pub real_time_sync: bool,
}

impl InventoryEntity for FileShareItem {
    const COLLECTION: &'static str = "file-shares";
    const ENTITY: &'static str = "file share";
    const METRIC_LABEL: &'static str = "total size (GB)";
    const FLAG_LABEL: &'static str = "snapshot required";

    type Draft = FileShareDraft;

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
        self.snapshot_required
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.server_id, self.access_pattern)
    }
}
