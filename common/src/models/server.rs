//! Server inventory models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::InventoryEntity;

/// Disk technology of a server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiskType {
    /// Solid state drive.
    Ssd,
    /// Spinning disk.
    Hdd,
    /// NVMe flash.
    Nvme,
}

impl std::fmt::Display for DiskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiskType::Ssd => write!(f, "SSD"),
            DiskType::Hdd => write!(f, "HDD"),
            DiskType::Nvme => write!(f, "NVME"),
        }
    }
}

/// A server or VM tracked for migration planning.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServerItem {
    /// Unique record identifier.
    pub id: i64,
    /// Human identifier, unique within the inventory (e.g. "web-server-01").
    pub server_id: String,
    /// Operating system.
    pub os_type: String,
    /// Virtual CPU count.
    pub vcpu: u32,
    /// Memory in GB.
    pub ram_gb: u32,
    /// Disk size in GB.
    pub disk_size_gb: u32,
    /// Disk technology.
    pub disk_type: DiskType,
    /// Uptime pattern (e.g. "24x7", "Business Hours").
    pub uptime_pattern: String,
    /// Where the server runs today (e.g. "On-Premise").
    pub current_hosting: String,
    /// Technology stack descriptor.
    pub technology: String,
    /// Version of the technology stack.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology_version: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for a server.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ServerDraft {
    /// Human identifier, unique within the inventory.
    #[validate(length(min = 1, max = 100, message = "server_id must be 1-100 characters"))]
    pub server_id: String,
    /// Operating system.
    #[validate(length(min = 1, message = "os_type is required"))]
    pub os_type: String,
    /// Virtual CPU count.
    #[validate(range(min = 1, max = 256, message = "vcpu must be 1-256"))]
    pub vcpu: u32,
    /// Memory in GB.
    #[validate(range(min = 1, max = 4096, message = "ram_gb must be 1-4096"))]
    pub ram_gb: u32,
    /// Disk size in GB.
    #[validate(range(min = 1, message = "disk_size_gb must be positive"))]
    pub disk_size_gb: u32,
    /// Disk technology.
    pub disk_type: DiskType,
    /// Uptime pattern.
    #[validate(length(min = 1, message = "uptime_pattern is required"))]
    pub uptime_pattern: String,
    /// Current hosting location.
    #[validate(length(min = 1, message = "current_hosting is required"))]
    pub current_hosting: String,
    /// Technology stack descriptor.
    pub technology: String,
    /// Version of the technology stack.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology_version: Option<String>,
}

impl InventoryEntity for ServerItem {
    const COLLECTION: &'static str = "servers";
    const ENTITY: &'static str = "server";
    const METRIC_LABEL: &'static str = "total disk (GB)";
    const FLAG_LABEL: &'static str = "24x7 uptime";

    type Draft = ServerDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.server_id
    }

    fn metric(&self) -> f64 {
        f64::from(self.disk_size_gb)
    }

    fn flagged(&self) -> bool {
        self.uptime_pattern.eq_ignore_ascii_case("24x7")
            || self.uptime_pattern.eq_ignore_ascii_case("24/7")
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.server_id, self.os_type, self.current_hosting, self.technology
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ServerDraft {
        ServerDraft {
            server_id: "web-server-01".into(),
            os_type: "Ubuntu 22.04".into(),
            vcpu: 4,
            ram_gb: 16,
            disk_size_gb: 100,
            disk_type: DiskType::Ssd,
            uptime_pattern: "24x7".into(),
            current_hosting: "On-Premise".into(),
            technology: "Apache, PHP".into(),
            technology_version: Some("2.4".into()),
        }
    }

    #[test]
    fn valid_draft_passes() {
        use validator::Validate;
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn zero_vcpu_is_rejected() {
        use validator::Validate;
        let mut d = draft();
        d.vcpu = 0;
        assert!(d.validate().is_err());
    }

    #[test]
    fn disk_type_uses_uppercase_wire_format() {
        assert_eq!(serde_json::to_string(&DiskType::Nvme).unwrap(), "\"NVME\"");
    }
}
