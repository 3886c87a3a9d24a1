//! Health and dashboard summary models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::analysis::ComplexityLevel;

/// Inventory counts by entity type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct InventoryCounts {
    pub servers: u32,
    pub databases: u32,
    pub file_shares: u32,
}

impl InventoryCounts {
    /// Total workloads across all collections.
    pub fn total(&self) -> u32 {
        self.servers + self.databases + self.file_shares
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Service status wording ("healthy").
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Current timestamp.
    pub timestamp: DateTime<Utc>,
    /// Current inventory counts.
    pub inventory: InventoryCounts,
}

/// Quick cost numbers for the overview screen.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuickCost {
    /// Estimated total, USD/month.
    pub monthly_cost: f64,
    /// Estimated total, USD/year.
    pub annual_cost: f64,
    /// Currency code.
    pub currency: String,
}

/// Coarse timeline estimate for the overview screen.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuickTimeline {
    /// Estimated project length in weeks.
    pub estimated_duration_weeks: u32,
    /// Number of planned phases.
    pub phases: u32,
    /// Complexity bucket.
    pub complexity: ComplexityLevel,
}

/// Aggregated dashboard overview.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    /// Inventory counts.
    pub inventory: InventoryCounts,
    /// Total items across all collections.
    pub total_items: u32,
    /// Quick cost estimate.
    pub cost: QuickCost,
    /// Quick timeline estimate.
    pub timeline: QuickTimeline,
}
