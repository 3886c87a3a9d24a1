//! Business constraint configuration models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::SingletonEntity;

/// Maximum acceptable service interruption during migration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum DowntimeTolerance {
    /// Zero downtime required.
    None,
    /// Under 5 minutes.
    VeryLow,
    /// Under 15 minutes.
    Low,
    /// Under 1 hour.
    Medium,
    /// Under 4 hours.
    High,
    /// Under 8 hours.
    VeryHigh,
}

impl std::fmt::Display for DowntimeTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DowntimeTolerance::None => write!(f, "None"),
            DowntimeTolerance::VeryLow => write!(f, "Very Low"),
            DowntimeTolerance::Low => write!(f, "Low"),
            DowntimeTolerance::Medium => write!(f, "Medium"),
            DowntimeTolerance::High => write!(f, "High"),
            DowntimeTolerance::VeryHigh => write!(f, "Very High"),
        }
    }
}

/// Singleton record with the business-side migration constraints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BusinessConstraintItem {
    /// Unique record identifier.
    pub id: i64,
    /// Allowed time range for cutover activities.
    pub migration_window: String,
    /// Target date by which migration must complete (date-only).
    pub cutover_date: NaiveDate,
    /// Maximum acceptable downtime.
    pub downtime_tolerance: DowntimeTolerance,
    /// Maximum project budget in USD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_cap: Option<f64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for the business constraint record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BusinessConstraintDraft {
    /// Allowed time range for cutover activities.
    #[validate(length(min = 1, message = "migration_window is required"))]
    pub migration_window: String,
    /// Target cutover date.
    pub cutover_date: NaiveDate,
    /// Maximum acceptable downtime.
    pub downtime_tolerance: DowntimeTolerance,
    /// Maximum project budget in USD.
    #[validate(range(min = 0.0, message = "budget_cap must not be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_cap: Option<f64>,
}

impl SingletonEntity for BusinessConstraintItem {
    const PATH: &'static str = "business-constraints";
    const ENTITY: &'static str = "business constraint";

    type Draft = BusinessConstraintDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn to_draft(&self) -> BusinessConstraintDraft {
        BusinessConstraintDraft {
            migration_window: self.migration_window.clone(),
            cutover_date: self.cutover_date,
            downtime_tolerance: self.downtime_tolerance,
            budget_cap: self.budget_cap,
        }
    }
}
