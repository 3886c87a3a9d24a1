//! Resource billing rate models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::InventoryEntity;

/// A billing profile for one professional-services role.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceRateItem {
    /// Unique record identifier.
    pub id: i64,
    /// Role name (e.g. "Cloud Architect").
    pub role: String,
    /// Engagement length in weeks.
    pub duration_weeks: u32,
    /// Billable hours per week.
    pub hours_per_week: u32,
    /// Hourly rate in USD.
    pub rate_per_hour: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ResourceRateItem {
    /// Total engagement cost, computed client-side for preview:
    /// duration × hours × rate.
    pub fn total_cost(&self) -> f64 {
        f64::from(self.duration_weeks) * f64::from(self.hours_per_week) * self.rate_per_hour
    }
}

/// Create/update payload for a resource rate.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResourceRateDraft {
    /// Role name.
    #[validate(length(min = 1, max = 100, message = "role must be 1-100 characters"))]
    pub role: String,
    /// Engagement length in weeks.
    #[validate(range(min = 1, max = 260, message = "duration_weeks must be 1-260"))]
    pub duration_weeks: u32,
    /// Billable hours per week.
    #[validate(range(min = 1, max = 80, message = "hours_per_week must be 1-80"))]
    pub hours_per_week: u32,
    /// Hourly rate in USD.
    #[validate(range(min = 1.0, message = "rate_per_hour must be positive"))]
    pub rate_per_hour: f64,
}

impl ResourceRateDraft {
    /// Cost preview for the values currently in the form.
    pub fn preview_cost(&self) -> f64 {
        f64::from(self.duration_weeks) * f64::from(self.hours_per_week) * self.rate_per_hour
    }
}

impl InventoryEntity for ResourceRateItem {
    const COLLECTION: &'static str = "resource-rates";
    const ENTITY: &'static str = "resource rate";
    const METRIC_LABEL: &'static str = "total cost (USD)";
    const FLAG_LABEL: &'static str = "full-time (40h+)";

    type Draft = ResourceRateDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.role
    }

    fn metric(&self) -> f64 {
        self.total_cost()
    }

    fn flagged(&self) -> bool {
        self.hours_per_week >= 40
    }

    fn search_text(&self) -> String {
        self.role.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_cost_is_duration_times_hours_times_rate() {
        let rate = ResourceRateItem {
            id: 1,
            role: "Cloud Architect".into(),
            duration_weeks: 12,
            hours_per_week: 40,
            rate_per_hour: 175.0,
            created_at: Utc::now(),
            updated_at: None,
        };
        assert_eq!(rate.total_cost(), 84_000.0);
    }

    #[test]
    fn preview_matches_item_formula() {
        let draft = ResourceRateDraft {
            role: "QA Engineer".into(),
            duration_weeks: 4,
            hours_per_week: 30,
            rate_per_hour: 95.0,
        };
        assert_eq!(draft.preview_cost(), 11_400.0);
    }
}
