//! Analysis report models.
//!
//! These are read-only shapes produced by the backend's computed
//! endpoints. The dashboard renders them without further business logic;
//! the only client-side derivation is the timeline's calendar arithmetic
//! when the user picks a custom start date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coarse migration complexity bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplexityLevel::Low => write!(f, "Low"),
            ComplexityLevel::Medium => write!(f, "Medium"),
            ComplexityLevel::High => write!(f, "High"),
        }
    }
}

/// Optional AI commentary attached to a report.
///
/// Backends without an AI integration simply omit this; viewers must
/// render without it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AiInsights {
    /// Confidence in the generated advice, 0-100.
    pub confidence_level: u32,
    /// Model or rule set that produced the advice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Free-form recommendations.
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Cost estimation

/// Monthly compute costs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComputeCosts {
    /// Server compute, USD/month.
    pub servers: f64,
    /// Managed database compute, USD/month.
    pub databases: f64,
    /// Section total, USD/month.
    pub monthly_total: f64,
}

/// Monthly storage costs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StorageCosts {
    /// File share storage, USD/month.
    pub file_shares: f64,
    /// Backup storage, USD/month.
    pub backups: f64,
    /// Section total, USD/month.
    pub monthly_total: f64,
}

/// Monthly networking costs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NetworkingCosts {
    /// Data transfer, USD/month.
    pub data_transfer: f64,
    /// VPN gateway, USD/month.
    pub vpn_gateway: f64,
    /// Section total, USD/month.
    pub monthly_total: f64,
}

/// Cost breakdown by category.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CostBreakdown {
    pub compute: ComputeCosts,
    pub storage: StorageCosts,
    pub networking: NetworkingCosts,
}

/// Headline cost numbers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CostSummary {
    /// Estimated total, USD/month.
    pub monthly_cost: f64,
    /// Estimated total, USD/year.
    pub annual_cost: f64,
    /// Currency code.
    pub currency: String,
    /// When the estimate was computed.
    pub last_updated: DateTime<Utc>,
}

/// Cloud-vs-on-premises comparison.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SavingsAnalysis {
    /// Estimated equivalent on-premises spend, USD/month.
    pub on_premises_estimated: f64,
    /// Spend after right-sizing, USD/month.
    pub cloud_optimized: f64,
    /// Potential monthly savings, USD.
    pub potential_monthly_savings: f64,
    /// Months until the migration pays for itself.
    pub roi_months: u32,
}

/// Full cost estimation report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CostReport {
    pub breakdown: CostBreakdown,
    pub summary: CostSummary,
    pub savings: SavingsAnalysis,
    /// Optional AI commentary; omitted when no AI service is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<AiInsights>,
}

// ---------------------------------------------------------------------------
// Migration strategy

/// Headline strategy numbers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StrategyOverview {
    /// Recommended overall approach.
    pub recommended_approach: String,
    /// Complexity bucket.
    pub complexity_level: ComplexityLevel,
    /// Estimated project length in weeks.
    pub estimated_duration_weeks: u32,
    /// Confidence in the recommendation, 0-100.
    pub confidence_score: u32,
    /// Total workloads in scope.
    pub total_workloads: u32,
}

/// One strategy phase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StrategyPhase {
    /// Phase number, 1-based.
    pub phase: u32,
    /// Phase name.
    pub name: String,
    /// Length in weeks.
    pub duration_weeks: u32,
    /// What happens in this phase.
    pub description: String,
    /// Expected deliverables.
    pub deliverables: Vec<String>,
}

/// Workload risk counts with mitigations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiskAssessment {
    pub high_risk_items: u32,
    pub medium_risk_items: u32,
    pub low_risk_items: u32,
    pub mitigation_strategies: Vec<String>,
}

/// Full migration strategy report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StrategyReport {
    pub overview: StrategyOverview,
    pub phases: Vec<StrategyPhase>,
    pub risk_assessment: RiskAssessment,
    pub recommendations: Vec<String>,
    /// Optional AI commentary; omitted when no AI service is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<AiInsights>,
}

// ---------------------------------------------------------------------------
// Timeline

/// Headline timeline numbers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelineOverview {
    /// Total project length in weeks.
    pub total_duration_weeks: u32,
    /// Planned start date.
    pub estimated_start_date: NaiveDate,
    /// Derived end date (start + total weeks).
    pub estimated_end_date: NaiveDate,
    /// Confidence wording (e.g. "High").
    pub confidence_level: String,
    /// Weighted workload complexity score.
    pub complexity_score: f64,
}

/// One timeline phase with week offsets relative to project start.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelinePhase {
    /// Phase number, 1-based.
    pub phase: u32,
    /// Phase title.
    pub title: String,
    /// What happens in this phase.
    pub description: String,
    /// Length in weeks.
    pub duration_weeks: u32,
    /// First week of the phase, 1-based.
    pub start_week: u32,
    /// Last week of the phase, inclusive.
    pub end_week: u32,
    /// Milestones reached when the phase completes.
    pub milestones: Vec<String>,
    /// Roles needed during the phase.
    pub resources_required: Vec<String>,
}

/// Full migration timeline report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelineReport {
    pub overview: TimelineOverview,
    pub phases: Vec<TimelinePhase>,
    /// Phase titles on the critical path.
    pub critical_path: Vec<String>,
    /// Optional AI commentary; omitted when no AI service is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<AiInsights>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ai_insights_deserializes_to_none() {
        let raw = serde_json::json!({
            "overview": {
                "total_duration_weeks": 16,
                "estimated_start_date": "2024-03-01",
                "estimated_end_date": "2024-06-21",
                "confidence_level": "High",
                "complexity_score": 4.5
            },
            "phases": [],
            "critical_path": []
        });
        let report: TimelineReport = serde_json::from_value(raw).unwrap();
        assert!(report.ai_insights.is_none());
        assert_eq!(report.overview.total_duration_weeks, 16);
    }
}
