//! Report export models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// File format of a generated report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Machine-readable JSON document.
    Json,
    /// Comma-separated tables.
    Csv,
    /// Human-readable Markdown report.
    Markdown,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// Report content selectable for export.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    Inventory,
    CostEstimation,
    MigrationStrategy,
    Timeline,
}

impl std::str::FromStr for ReportSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inventory" => Ok(ReportSection::Inventory),
            "cost" | "cost_estimation" => Ok(ReportSection::CostEstimation),
            "strategy" | "migration_strategy" => Ok(ReportSection::MigrationStrategy),
            "timeline" => Ok(ReportSection::Timeline),
            other => Err(format!("unknown report section '{other}'")),
        }
    }
}

/// Request body for `/api/export`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ExportRequest {
    /// Output file format.
    pub format: ExportFormat,
    /// Report sections to include.
    #[validate(length(min = 1, message = "at least one section is required"))]
    pub sections: Vec<ReportSection>,
}

/// Metadata describing a generated report file.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExportArtifact {
    /// Generated file name.
    pub filename: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Output format.
    pub format: ExportFormat,
    /// Generation timestamp.
    pub created_at: DateTime<Utc>,
    /// Path for fetching the raw bytes.
    pub download_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!(ExportFormat::from_str("MD").unwrap(), ExportFormat::Markdown);
        assert_eq!(ExportFormat::from_str("csv").unwrap(), ExportFormat::Csv);
        assert!(ExportFormat::from_str("xlsx").is_err());
    }

    #[test]
    fn sections_accept_short_names() {
        assert_eq!(ReportSection::from_str("cost").unwrap(), ReportSection::CostEstimation);
        assert_eq!(ReportSection::from_str("strategy").unwrap(), ReportSection::MigrationStrategy);
    }
}
