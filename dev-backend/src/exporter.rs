//! Report file generation.
//!
//! Renders the selected report sections into a JSON, CSV or Markdown
//! artifact under the exports directory. Artifacts are plain files; the
//! download endpoint serves their bytes back.

use std::path::{Path, PathBuf};

use chrono::Utc;

use common::errors::{AppError, AppResult};
use common::models::{ExportArtifact, ExportFormat, ExportRequest, ReportSection};
use common::utils::IdGenerator;

use crate::planner;
use crate::store::PlanningSnapshot;

/// Writes report artifacts and lists previously generated ones.
pub struct ExportService {
    exports_dir: PathBuf,
}

impl ExportService {
    /// Creates the service, ensuring the exports directory exists.
    pub fn new(exports_dir: PathBuf) -> AppResult<Self> {
        std::fs::create_dir_all(&exports_dir)?;
        Ok(Self { exports_dir })
    }

    /// Directory artifacts are written to.
    pub fn exports_dir(&self) -> &Path {
        &self.exports_dir
    }

    /// Generates an artifact for the requested sections and format.
    pub fn generate(
        &self,
        snapshot: &PlanningSnapshot,
        request: &ExportRequest,
    ) -> AppResult<ExportArtifact> {
        let content = match request.format {
            ExportFormat::Json => render_json(snapshot, &request.sections)?,
            ExportFormat::Csv => render_csv(snapshot, &request.sections),
            ExportFormat::Markdown => render_markdown(snapshot, &request.sections),
        };

        let filename = format!(
            "migration_report_{}.{}",
            IdGenerator::short_id(),
            request.format.extension()
        );
        let path = self.exports_dir.join(&filename);
        std::fs::write(&path, content.as_bytes())?;

        tracing::info!(file = %path.display(), bytes = content.len(), "export generated");
        Ok(ExportArtifact {
            filename: filename.clone(),
            size_bytes: content.len() as u64,
            format: request.format,
            created_at: Utc::now(),
            download_path: format!("/api/download/{filename}"),
        })
    }

    /// Lists generated artifacts, newest first.
    pub fn list(&self) -> AppResult<Vec<ExportArtifact>> {
        let mut artifacts = Vec::new();
        for entry in std::fs::read_dir(&self.exports_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let filename = entry.file_name().to_string_lossy().to_string();
            let Some(format) = format_for(&filename) else {
                continue;
            };
            let metadata = entry.metadata()?;
            artifacts.push(ExportArtifact {
                size_bytes: metadata.len(),
                format,
                created_at: metadata
                    .modified()
                    .map(Into::into)
                    .unwrap_or_else(|_| Utc::now()),
                download_path: format!("/api/download/{filename}"),
                filename,
            });
        }
        artifacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(artifacts)
    }

    /// Reads a generated artifact's bytes.
    pub fn read(&self, filename: &str) -> AppResult<Vec<u8>> {
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(AppError::Validation(format!(
                "invalid export file name '{filename}'"
            )));
        }
        let path = self.exports_dir.join(filename);
        if !path.is_file() {
            return Err(AppError::NotFound(format!("export file {filename}")));
        }
        Ok(std::fs::read(path)?)
    }
}

fn format_for(filename: &str) -> Option<ExportFormat> {
    match Path::new(filename).extension()?.to_str()? {
        "json" => Some(ExportFormat::Json),
        "csv" => Some(ExportFormat::Csv),
        "md" => Some(ExportFormat::Markdown),
        _ => None,
    }
}

fn render_json(snapshot: &PlanningSnapshot, sections: &[ReportSection]) -> AppResult<String> {
    let mut root = serde_json::Map::new();
    root.insert(
        "generated_at".to_string(),
        serde_json::Value::String(Utc::now().to_rfc3339()),
    );
    for section in sections {
        match section {
            ReportSection::Inventory => {
                root.insert(
                    "inventory".to_string(),
                    serde_json::json!({
                        "servers": snapshot.servers,
                        "databases": snapshot.databases,
                        "file_shares": snapshot.file_shares,
                        "resource_rates": snapshot.resource_rates,
                    }),
                );
            }
            ReportSection::CostEstimation => {
                root.insert(
                    "cost_estimation".to_string(),
                    serde_json::to_value(planner::cost_report(snapshot))
                        .map_err(|e| AppError::Decode(e.to_string()))?,
                );
            }
            ReportSection::MigrationStrategy => {
                root.insert(
                    "migration_strategy".to_string(),
                    serde_json::to_value(planner::strategy_report(snapshot))
                        .map_err(|e| AppError::Decode(e.to_string()))?,
                );
            }
            ReportSection::Timeline => {
                root.insert(
                    "timeline".to_string(),
                    serde_json::to_value(planner::timeline_report(snapshot, None))
                        .map_err(|e| AppError::Decode(e.to_string()))?,
                );
            }
        }
    }
    serde_json::to_string_pretty(&serde_json::Value::Object(root))
        .map_err(|e| AppError::Decode(e.to_string()))
}

fn render_csv(snapshot: &PlanningSnapshot, sections: &[ReportSection]) -> String {
    let mut out = String::new();
    for section in sections {
        match section {
            ReportSection::Inventory => {
                out.push_str("section,id,name,detail,size_gb\n");
                for s in &snapshot.servers {
                    out.push_str(&format!(
                        "server,{},{},{},{}\n",
                        s.id, s.server_id, s.os_type, s.disk_size_gb
                    ));
                }
                for d in &snapshot.databases {
                    out.push_str(&format!(
                        "database,{},{},{},{}\n",
                        d.id, d.name, d.engine, d.size_gb
                    ));
                }
                for f in &snapshot.file_shares {
                    out.push_str(&format!(
                        "file_share,{},{},{},{}\n",
                        f.id, f.name, f.access_pattern, f.size_gb
                    ));
                }
                for r in &snapshot.resource_rates {
                    out.push_str(&format!(
                        "resource_rate,{},{},{} USD/h,{}\n",
                        r.id,
                        r.role,
                        r.rate_per_hour,
                        r.total_cost()
                    ));
                }
                out.push('\n');
            }
            ReportSection::CostEstimation => {
                let report = planner::cost_report(snapshot);
                out.push_str("category,line,monthly_usd\n");
                out.push_str(&format!("compute,servers,{}\n", report.breakdown.compute.servers));
                out.push_str(&format!(
                    "compute,databases,{}\n",
                    report.breakdown.compute.databases
                ));
                out.push_str(&format!(
                    "storage,file_shares,{}\n",
                    report.breakdown.storage.file_shares
                ));
                out.push_str(&format!("storage,backups,{}\n", report.breakdown.storage.backups));
                out.push_str(&format!(
                    "networking,data_transfer,{}\n",
                    report.breakdown.networking.data_transfer
                ));
                out.push_str(&format!(
                    "networking,vpn_gateway,{}\n",
                    report.breakdown.networking.vpn_gateway
                ));
                out.push_str(&format!("total,monthly,{}\n\n", report.summary.monthly_cost));
            }
            ReportSection::MigrationStrategy => {
                let report = planner::strategy_report(snapshot);
                out.push_str("phase,name,duration_weeks\n");
                for phase in &report.phases {
                    out.push_str(&format!(
                        "{},{},{}\n",
                        phase.phase, phase.name, phase.duration_weeks
                    ));
                }
                out.push('\n');
            }
            ReportSection::Timeline => {
                let report = planner::timeline_report(snapshot, None);
                out.push_str("phase,title,start_week,end_week\n");
                for phase in &report.phases {
                    out.push_str(&format!(
                        "{},{},{},{}\n",
                        phase.phase, phase.title, phase.start_week, phase.end_week
                    ));
                }
                out.push('\n');
            }
        }
    }
    out
}

fn render_markdown(snapshot: &PlanningSnapshot, sections: &[ReportSection]) -> String {
    let mut out = String::from("# Cloud Migration Report\n\n");
    for section in sections {
        match section {
            ReportSection::Inventory => {
                out.push_str("## Inventory\n\n");
                out.push_str(&format!(
                    "- servers: {}\n- databases: {}\n- file shares: {}\n- resource rates: {}\n\n",
                    snapshot.servers.len(),
                    snapshot.databases.len(),
                    snapshot.file_shares.len(),
                    snapshot.resource_rates.len()
                ));
                out.push_str("| Server | OS | vCPU | RAM (GB) | Disk (GB) |\n|---|---|---|---|---|\n");
                for s in &snapshot.servers {
                    out.push_str(&format!(
                        "| {} | {} | {} | {} | {} |\n",
                        s.server_id, s.os_type, s.vcpu, s.ram_gb, s.disk_size_gb
                    ));
                }
                out.push('\n');
            }
            ReportSection::CostEstimation => {
                let report = planner::cost_report(snapshot);
                out.push_str("## Cost Estimation\n\n");
                out.push_str(&format!(
                    "Monthly: **{:.2} USD**, annual: **{:.2} USD**\n\n",
                    report.summary.monthly_cost, report.summary.annual_cost
                ));
            }
            ReportSection::MigrationStrategy => {
                let report = planner::strategy_report(snapshot);
                out.push_str("## Migration Strategy\n\n");
                out.push_str(&format!(
                    "{} ({} complexity, {} weeks)\n\n",
                    report.overview.recommended_approach,
                    report.overview.complexity_level,
                    report.overview.estimated_duration_weeks
                ));
                for phase in &report.phases {
                    out.push_str(&format!(
                        "{}. {} — {} weeks\n",
                        phase.phase, phase.name, phase.duration_weeks
                    ));
                }
                out.push('\n');
            }
            ReportSection::Timeline => {
                let report = planner::timeline_report(snapshot, None);
                out.push_str("## Timeline\n\n");
                out.push_str(&format!(
                    "{} weeks, {} to {}\n\n",
                    report.overview.total_duration_weeks,
                    report.overview.estimated_start_date,
                    report.overview.estimated_end_date
                ));
                for phase in &report.phases {
                    out.push_str(&format!(
                        "- week {}-{}: {}\n",
                        phase.start_week, phase.end_week, phase.title
                    ));
                }
                out.push('\n');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "migration-exports-{tag}-{}",
            IdGenerator::short_id()
        ));
        dir
    }

    #[tokio::test]
    async fn generates_and_reads_back_a_json_artifact() {
        let store = Store::new();
        store.seed_sample_data().await;
        let snapshot = store.snapshot().await;

        let service = ExportService::new(temp_dir("json")).unwrap();
        let request = ExportRequest {
            format: ExportFormat::Json,
            sections: vec![ReportSection::Inventory, ReportSection::CostEstimation],
        };
        let artifact = service.generate(&snapshot, &request).unwrap();
        assert!(artifact.filename.ends_with(".json"));
        assert!(artifact.size_bytes > 0);

        let bytes = service.read(&artifact.filename).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value.get("inventory").is_some());
        assert!(value.get("cost_estimation").is_some());
        assert!(value.get("timeline").is_none());
    }

    #[tokio::test]
    async fn listed_artifacts_include_generated_files() {
        let store = Store::new();
        let snapshot = store.snapshot().await;
        let service = ExportService::new(temp_dir("list")).unwrap();
        let request = ExportRequest {
            format: ExportFormat::Markdown,
            sections: vec![ReportSection::Timeline],
        };
        let artifact = service.generate(&snapshot, &request).unwrap();

        let listed = service.list().unwrap();
        assert!(listed.iter().any(|a| a.filename == artifact.filename));
    }

    #[test]
    fn path_traversal_is_rejected() {
        let service = ExportService::new(temp_dir("sec")).unwrap();
        assert!(matches!(
            service.read("../etc/passwd").unwrap_err(),
            AppError::Validation(_)
        ));
    }
}
