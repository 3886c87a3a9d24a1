//! Export trigger.
//!
//! The panel asks the backend to generate a report file, keeps a
//! session-only history of what it triggered, and can download a
//! generated file's bytes to disk. No report content is produced
//! locally.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use validator::Validate;

use api_client::{ApiTransport, MigrationClient};
use common::errors::{AppError, AppResult};
use common::models::{ExportArtifact, ExportFormat, ExportRequest, ReportSection};

/// Export trigger and session history.
pub struct ExportPanel<T> {
    client: Arc<MigrationClient<T>>,
    /// Artifacts triggered in this session, newest first. Not persisted.
    history: Vec<ExportArtifact>,
    last_error: Option<String>,
}

impl<T: ApiTransport> ExportPanel<T> {
    pub fn new(client: Arc<MigrationClient<T>>) -> Self {
        Self {
            client,
            history: Vec::new(),
            last_error: None,
        }
    }

    /// Requests report generation and records the resulting artifact.
    pub async fn export(
        &mut self,
        format: ExportFormat,
        sections: Vec<ReportSection>,
    ) -> AppResult<ExportArtifact> {
        let request = ExportRequest { format, sections };
        request.validate().map_err(AppError::from_validation)?;

        match self.client.export(&request).await {
            Ok(artifact) => {
                self.history.insert(0, artifact.clone());
                self.last_error = None;
                Ok(artifact)
            }
            Err(e) => {
                tracing::error!(error = %e, "export request failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetches the backend's list of generated files.
    pub async fn remote_artifacts(&self) -> AppResult<Vec<ExportArtifact>> {
        self.client.exports().await
    }

    /// Artifacts triggered in this session, newest first.
    pub fn history(&self) -> &[ExportArtifact] {
        &self.history
    }

    /// Downloads a generated file into `dir` and returns the local path.
    pub async fn download_to(&self, filename: &str, dir: &Path) -> AppResult<PathBuf> {
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(AppError::Validation(format!(
                "invalid export file name '{filename}'"
            )));
        }

        let bytes = self.client.download(filename).await?;
        let path = dir.join(filename);
        tokio::fs::write(&path, &bytes).await?;
        tracing::info!(file = %path.display(), bytes = bytes.len(), "export downloaded");
        Ok(path)
    }

    /// Message of the most recent failure.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_list_fails_validation() {
        let request = ExportRequest {
            format: ExportFormat::Json,
            sections: vec![],
        };
        assert!(request.validate().is_err());
    }
}
