//! Application state for the dev backend.

use std::path::PathBuf;
use std::sync::Arc;

use common::config::AppConfig;
use common::errors::AppResult;

use crate::exporter::ExportService;
use crate::store::Store;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<Store>,
    pub exporter: Arc<ExportService>,
}

impl AppState {
    /// Creates a new application state with the given exports directory.
    pub fn new(config: AppConfig, exports_dir: PathBuf) -> AppResult<Self> {
        Ok(Self {
            config,
            store: Arc::new(Store::new()),
            exporter: Arc::new(ExportService::new(exports_dir)?),
        })
    }
}
