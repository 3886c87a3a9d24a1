//! In-memory storage.
//!
//! One table per inventory collection plus the two configuration
//! singletons, all behind `tokio::sync::RwLock`. Ids are allocated
//! monotonically per table and never reused within a process, so a
//! deleted id stays gone from every later fetch.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use common::errors::{AppError, AppResult};
use common::models::{
    AccessPattern, BusinessConstraintDraft, BusinessConstraintItem, CloudPreferenceDraft,
    CloudPreferenceItem, DatabaseDraft, DatabaseItem, DiskType, DowntimeTolerance, FileShareDraft,
    FileShareItem, InventoryEntity, ResourceRateDraft, ResourceRateItem, ServerDraft, ServerItem,
    WriteFrequency,
};

/// Conversion between drafts and stored rows.
pub trait StoredEntity: InventoryEntity {
    /// Builds a stored row from a validated draft.
    fn from_draft(id: i64, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Applies a validated draft to an existing row.
    fn apply_draft(&mut self, draft: Self::Draft, now: DateTime<Utc>);
}

impl StoredEntity for ServerItem {
    fn from_draft(id: i64, draft: ServerDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            server_id: draft.server_id,
            os_type: draft.os_type,
            vcpu: draft.vcpu,
            ram_gb: draft.ram_gb,
            disk_size_gb: draft.disk_size_gb,
            disk_type: draft.disk_type,
            uptime_pattern: draft.uptime_pattern,
            current_hosting: draft.current_hosting,
            technology: draft.technology,
            technology_version: draft.technology_version,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply_draft(&mut self, draft: ServerDraft, now: DateTime<Utc>) {
        self.server_id = draft.server_id;
        self.os_type = draft.os_type;
        self.vcpu = draft.vcpu;
        self.ram_gb = draft.ram_gb;
        self.disk_size_gb = draft.disk_size_gb;
        self.disk_type = draft.disk_type;
        self.uptime_pattern = draft.uptime_pattern;
        self.current_hosting = draft.current_hosting;
        self.technology = draft.technology;
        self.technology_version = draft.technology_version;
        self.updated_at = Some(now);
    }
}

impl StoredEntity for DatabaseItem {
    fn from_draft(id: i64, draft: DatabaseDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            engine: draft.engine,
            size_gb: draft.size_gb,
            server_id: draft.server_id,
            write_frequency: draft.write_frequency,
            backup_frequency: draft.backup_frequency,
            ha_dr_required: draft.ha_dr_required,
            licensing_model: draft.licensing_model,
            downtime_tolerance: draft.downtime_tolerance,
            real_time_sync: draft.real_time_sync,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply_draft(&mut self, draft: DatabaseDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.engine = draft.engine;
        self.size_gb = draft.size_gb;
        self.server_id = draft.server_id;
        self.write_frequency = draft.write_frequency;
        self.backup_frequency = draft.backup_frequency;
        self.ha_dr_required = draft.ha_dr_required;
        self.licensing_model = draft.licensing_model;
        self.downtime_tolerance = draft.downtime_tolerance;
        self.real_time_sync = draft.real_time_sync;
        self.updated_at = Some(now);
    }
}

impl StoredEntity for FileShareItem {
    fn from_draft(id: i64, draft: FileShareDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            size_gb: draft.size_gb,
            server_id: draft.server_id,
            access_pattern: draft.access_pattern,
            retention_days: draft.retention_days,
            snapshot_required: draft.snapshot_required,
            write_frequency: draft.write_frequency,
            real_time_sync: draft.real_time_sync,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply_draft(&mut self, draft: FileShareDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.size_gb = draft.size_gb;
        self.server_id = draft.server_id;
        self.access_pattern = draft.access_pattern;
        self.retention_days = draft.retention_days;
        self.snapshot_required = draft.snapshot_required;
        self.write_frequency = draft.write_frequency;
        self.real_time_sync = draft.real_time_sync;
        self.updated_at = Some(now);
    }
}

impl StoredEntity for ResourceRateItem {
    fn from_draft(id: i64, draft: ResourceRateDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            role: draft.role,
            duration_weeks: draft.duration_weeks,
            hours_per_week: draft.hours_per_week,
            rate_per_hour: draft.rate_per_hour,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply_draft(&mut self, draft: ResourceRateDraft, now: DateTime<Utc>) {
        self.role = draft.role;
        self.duration_weeks = draft.duration_weeks;
        self.hours_per_week = draft.hours_per_week;
        self.rate_per_hour = draft.rate_per_hour;
        self.updated_at = Some(now);
    }
}

/// One inventory table.
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T: StoredEntity> Table<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            rows: BTreeMap::new(),
        }
    }

    fn list(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn insert(&mut self, draft: T::Draft) -> T {
        self.next_id += 1;
        let row = T::from_draft(self.next_id, draft, Utc::now());
        self.rows.insert(row.id(), row.clone());
        row
    }

    fn update(&mut self, id: i64, draft: T::Draft) -> AppResult<T> {
        let row = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("{} {id}", T::ENTITY)))?;
        row.apply_draft(draft, Utc::now());
        Ok(row.clone())
    }

    fn remove(&mut self, id: i64) -> AppResult<()> {
        self.rows
            .remove(&id)
            .map(drop)
            .ok_or_else(|| AppError::NotFound(format!("{} {id}", T::ENTITY)))
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// All in-memory state of the dev backend.
pub struct Store {
    servers: RwLock<Table<ServerItem>>,
    databases: RwLock<Table<DatabaseItem>>,
    file_shares: RwLock<Table<FileShareItem>>,
    resource_rates: RwLock<Table<ResourceRateItem>>,
    cloud_preferences: RwLock<Option<CloudPreferenceItem>>,
    business_constraints: RwLock<Option<BusinessConstraintItem>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            servers: RwLock::new(Table::new()),
            databases: RwLock::new(Table::new()),
            file_shares: RwLock::new(Table::new()),
            resource_rates: RwLock::new(Table::new()),
            cloud_preferences: RwLock::new(None),
            business_constraints: RwLock::new(None),
        }
    }

    // -- servers -------------------------------------------------------------

    pub async fn list_servers(&self) -> Vec<ServerItem> {
        self.servers.read().await.list()
    }

    pub async fn create_server(&self, draft: ServerDraft) -> AppResult<ServerItem> {
        let mut table = self.servers.write().await;
        if table.rows.values().any(|s| s.server_id == draft.server_id) {
            return Err(AppError::Validation(format!(
                "server_id '{}' already exists",
                draft.server_id
            )));
        }
        Ok(table.insert(draft))
    }

    pub async fn update_server(&self, id: i64, draft: ServerDraft) -> AppResult<ServerItem> {
        let mut table = self.servers.write().await;
        if table
            .rows
            .values()
            .any(|s| s.server_id == draft.server_id && s.id != id)
        {
            return Err(AppError::Validation(format!(
                "server_id '{}' already exists",
                draft.server_id
            )));
        }
        table.update(id, draft)
    }

    pub async fn delete_server(&self, id: i64) -> AppResult<()> {
        self.servers.write().await.remove(id)
    }

    // -- databases -----------------------------------------------------------

    pub async fn list_databases(&self) -> Vec<DatabaseItem> {
        self.databases.read().await.list()
    }

    pub async fn create_database(&self, draft: DatabaseDraft) -> AppResult<DatabaseItem> {
        Ok(self.databases.write().await.insert(draft))
    }

    pub async fn update_database(&self, id: i64, draft: DatabaseDraft) -> AppResult<DatabaseItem> {
        self.databases.write().await.update(id, draft)
    }

    pub async fn delete_database(&self, id: i64) -> AppResult<()> {
        self.databases.write().await.remove(id)
    }

    // -- file shares ---------------------------------------------------------

    pub async fn list_file_shares(&self) -> Vec<FileShareItem> {
        self.file_shares.read().await.list()
    }

    pub async fn create_file_share(&self, draft: FileShareDraft) -> AppResult<FileShareItem> {
        Ok(self.file_shares.write().await.insert(draft))
    }

    pub async fn update_file_share(
        &self,
        id: i64,
        draft: FileShareDraft,
    ) -> AppResult<FileShareItem> {
        self.file_shares.write().await.update(id, draft)
    }

    pub async fn delete_file_share(&self, id: i64) -> AppResult<()> {
        self.file_shares.write().await.remove(id)
    }

    // -- resource rates -------------------------------------------------------

    pub async fn list_resource_rates(&self) -> Vec<ResourceRateItem> {
        self.resource_rates.read().await.list()
    }

    pub async fn create_resource_rate(
        &self,
        draft: ResourceRateDraft,
    ) -> AppResult<ResourceRateItem> {
        Ok(self.resource_rates.write().await.insert(draft))
    }

    pub async fn update_resource_rate(
        &self,
        id: i64,
        draft: ResourceRateDraft,
    ) -> AppResult<ResourceRateItem> {
        self.resource_rates.write().await.update(id, draft)
    }

    pub async fn delete_resource_rate(&self, id: i64) -> AppResult<()> {
        self.resource_rates.write().await.remove(id)
    }

    // -- configuration singletons --------------------------------------------

    pub async fn cloud_preferences(&self) -> Option<CloudPreferenceItem> {
        self.cloud_preferences.read().await.clone()
    }

    pub async fn create_cloud_preferences(
        &self,
        draft: CloudPreferenceDraft,
    ) -> AppResult<CloudPreferenceItem> {
        let mut slot = self.cloud_preferences.write().await;
        if slot.is_some() {
            return Err(AppError::Validation(
                "cloud preferences already exist; use PUT to update".to_string(),
            ));
        }
        let item = CloudPreferenceItem {
            id: 1,
            provider: draft.provider,
            region: draft.region,
            preferred_services: draft.preferred_services,
            network_config: draft.network_config,
            created_at: Utc::now(),
            updated_at: None,
        };
        *slot = Some(item.clone());
        Ok(item)
    }

    pub async fn update_cloud_preferences(
        &self,
        id: i64,
        draft: CloudPreferenceDraft,
    ) -> AppResult<CloudPreferenceItem> {
        let mut slot = self.cloud_preferences.write().await;
        match slot.as_mut() {
            Some(item) if item.id == id => {
                item.provider = draft.provider;
                item.region = draft.region;
                item.preferred_services = draft.preferred_services;
                item.network_config = draft.network_config;
                item.updated_at = Some(Utc::now());
                Ok(item.clone())
            }
            _ => Err(AppError::NotFound(format!("cloud preference {id}"))),
        }
    }

    pub async fn business_constraints(&self) -> Option<BusinessConstraintItem> {
        self.business_constraints.read().await.clone()
    }

    pub async fn create_business_constraints(
        &self,
        draft: BusinessConstraintDraft,
    ) -> AppResult<BusinessConstraintItem> {
        let mut slot = self.business_constraints.write().await;
        if slot.is_some() {
            return Err(AppError::Validation(
                "business constraints already exist; use PUT to update".to_string(),
            ));
        }
        let item = BusinessConstraintItem {
            id: 1,
            migration_window: draft.migration_window,
            cutover_date: draft.cutover_date,
            downtime_tolerance: draft.downtime_tolerance,
            budget_cap: draft.budget_cap,
            created_at: Utc::now(),
            updated_at: None,
        };
        *slot = Some(item.clone());
        Ok(item)
    }

    pub async fn update_business_constraints(
        &self,
        id: i64,
        draft: BusinessConstraintDraft,
    ) -> AppResult<BusinessConstraintItem> {
        let mut slot = self.business_constraints.write().await;
        match slot.as_mut() {
            Some(item) if item.id == id => {
                item.migration_window = draft.migration_window;
                item.cutover_date = draft.cutover_date;
                item.downtime_tolerance = draft.downtime_tolerance;
                item.budget_cap = draft.budget_cap;
                item.updated_at = Some(Utc::now());
                Ok(item.clone())
            }
            _ => Err(AppError::NotFound(format!("business constraint {id}"))),
        }
    }

    // -- aggregate views ------------------------------------------------------

    pub async fn counts(&self) -> (u32, u32, u32) {
        (
            self.servers.read().await.len() as u32,
            self.databases.read().await.len() as u32,
            self.file_shares.read().await.len() as u32,
        )
    }

    /// Consistent copy of everything the planner needs.
    pub async fn snapshot(&self) -> PlanningSnapshot {
        PlanningSnapshot {
            servers: self.list_servers().await,
            databases: self.list_databases().await,
            file_shares: self.list_file_shares().await,
            resource_rates: self.list_resource_rates().await,
            constraints: self.business_constraints().await,
            preferences: self.cloud_preferences().await,
        }
    }

    /// Seeds the tables with the sample inventory used by the original
    /// development servers. Invoked with `DEV_BACKEND_SEED=1`.
    pub async fn seed_sample_data(&self) {
        let servers = [
            ("web-server-01", "Ubuntu 22.04", 4, 16, 100, DiskType::Ssd, "Apache, PHP"),
            ("db-server-01", "Windows Server 2019", 8, 32, 500, DiskType::Ssd, "SQL Server"),
            ("app-server-01", "Ubuntu 20.04", 6, 24, 200, DiskType::Hdd, "Node.js, Docker"),
            ("file-server-01", "Windows Server 2019", 2, 8, 1000, DiskType::Hdd, "File Services"),
            ("backup-server-01", "CentOS 7", 4, 16, 2000, DiskType::Hdd, "Veeam, rsync"),
        ];
        for (server_id, os, vcpu, ram, disk, disk_type, tech) in servers {
            let _ = self
                .create_server(ServerDraft {
                    server_id: server_id.into(),
                    os_type: os.into(),
                    vcpu,
                    ram_gb: ram,
                    disk_size_gb: disk,
                    disk_type,
                    uptime_pattern: "24x7".into(),
                    current_hosting: "On-Premise".into(),
                    technology: tech.into(),
                    technology_version: None,
                })
                .await;
        }

        let databases = [
            ("production-db", "MySQL", 50, "db-server-01", true, true),
            ("analytics-db", "PostgreSQL", 100, "db-server-01", false, false),
            ("cache-db", "Redis", 10, "app-server-01", false, false),
            ("archive-db", "SQL Server", 200, "db-server-01", true, false),
        ];
        for (name, engine, size, server, ha_dr, sync) in databases {
            let _ = self
                .create_database(DatabaseDraft {
                    name: name.into(),
                    engine: engine.into(),
                    size_gb: size,
                    server_id: server.into(),
                    write_frequency: WriteFrequency::Medium,
                    backup_frequency: "Daily".into(),
                    ha_dr_required: ha_dr,
                    licensing_model: "Open Source".into(),
                    downtime_tolerance: "Low".into(),
                    real_time_sync: sync,
                })
                .await;
        }

        let file_shares = [
            ("shared-docs", 200, "web-server-01", AccessPattern::Hot, 30, true),
            ("backup-share", 500, "db-server-01", AccessPattern::Cold, 365, true),
            ("temp-storage", 50, "app-server-01", AccessPattern::Warm, 7, false),
        ];
        for (name, size, server, pattern, retention, snapshot) in file_shares {
            let _ = self
                .create_file_share(FileShareDraft {
                    name: name.into(),
                    size_gb: size,
                    server_id: server.into(),
                    access_pattern: pattern,
                    retention_days: retention,
                    snapshot_required: snapshot,
                    write_frequency: WriteFrequency::Medium,
                    real_time_sync: false,
                })
                .await;
        }

        let rates = [
            ("Cloud Architect", 12, 40, 175.0),
            ("Migration Engineer", 8, 40, 145.0),
            ("Database Specialist", 6, 35, 155.0),
            ("DevOps Engineer", 10, 40, 135.0),
            ("Security Engineer", 4, 30, 165.0),
        ];
        for (role, weeks, hours, rate) in rates {
            let _ = self
                .create_resource_rate(ResourceRateDraft {
                    role: role.into(),
                    duration_weeks: weeks,
                    hours_per_week: hours,
                    rate_per_hour: rate,
                })
                .await;
        }

        let _ = self
            .create_business_constraints(BusinessConstraintDraft {
                migration_window: "Weekends Only".into(),
                cutover_date: Utc::now().date_naive() + chrono::Days::new(180),
                downtime_tolerance: DowntimeTolerance::Low,
                budget_cap: Some(250_000.0),
            })
            .await;
    }
}

/// Point-in-time copy of the store for planning computations.
pub struct PlanningSnapshot {
    pub servers: Vec<ServerItem>,
    pub databases: Vec<DatabaseItem>,
    pub file_shares: Vec<FileShareItem>,
    pub resource_rates: Vec<ResourceRateItem>,
    pub constraints: Option<BusinessConstraintItem>,
    pub preferences: Option<CloudPreferenceItem>,
}

impl PlanningSnapshot {
    /// Total workloads across all collections.
    pub fn total_items(&self) -> u32 {
        (self.servers.len() + self.databases.len() + self.file_shares.len()) as u32
    }

    /// Total data volume (databases plus file shares), GB.
    pub fn total_data_gb(&self) -> u64 {
        let db: u64 = self.databases.iter().map(|d| u64::from(d.size_gb)).sum();
        let fs: u64 = self.file_shares.iter().map(|f| u64::from(f.size_gb)).sum();
        db + fs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_draft(server_id: &str) -> ServerDraft {
        ServerDraft {
            server_id: server_id.into(),
            os_type: "Ubuntu 22.04".into(),
            vcpu: 2,
            ram_gb: 4,
            disk_size_gb: 50,
            disk_type: DiskType::Ssd,
            uptime_pattern: "24x7".into(),
            current_hosting: "On-Premise".into(),
            technology: "Nginx".into(),
            technology_version: None,
        }
    }

    #[tokio::test]
    async fn ids_are_monotonic_and_never_reused() {
        let store = Store::new();
        let a = store.create_server(server_draft("a")).await.unwrap();
        let b = store.create_server(server_draft("b")).await.unwrap();
        assert!(b.id > a.id);

        store.delete_server(b.id).await.unwrap();
        let c = store.create_server(server_draft("c")).await.unwrap();
        assert!(c.id > b.id);
    }

    #[tokio::test]
    async fn duplicate_server_id_is_rejected() {
        let store = Store::new();
        store.create_server(server_draft("web-01")).await.unwrap();
        let err = store.create_server(server_draft("web-01")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.list_servers().await.len(), 1);
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_not_found() {
        let store = Store::new();
        assert!(matches!(
            store.delete_server(99).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn singleton_create_twice_fails() {
        let store = Store::new();
        let draft = CloudPreferenceDraft {
            provider: common::models::CloudProvider::Aws,
            region: "eu-central-1".into(),
            preferred_services: vec![],
            network_config: "VPC".into(),
        };
        store.create_cloud_preferences(draft.clone()).await.unwrap();
        assert!(store.create_cloud_preferences(draft).await.is_err());
    }

    #[tokio::test]
    async fn seeded_store_has_baseline_inventory() {
        let store = Store::new();
        store.seed_sample_data().await;
        let (servers, databases, file_shares) = store.counts().await;
        assert_eq!((servers, databases, file_shares), (5, 4, 3));
        assert_eq!(store.list_resource_rates().await.len(), 5);
    }
}
