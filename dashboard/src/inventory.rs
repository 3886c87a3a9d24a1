//! Generic inventory panel.
//!
//! One implementation drives all four CRUD screens (servers, databases,
//! file shares, resource rates). The panel owns the last fetched
//! collection; derived statistics are recomputed from the full
//! collection on every successful fetch rather than maintained
//! incrementally, so they always agree with what the table shows.
//! Sorting and filtering never touch the network.

use std::cmp::Ordering;
use std::sync::Arc;

use validator::Validate;

use api_client::{ApiTransport, MigrationClient};
use common::errors::{AppError, AppResult};
use common::models::{InventoryEntity, ServerItem};

/// Column the table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Backend-assigned id.
    Id,
    /// Display name, case-insensitive.
    Name,
    /// The entity's summed metric (size or cost).
    Metric,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Statistics derived from the held collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryStats {
    /// Number of records.
    pub count: usize,
    /// Sum of the entity metric over all records.
    pub metric_total: f64,
    /// Average metric per record; zero for an empty collection.
    pub metric_average: f64,
    /// Records whose boolean flag is set.
    pub flagged_count: usize,
}

impl InventoryStats {
    /// Recomputes all statistics from a full collection.
    pub fn compute<E: InventoryEntity>(records: &[E]) -> Self {
        let count = records.len();
        let metric_total: f64 = records.iter().map(InventoryEntity::metric).sum();
        let metric_average = if count == 0 {
            0.0
        } else {
            metric_total / count as f64
        };
        let flagged_count = records.iter().filter(|r| r.flagged()).count();
        Self {
            count,
            metric_total,
            metric_average,
            flagged_count,
        }
    }
}

/// CRUD panel for one inventory collection.
pub struct InventoryPanel<T, E: InventoryEntity> {
    client: Arc<MigrationClient<T>>,
    records: Vec<E>,
    stats: InventoryStats,
    last_error: Option<String>,
    sort: (SortKey, SortDirection),
    filter: Option<String>,
}

impl<T: ApiTransport, E: InventoryEntity> InventoryPanel<T, E> {
    /// Creates an empty panel; call [`refresh`](Self::refresh) to load.
    pub fn new(client: Arc<MigrationClient<T>>) -> Self {
        Self {
            client,
            records: Vec::new(),
            stats: InventoryStats::default(),
            last_error: None,
            sort: (SortKey::Id, SortDirection::Ascending),
            filter: None,
        }
    }

    /// Fetches the collection and recomputes statistics.
    ///
    /// On failure the panel falls back to an empty collection — it never
    /// keeps stale rows next to an error message.
    pub async fn refresh(&mut self) -> AppResult<()> {
        match self.client.list::<E>().await {
            Ok(records) => {
                self.stats = InventoryStats::compute(&records);
                self.records = records;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(entity = E::ENTITY, error = %e, "collection fetch failed");
                self.records.clear();
                self.stats = InventoryStats::default();
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Creates a record, then resynchronizes.
    ///
    /// A failed request leaves the held collection untouched; the table
    /// only ever reflects server-confirmed state.
    pub async fn create(&mut self, draft: E::Draft) -> AppResult<()> {
        draft.validate().map_err(AppError::from_validation)?;
        if let Err(e) = self.client.create::<E>(&draft).await {
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        self.refresh().await
    }

    /// Updates a record in place, then resynchronizes.
    pub async fn update(&mut self, id: i64, draft: E::Draft) -> AppResult<()> {
        draft.validate().map_err(AppError::from_validation)?;
        if let Err(e) = self.client.update::<E>(id, &draft).await {
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        self.refresh().await
    }

    /// Deletes a record, then resynchronizes.
    ///
    /// `confirmed` must be true; the caller is responsible for the
    /// explicit user confirmation step.
    pub async fn delete(&mut self, id: i64, confirmed: bool) -> AppResult<()> {
        if !confirmed {
            return Err(AppError::Validation(format!(
                "deleting {} {id} requires confirmation",
                E::ENTITY
            )));
        }
        if let Err(e) = self.client.delete::<E>(id).await {
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        self.refresh().await
    }

    /// Sets the sort order for [`rows`](Self::rows).
    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort = (key, direction);
    }

    /// Sets or clears the substring filter for [`rows`](Self::rows).
    pub fn set_filter(&mut self, needle: Option<String>) {
        self.filter = needle.filter(|s| !s.trim().is_empty());
    }

    /// The sorted, filtered view over the held collection.
    pub fn rows(&self) -> Vec<&E> {
        let mut rows: Vec<&E> = match &self.filter {
            Some(needle) => {
                let needle = needle.to_lowercase();
                self.records
                    .iter()
                    .filter(|r| r.search_text().to_lowercase().contains(&needle))
                    .collect()
            }
            None => self.records.iter().collect(),
        };

        let (key, direction) = self.sort;
        rows.sort_by(|a, b| {
            let ordering = match key {
                SortKey::Id => a.id().cmp(&b.id()),
                SortKey::Name => a
                    .display_name()
                    .to_lowercase()
                    .cmp(&b.display_name().to_lowercase()),
                SortKey::Metric => a
                    .metric()
                    .partial_cmp(&b.metric())
                    .unwrap_or(Ordering::Equal),
            };
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }

    /// The unfiltered held collection, in fetch order.
    pub fn records(&self) -> &[E] {
        &self.records
    }

    /// Statistics from the last successful fetch.
    pub fn stats(&self) -> &InventoryStats {
        &self.stats
    }

    /// Message of the most recent failure, if the panel is in an error state.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Checks a foreign server reference against a loaded server set.
///
/// Databases and file shares name their owning server by `server_id`;
/// the backend does not enforce the reference, so the panel rejects
/// dangling ones before issuing any request.
pub fn ensure_server_reference(
    entity: &'static str,
    server_id: &str,
    servers: &[ServerItem],
) -> AppResult<()> {
    if servers.iter().any(|s| s.server_id == server_id) {
        Ok(())
    } else {
        Err(AppError::DanglingReference {
            entity,
            server_id: server_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::models::{DiskType, ServerDraft};
    use std::collections::VecDeque;

    use api_client::ResponsePayload;
    use async_trait::async_trait;
    use common::response::ApiResponse;

    fn server(id: i64, server_id: &str, disk: u32, uptime: &str) -> ServerItem {
        ServerItem {
            id,
            server_id: server_id.into(),
            os_type: "Ubuntu 22.04".into(),
            vcpu: 4,
            ram_gb: 16,
            disk_size_gb: disk,
            disk_type: DiskType::Ssd,
            uptime_pattern: uptime.into(),
            current_hosting: "On-Premise".into(),
            technology: "Nginx".into(),
            technology_version: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Transport returning queued payloads in order.
    struct SeqTransport {
        queue: tokio::sync::Mutex<VecDeque<AppResult<ResponsePayload>>>,
    }

    impl SeqTransport {
        fn new(responses: Vec<AppResult<ResponsePayload>>) -> Self {
            Self {
                queue: tokio::sync::Mutex::new(responses.into()),
            }
        }

        async fn next(&self) -> AppResult<ResponsePayload> {
            self.queue
                .lock()
                .await
                .pop_front()
                .expect("test issued more requests than queued responses")
        }
    }

    #[async_trait]
    impl ApiTransport for SeqTransport {
        async fn get(&self, _path: &str) -> AppResult<ResponsePayload> {
            self.next().await
        }
        async fn post(&self, _path: &str, _body: serde_json::Value) -> AppResult<ResponsePayload> {
            self.next().await
        }
        async fn put(&self, _path: &str, _body: serde_json::Value) -> AppResult<ResponsePayload> {
            self.next().await
        }
        async fn delete(&self, _path: &str) -> AppResult<ResponsePayload> {
            self.next().await
        }
        async fn get_bytes(&self, _path: &str) -> AppResult<Vec<u8>> {
            unimplemented!("not used by these tests")
        }
    }

    fn ok_payload<D: serde::Serialize>(data: D) -> AppResult<ResponsePayload> {
        Ok(ResponsePayload {
            status: 200,
            body: serde_json::to_value(ApiResponse::ok(data)).unwrap(),
        })
    }

    fn err_payload(status: u16, code: &str, message: &str) -> AppResult<ResponsePayload> {
        Ok(ResponsePayload {
            status,
            body: serde_json::to_value(ApiResponse::err(code, message)).unwrap(),
        })
    }

    fn panel(
        responses: Vec<AppResult<ResponsePayload>>,
    ) -> InventoryPanel<SeqTransport, ServerItem> {
        InventoryPanel::new(Arc::new(MigrationClient::new(SeqTransport::new(responses))))
    }

    #[test]
    fn stats_recompute_from_full_collection() {
        let records = vec![
            server(1, "a", 100, "24x7"),
            server(2, "b", 300, "Business Hours"),
            server(3, "c", 200, "24x7"),
        ];
        let stats = InventoryStats::compute(&records);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.metric_total, 600.0);
        assert_eq!(stats.metric_average, 200.0);
        assert_eq!(stats.flagged_count, 2);
    }

    #[test]
    fn empty_collection_has_zero_average() {
        let stats = InventoryStats::compute::<ServerItem>(&[]);
        assert_eq!(stats.metric_average, 0.0);
    }

    #[tokio::test]
    async fn refresh_replaces_rows_and_stats() {
        let mut panel = panel(vec![ok_payload(vec![
            server(1, "web-01", 100, "24x7"),
            server(2, "db-01", 500, "24x7"),
        ])]);
        panel.refresh().await.unwrap();
        assert_eq!(panel.rows().len(), 2);
        assert_eq!(panel.stats().metric_total, 600.0);
        assert!(panel.last_error().is_none());
    }

    #[tokio::test]
    async fn failed_refresh_falls_back_to_empty() {
        let mut panel = panel(vec![
            ok_payload(vec![server(1, "web-01", 100, "24x7")]),
            err_payload(500, "INTERNAL", "boom"),
        ]);
        panel.refresh().await.unwrap();
        assert_eq!(panel.rows().len(), 1);

        assert!(panel.refresh().await.is_err());
        assert!(panel.rows().is_empty());
        assert_eq!(panel.stats(), &InventoryStats::default());
        assert!(panel.last_error().unwrap().contains("boom"));
    }

    #[tokio::test]
    async fn failed_create_leaves_collection_unchanged() {
        let mut panel = panel(vec![
            ok_payload(vec![server(1, "web-01", 100, "24x7")]),
            err_payload(400, "VALIDATION_ERROR", "server_id already exists"),
        ]);
        panel.refresh().await.unwrap();

        let draft = ServerDraft {
            server_id: "web-01".into(),
            os_type: "Ubuntu 22.04".into(),
            vcpu: 2,
            ram_gb: 8,
            disk_size_gb: 50,
            disk_type: DiskType::Hdd,
            uptime_pattern: "Variable".into(),
            current_hosting: "Colocation".into(),
            technology: "Redis".into(),
            technology_version: None,
        };
        let err = panel.create(draft).await.unwrap_err();
        assert!(err.to_string().contains("server_id already exists"));
        // No optimistic mutation: the table still shows the old fetch.
        assert_eq!(panel.rows().len(), 1);
        assert_eq!(panel.stats().count, 1);
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_wire() {
        let mut panel = panel(vec![]);
        let draft = ServerDraft {
            server_id: "".into(),
            os_type: "Ubuntu 22.04".into(),
            vcpu: 2,
            ram_gb: 8,
            disk_size_gb: 50,
            disk_type: DiskType::Hdd,
            uptime_pattern: "Variable".into(),
            current_hosting: "Colocation".into(),
            technology: "Redis".into(),
            technology_version: None,
        };
        assert!(matches!(
            panel.create(draft).await.unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let mut panel = panel(vec![]);
        assert!(matches!(
            panel.delete(1, false).await.unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn sort_and_filter_are_local() {
        // Only one response queued: sorting/filtering must not re-fetch.
        let mut panel = panel(vec![ok_payload(vec![
            server(1, "web-01", 300, "24x7"),
            server(2, "db-01", 100, "24x7"),
            server(3, "app-01", 200, "24x7"),
        ])]);
        panel.refresh().await.unwrap();

        panel.set_sort(SortKey::Metric, SortDirection::Descending);
        let names: Vec<&str> = panel.rows().iter().map(|r| r.display_name()).collect();
        assert_eq!(names, vec!["web-01", "app-01", "db-01"]);

        panel.set_sort(SortKey::Name, SortDirection::Ascending);
        let names: Vec<&str> = panel.rows().iter().map(|r| r.display_name()).collect();
        assert_eq!(names, vec!["app-01", "db-01", "web-01"]);

        panel.set_filter(Some("web".into()));
        assert_eq!(panel.rows().len(), 1);
        // The held collection is untouched by filtering.
        assert_eq!(panel.records().len(), 3);
    }

    #[test]
    fn dangling_server_reference_is_rejected() {
        let servers = vec![server(1, "web-01", 100, "24x7")];
        assert!(ensure_server_reference("database", "web-01", &servers).is_ok());
        let err = ensure_server_reference("database", "db-09", &servers).unwrap_err();
        assert!(matches!(err, AppError::DanglingReference { .. }));
    }
}
