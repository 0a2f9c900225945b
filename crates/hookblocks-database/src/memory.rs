//! In-process record store backed by a concurrent map.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use hookblocks_core::error::{AppError, ErrorKind};
use hookblocks_core::result::AppResult;
use hookblocks_entity::record::{ContentRecord, CreateRecord};

use crate::store::RecordStore;

/// Record store that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: DashMap<Uuid, ContentRecord>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given records as-is (status included).
    pub fn with_records(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Load records from a JSON array file.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to read seed file '{}'", path.display()),
                e,
            )
        })?;

        let records: Vec<ContentRecord> = serde_json::from_str(&contents)?;
        info!(path = %path.display(), count = records.len(), "Seeded memory record store");
        Ok(Self::with_records(records))
    }

    /// Insert or replace a record without touching its fields.
    pub fn insert(&self, record: ContentRecord) {
        self.records.insert(record.id, record);
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write every record back to a JSON array file, in creation order.
    pub async fn write_seed_file(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        let records = self.find_all().await?;
        let json = serde_json::to_string_pretty(&records)?;
        tokio::fs::write(path, json).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Internal,
                format!("Failed to write seed file '{}'", path.display()),
                e,
            )
        })?;
        debug!(path = %path.display(), count = records.len(), "Memory record store written");
        Ok(())
    }

    fn snapshot(&self) -> Vec<ContentRecord> {
        self.records.iter().map(|entry| entry.value().clone()).collect()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, data: CreateRecord) -> AppResult<ContentRecord> {
        let record = ContentRecord::from_create(data);
        self.records.insert(record.id, record.clone());
        debug!(record_id = %record.id, "Record created in memory store");
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContentRecord>> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update(&self, record: &ContentRecord) -> AppResult<ContentRecord> {
        let mut entry = self
            .records
            .get_mut(&record.id)
            .ok_or_else(|| AppError::not_found(format!("Record {} not found", record.id)))?;

        let mut stored = record.clone();
        stored.updated_at = Utc::now();
        *entry = stored.clone();
        Ok(stored)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.records.remove(&id).is_some())
    }

    async fn find_all(&self) -> AppResult<Vec<ContentRecord>> {
        let mut records = self.snapshot();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn find_active(&self) -> AppResult<Vec<ContentRecord>> {
        let mut records: Vec<ContentRecord> = self
            .snapshot()
            .into_iter()
            .filter(ContentRecord::is_active)
            .collect();
        records.sort_by(|a, b| a.order.cmp(&b.order).then(a.id.cmp(&b.id)));
        Ok(records)
    }
}
