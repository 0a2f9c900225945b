//! Store manager that dispatches to the configured record store.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use hookblocks_core::config::store::StoreConfig;
use hookblocks_core::error::AppError;
use hookblocks_core::result::AppResult;
use hookblocks_entity::record::{ContentRecord, CreateRecord};

use crate::connection;
use crate::memory::MemoryRecordStore;
use crate::migration;
use crate::repositories::record::PgRecordStore;
use crate::store::RecordStore;

/// Wraps the record store selected by configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    inner: Arc<dyn RecordStore>,
    /// Seed file and the memory store loaded from it, for write-back.
    seeded: Option<(PathBuf, Arc<MemoryRecordStore>)>,
}

impl StoreManager {
    /// Create the store described by `config`.
    ///
    /// The PostgreSQL store runs pending migrations before it is returned.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let mut seeded = None;
        let inner: Arc<dyn RecordStore> = match config.provider.as_str() {
            "memory" => {
                info!(seed = ?config.seed_file, "Initializing in-memory record store");
                match &config.seed_file {
                    Some(path) => {
                        let store = Arc::new(MemoryRecordStore::from_seed_file(path).await?);
                        seeded = Some((PathBuf::from(path), Arc::clone(&store)));
                        store
                    }
                    None => Arc::new(MemoryRecordStore::new()),
                }
            }
            "postgres" => {
                info!("Initializing PostgreSQL record store");
                let pool = connection::connect(&config.database).await?;
                migration::run_migrations(&pool).await?;
                Arc::new(PgRecordStore::new(pool))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, postgres"
                )));
            }
        };

        Ok(Self { inner, seeded })
    }

    /// Create a manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn RecordStore>) -> Self {
        Self {
            inner: store,
            seeded: None,
        }
    }

    /// Write a seeded memory store back to its seed file.
    ///
    /// No-op for the PostgreSQL store and for an unseeded memory store.
    pub async fn persist(&self) -> AppResult<()> {
        match &self.seeded {
            Some((path, store)) => store.write_seed_file(path).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for StoreManager {
    async fn create(&self, data: CreateRecord) -> AppResult<ContentRecord> {
        self.inner.create(data).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContentRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn update(&self, record: &ContentRecord) -> AppResult<ContentRecord> {
        self.inner.update(record).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.inner.delete(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<ContentRecord>> {
        self.inner.find_all().await
    }

    async fn find_active(&self) -> AppResult<Vec<ContentRecord>> {
        self.inner.find_active().await
    }
}
