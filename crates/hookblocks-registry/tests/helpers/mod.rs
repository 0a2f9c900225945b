//! Shared fakes for registry integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use hookblocks_cache::CacheManager;
use hookblocks_cache::memory::MemoryCacheProvider;
use hookblocks_core::config::cache::MemoryCacheConfig;
use hookblocks_core::error::AppError;
use hookblocks_core::result::AppResult;
use hookblocks_database::RecordStore;
use hookblocks_database::memory::MemoryRecordStore;
use hookblocks_entity::record::{ContentRecord, CreateRecord, RecordStatus};
use hookblocks_registry::{HookBinding, HookFanout, HookRegistrar, RegistryCache};

/// Record store that counts active-set queries and can be switched off.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryRecordStore,
    active_queries: AtomicUsize,
    unavailable: AtomicBool,
}

impl CountingStore {
    pub fn with_records(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        Self {
            inner: MemoryRecordStore::with_records(records),
            ..Self::default()
        }
    }

    pub fn active_queries(&self) -> usize {
        self.active_queries.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn insert(&self, record: ContentRecord) {
        self.inner.insert(record);
    }

    fn check(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(AppError::service_unavailable("store offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for CountingStore {
    async fn create(&self, data: CreateRecord) -> AppResult<ContentRecord> {
        self.check()?;
        self.inner.create(data).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContentRecord>> {
        self.check()?;
        self.inner.find_by_id(id).await
    }

    async fn update(&self, record: &ContentRecord) -> AppResult<ContentRecord> {
        self.check()?;
        self.inner.update(record).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.check()?;
        self.inner.delete(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<ContentRecord>> {
        self.check()?;
        self.inner.find_all().await
    }

    async fn find_active(&self) -> AppResult<Vec<ContentRecord>> {
        self.active_queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        // Hand results back in reverse so callers cannot lean on store order.
        let mut records = self.inner.find_active().await?;
        records.reverse();
        Ok(records)
    }
}

/// Registrar that records every binding and rejects listed hooks.
#[derive(Debug, Default)]
pub struct RecordingRegistrar {
    pub bindings: Mutex<Vec<HookBinding>>,
    pub reject_hooks: Vec<String>,
}

impl RecordingRegistrar {
    pub fn rejecting(hooks: &[&str]) -> Self {
        Self {
            bindings: Mutex::new(Vec::new()),
            reject_hooks: hooks.iter().map(|h| h.to_string()).collect(),
        }
    }

    pub async fn hooks(&self) -> Vec<String> {
        self.bindings
            .lock()
            .await
            .iter()
            .map(|b| b.hook_name.clone())
            .collect()
    }
}

#[async_trait]
impl HookRegistrar for RecordingRegistrar {
    async fn add_action(&self, binding: HookBinding) -> AppResult<()> {
        if self.reject_hooks.contains(&binding.hook_name) {
            return Err(AppError::hook(format!("rejected '{}'", binding.hook_name)));
        }
        self.bindings.lock().await.push(binding);
        Ok(())
    }
}

pub fn record(hook: &str, priority: i32, order: i32, status: RecordStatus) -> ContentRecord {
    let mut r = ContentRecord::from_create(CreateRecord {
        title: format!("{hook} {priority}/{order}"),
        hook_name: hook.to_string(),
        priority: Some(priority),
        body: format!("<p>{hook}:{priority}:{order}</p>"),
        order,
    });
    r.status = status;
    r
}

pub fn published(hook: &str, priority: i32, order: i32) -> ContentRecord {
    record(hook, priority, order, RecordStatus::Published)
}

pub struct TestEnv {
    pub store: Arc<CountingStore>,
    pub cache: Arc<RegistryCache>,
    pub fanout: HookFanout,
}

impl TestEnv {
    pub fn new(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        Self::with_ttl(records, Duration::from_secs(60))
    }

    pub fn with_ttl(records: impl IntoIterator<Item = ContentRecord>, ttl: Duration) -> Self {
        let provider = MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 100 });
        let manager = Arc::new(CacheManager::from_provider(Arc::new(provider)));
        let store = Arc::new(CountingStore::with_records(records));
        let cache = Arc::new(RegistryCache::new(
            manager,
            Arc::clone(&store) as Arc<dyn RecordStore>,
            ttl,
        ));
        let fanout = HookFanout::new(Arc::clone(&cache));
        Self {
            store,
            cache,
            fanout,
        }
    }
}
