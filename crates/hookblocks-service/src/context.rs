//! Application context built once from configuration and handed to callers.

use std::sync::Arc;

use tracing::info;

use hookblocks_cache::CacheManager;
use hookblocks_core::config::AppConfig;
use hookblocks_core::result::AppResult;
use hookblocks_core::traits::cache::CacheProvider;
use hookblocks_core::types::request::RequestKind;
use hookblocks_database::{RecordStore, StoreManager};
use hookblocks_registry::content::TrimFilter;
use hookblocks_registry::{
    CacheInvalidator, ContentPipeline, FilterStage, HookFanout, RegistryCache, RenderCycle,
};

use crate::notice::NoticeQueue;
use crate::record::RecordService;

/// Every long-lived collaborator, wired from one [`AppConfig`].
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Cache provider shared by the snapshot and the notices.
    pub cache: Arc<CacheManager>,
    /// Record store.
    pub store: Arc<dyn RecordStore>,
    /// Active-record snapshot.
    pub registry: Arc<RegistryCache>,
    /// Per-cycle fan-out.
    pub fanout: HookFanout,
    /// Filters applied to emitted bodies.
    pub pipeline: Arc<ContentPipeline>,
    /// Record lifecycle.
    pub records: RecordService,
    /// Set when the store came from configuration.
    manager: Option<Arc<StoreManager>>,
}

impl AppContext {
    /// Connects the configured cache and store and wires the services.
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        let cache = Arc::new(CacheManager::new(&config.cache).await?);
        let manager = Arc::new(StoreManager::new(&config.store).await?);
        info!(
            cache = %config.cache.provider,
            store = %config.store.provider,
            "Application context ready"
        );
        let store: Arc<dyn RecordStore> = Arc::clone(&manager) as Arc<dyn RecordStore>;
        let mut context = Self::from_parts(config, cache, store);
        context.manager = Some(manager);
        Ok(context)
    }

    /// Wires the services over an existing cache and store.
    pub fn from_parts(
        config: AppConfig,
        cache: Arc<CacheManager>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        let registry = Arc::new(RegistryCache::from_config(
            Arc::clone(&cache),
            Arc::clone(&store),
            &config.registry,
        ));
        let fanout = HookFanout::new(Arc::clone(&registry));
        let notices = Arc::new(NoticeQueue::new(
            Arc::clone(&cache),
            config.registry.notice_ttl(),
        ));
        let records = RecordService::new(
            Arc::clone(&store),
            notices,
            config.registry.default_priority,
        )
        .with_listener(Arc::new(CacheInvalidator::new(Arc::clone(&registry))));

        let pipeline = ContentPipeline::new().with_filter(
            FilterStage::BlockContent,
            10,
            Arc::new(TrimFilter),
        );

        Self {
            config: Arc::new(config),
            cache,
            store,
            registry,
            fanout,
            pipeline: Arc::new(pipeline),
            records,
            manager: None,
        }
    }

    /// Flushes store state that does not persist on its own.
    pub async fn persist(&self) -> AppResult<()> {
        match &self.manager {
            Some(manager) => manager.persist().await,
            None => Ok(()),
        }
    }

    /// Drops every HookBlocks cache entry: the snapshot and all queued notices.
    pub async fn flush_cache(&self) -> AppResult<()> {
        self.cache.flush_all().await?;
        info!(cache = %self.config.cache.provider, "Cache flushed");
        Ok(())
    }

    /// Starts a render cycle with its own registry and runs the fan-out.
    pub async fn begin_cycle(&self, kind: RequestKind) -> RenderCycle {
        let cycle = RenderCycle::new(kind, Arc::clone(&self.pipeline));
        cycle.begin(&self.fanout).await;
        cycle
    }
}
