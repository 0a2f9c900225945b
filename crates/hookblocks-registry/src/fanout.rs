//! Per-cycle fan-out of active records onto their hooks.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use hookblocks_core::types::request::RequestKind;

use crate::cache::RegistryCache;
use crate::hooks::{HookBinding, HookRegistrar};

/// Outcome of one fan-out.
///
/// Fan-out never fails; the report records what was installed and what was
/// dropped so callers and logs can see degraded cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FanoutReport {
    /// The cycle was not a content render and nothing was read.
    pub skipped: bool,
    /// The record store could not be read; the cycle runs with no records.
    pub store_unavailable: bool,
    /// Bindings accepted by the registrar.
    pub installed: usize,
    /// Records whose registration was rejected.
    pub failed: Vec<Uuid>,
}

impl FanoutReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }

    /// Whether the cycle lost any records.
    pub fn is_degraded(&self) -> bool {
        self.store_unavailable || !self.failed.is_empty()
    }
}

/// Registers one binding per active record at the start of a render cycle.
#[derive(Debug, Clone)]
pub struct HookFanout {
    cache: Arc<RegistryCache>,
}

impl HookFanout {
    /// Creates a fan-out over the given registry cache.
    pub fn new(cache: Arc<RegistryCache>) -> Self {
        Self { cache }
    }

    /// Returns the registry cache.
    pub fn cache(&self) -> &Arc<RegistryCache> {
        &self.cache
    }

    /// Installs bindings for every active record.
    ///
    /// Only content renders fan out. A store failure degrades to zero records
    /// for this cycle, and a registration failure skips that record only.
    pub async fn install_hooks(
        &self,
        kind: RequestKind,
        registrar: &dyn HookRegistrar,
    ) -> FanoutReport {
        if !kind.renders_content() {
            debug!(kind = %kind, "Skipping fan-out for non-content request");
            return FanoutReport::skipped();
        }

        let records = match self.cache.get_active_records().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Record store unavailable, rendering without blocks");
                return FanoutReport {
                    store_unavailable: true,
                    ..FanoutReport::default()
                };
            }
        };

        let mut report = FanoutReport::default();
        for record in records {
            let binding = HookBinding::for_record(Arc::new(record));
            let record_id = binding.record_id();
            let hook = binding.hook_name.clone();

            match registrar.add_action(binding).await {
                Ok(()) => report.installed += 1,
                Err(e) => {
                    warn!(
                        record_id = %record_id,
                        hook = %hook,
                        error = %e,
                        "Failed to register record at hook"
                    );
                    report.failed.push(record_id);
                }
            }
        }

        info!(
            installed = report.installed,
            failed = report.failed.len(),
            "Hook fan-out complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use hookblocks_cache::CacheManager;
    use hookblocks_cache::memory::MemoryCacheProvider;
    use hookblocks_core::config::cache::MemoryCacheConfig;
    use hookblocks_database::memory::MemoryRecordStore;
    use hookblocks_entity::record::{ContentRecord, CreateRecord, RecordStatus};

    use crate::hooks::HookRegistry;

    fn published(hook: &str, priority: i32, order: i32) -> ContentRecord {
        let mut r = ContentRecord::from_create(CreateRecord {
            title: format!("{hook}-{priority}"),
            hook_name: hook.to_string(),
            priority: Some(priority),
            body: format!("{hook}:{priority}"),
            order,
        });
        r.status = RecordStatus::Published;
        r
    }

    fn fanout(records: Vec<ContentRecord>) -> HookFanout {
        let provider = MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 100 });
        let cache = Arc::new(CacheManager::from_provider(Arc::new(provider)));
        let store = Arc::new(MemoryRecordStore::with_records(records));
        HookFanout::new(Arc::new(RegistryCache::new(
            cache,
            store,
            Duration::from_secs(60),
        )))
    }

    #[tokio::test]
    async fn test_install_registers_every_active_record() {
        let fanout = fanout(vec![
            published("wp_footer", 20, 1),
            published("wp_footer", 10, 2),
            published("wp_head", 10, 3),
        ]);
        let registry = HookRegistry::new();

        let report = fanout.install_hooks(RequestKind::Content, &registry).await;
        assert_eq!(report.installed, 3);
        assert!(!report.is_degraded());
        assert_eq!(registry.binding_count("wp_footer").await, 2);
        assert_eq!(registry.binding_count("wp_head").await, 1);
    }

    #[tokio::test]
    async fn test_non_content_requests_are_skipped() {
        let fanout = fanout(vec![published("wp_footer", 10, 1)]);
        let registry = HookRegistry::new();

        for kind in [RequestKind::Admin, RequestKind::Api] {
            let report = fanout.install_hooks(kind, &registry).await;
            assert!(report.skipped);
        }
        assert!(registry.registered_hooks().await.is_empty());
        assert!(!fanout.cache().is_cached().await.unwrap());
    }
}
