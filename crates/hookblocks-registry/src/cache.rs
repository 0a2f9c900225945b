//! Time-bounded snapshot of the active records.
//!
//! The whole active set lives under one fixed cache key. Reads serve the
//! snapshot while it is valid; a miss queries the record store and writes
//! the result back with the configured TTL. Any invalidation drops the
//! whole snapshot.
//!
//! Concurrent misses are not coordinated: each one queries the store and
//! writes the same list, and the last write wins.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use hookblocks_cache::{CacheManager, keys};
use hookblocks_core::config::registry::RegistryConfig;
use hookblocks_core::result::AppResult;
use hookblocks_core::traits::cache::CacheProvider;
use hookblocks_database::RecordStore;
use hookblocks_entity::record::ContentRecord;

/// Cached view of the active records.
#[derive(Debug, Clone)]
pub struct RegistryCache {
    /// Backing cache provider.
    cache: Arc<CacheManager>,
    /// Source of truth queried on a miss.
    store: Arc<dyn RecordStore>,
    /// Snapshot lifetime.
    ttl: Duration,
}

impl RegistryCache {
    /// Creates a registry cache with an explicit TTL.
    pub fn new(cache: Arc<CacheManager>, store: Arc<dyn RecordStore>, ttl: Duration) -> Self {
        Self { cache, store, ttl }
    }

    /// Creates a registry cache using the configured snapshot TTL.
    pub fn from_config(
        cache: Arc<CacheManager>,
        store: Arc<dyn RecordStore>,
        config: &RegistryConfig,
    ) -> Self {
        Self::new(cache, store, config.snapshot_ttl())
    }

    /// Returns the snapshot TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the active records, ordered by `order` ascending.
    ///
    /// A cache backend failure reads as a miss. A store failure is returned
    /// to the caller and nothing is cached.
    pub async fn get_active_records(&self) -> AppResult<Vec<ContentRecord>> {
        let key = keys::active_records();

        match self.cache.get_json::<Vec<ContentRecord>>(&key).await {
            Ok(Some(records)) => {
                debug!(count = records.len(), "Active record snapshot hit");
                return Ok(records);
            }
            Ok(None) => debug!("Active record snapshot miss"),
            Err(e) => warn!(error = %e, "Active record snapshot unreadable, treating as miss"),
        }

        let mut records = self.store.find_active().await?;
        // The store contract already orders; re-sort so a lax store cannot
        // leak its own ordering into the snapshot.
        records.retain(ContentRecord::is_active);
        records.sort_by(|a, b| a.order.cmp(&b.order).then(a.id.cmp(&b.id)));

        if let Err(e) = self.cache.set_json(&key, &records, self.ttl).await {
            warn!(error = %e, "Failed to store active record snapshot");
        } else {
            info!(
                count = records.len(),
                ttl_secs = self.ttl.as_secs(),
                "Active record snapshot populated"
            );
        }

        Ok(records)
    }

    /// Drops the snapshot. Idempotent.
    pub async fn invalidate(&self) -> AppResult<()> {
        self.cache.delete(&keys::active_records()).await?;
        debug!("Active record snapshot invalidated");
        Ok(())
    }

    /// Whether a snapshot is currently cached.
    pub async fn is_cached(&self) -> AppResult<bool> {
        self.cache.exists(&keys::active_records()).await
    }
}
