//! Snapshot invalidation on record lifecycle events.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use hookblocks_entity::record::RecordEvent;

use crate::cache::RegistryCache;

/// Receives record lifecycle events.
#[async_trait]
pub trait RecordEventListener: Send + Sync + std::fmt::Debug {
    /// Handles one event. Listeners do not fail the operation that emitted it.
    async fn on_event(&self, event: &RecordEvent);
}

/// Drops the active-record snapshot when a record event can change it.
#[derive(Debug, Clone)]
pub struct CacheInvalidator {
    cache: Arc<RegistryCache>,
}

impl CacheInvalidator {
    /// Creates an invalidator for the given registry cache.
    pub fn new(cache: Arc<RegistryCache>) -> Self {
        Self { cache }
    }

    /// Whether an event invalidates the snapshot.
    ///
    /// Saves while published, leaving `published`, trashing and permanent
    /// deletion invalidate. Draft saves of records that were never active
    /// keep the snapshot.
    pub fn should_invalidate(event: &RecordEvent) -> bool {
        match event {
            RecordEvent::Saved { status, .. } => status.is_published(),
            RecordEvent::StatusChanged { from, .. } => from.is_published(),
            RecordEvent::Trashed { .. } | RecordEvent::Deleted { .. } => true,
        }
    }
}

#[async_trait]
impl RecordEventListener for CacheInvalidator {
    async fn on_event(&self, event: &RecordEvent) {
        if !Self::should_invalidate(event) {
            debug!(event = event.name(), record_id = %event.record_id(), "Snapshot kept");
            return;
        }

        if let Err(e) = self.cache.invalidate().await {
            warn!(
                event = event.name(),
                record_id = %event.record_id(),
                error = %e,
                "Failed to invalidate active record snapshot"
            );
        }
    }
}
