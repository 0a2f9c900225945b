//! A record bound to a hook, and the registrar that accepts bindings.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use hookblocks_core::result::AppResult;
use hookblocks_entity::record::ContentRecord;

/// One record's registration at a named hook.
///
/// Bindings are plain data; firing the hook emits the record body.
#[derive(Debug, Clone)]
pub struct HookBinding {
    /// Hook the body is emitted at.
    pub hook_name: String,
    /// Priority (lower = earlier).
    pub priority: i32,
    /// Tie-break within one priority (lower = earlier).
    pub order: i32,
    /// The record whose body is emitted.
    pub record: Arc<ContentRecord>,
}

impl HookBinding {
    /// Builds the binding for a record from its own hook fields.
    pub fn for_record(record: Arc<ContentRecord>) -> Self {
        Self {
            hook_name: record.hook_name.clone(),
            priority: record.priority,
            order: record.order,
            record,
        }
    }

    /// The bound record's ID.
    pub fn record_id(&self) -> Uuid {
        self.record.id
    }

    /// Sort key giving the firing order within one hook.
    pub fn sort_key(&self) -> (i32, i32, Uuid) {
        (self.priority, self.order, self.record.id)
    }
}

/// Accepts hook bindings for the current render cycle.
///
/// Several bindings may share a hook name; none are de-duplicated.
#[async_trait]
pub trait HookRegistrar: Send + Sync {
    /// Registers a binding. An error affects this binding only.
    async fn add_action(&self, binding: HookBinding) -> AppResult<()>;
}
