//! Fires a hook and emits each bound body in order.
//!
//! Bodies pass through the content pipeline before they are emitted. Every
//! binding at the hook is emitted; there is no halting.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::content::ContentPipeline;

use super::registry::HookRegistry;

/// One body emitted while firing a hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedBlock {
    /// The record that produced the output.
    pub record_id: Uuid,
    /// Binding priority.
    pub priority: i32,
    /// Filtered output.
    pub html: String,
}

/// Everything emitted by one firing of a hook.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchResult {
    /// The hook that fired.
    pub hook_name: String,
    /// Emitted blocks in firing order.
    pub blocks: Vec<EmittedBlock>,
}

impl DispatchResult {
    /// Concatenated output, as it would appear in the page.
    pub fn output(&self) -> String {
        self.blocks.iter().map(|b| b.html.as_str()).collect()
    }

    /// Whether nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Fires hooks against a registry.
#[derive(Debug, Clone)]
pub struct HookDispatcher {
    /// Bindings for the current cycle.
    registry: Arc<HookRegistry>,
    /// Filters applied to every emitted body.
    pipeline: Arc<ContentPipeline>,
}

impl HookDispatcher {
    /// Creates a new hook dispatcher.
    pub fn new(registry: Arc<HookRegistry>, pipeline: Arc<ContentPipeline>) -> Self {
        Self { registry, pipeline }
    }

    /// Fires a hook, emitting every bound body by priority then order.
    pub async fn fire(&self, hook_name: &str) -> DispatchResult {
        let bindings = self.registry.get_bindings(hook_name).await;

        if bindings.is_empty() {
            return DispatchResult {
                hook_name: hook_name.to_string(),
                blocks: Vec::new(),
            };
        }

        debug!(
            hook = %hook_name,
            binding_count = bindings.len(),
            "Firing hook"
        );

        let blocks = bindings
            .iter()
            .map(|binding| EmittedBlock {
                record_id: binding.record_id(),
                priority: binding.priority,
                html: self.pipeline.render(&binding.record),
            })
            .collect();

        DispatchResult {
            hook_name: hook_name.to_string(),
            blocks,
        }
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}
