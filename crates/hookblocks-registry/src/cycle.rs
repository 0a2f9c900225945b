//! One inbound render cycle: fan-out into a fresh registry, then firing.

use std::sync::Arc;

use hookblocks_core::types::request::RequestKind;

use crate::content::ContentPipeline;
use crate::fanout::{FanoutReport, HookFanout};
use crate::hooks::{DispatchResult, HookDispatcher, HookRegistry};

/// Per-request state.
///
/// Each cycle owns its own registry; the snapshot cache is the only state
/// shared between cycles.
#[derive(Debug)]
pub struct RenderCycle {
    kind: RequestKind,
    registry: Arc<HookRegistry>,
    dispatcher: HookDispatcher,
}

impl RenderCycle {
    /// Creates a cycle with an empty registry.
    pub fn new(kind: RequestKind, pipeline: Arc<ContentPipeline>) -> Self {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = HookDispatcher::new(Arc::clone(&registry), pipeline);
        Self {
            kind,
            registry,
            dispatcher,
        }
    }

    /// The kind of request being served.
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Bindings installed for this cycle.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }

    /// Runs the fan-out. Call once, before any hook fires.
    pub async fn begin(&self, fanout: &HookFanout) -> FanoutReport {
        fanout.install_hooks(self.kind, self.registry.as_ref()).await
    }

    /// Fires a hook.
    pub async fn fire(&self, hook_name: &str) -> DispatchResult {
        self.dispatcher.fire(hook_name).await
    }

    /// Fires a hook and returns its concatenated output.
    pub async fn render(&self, hook_name: &str) -> String {
        self.fire(hook_name).await.output()
    }
}
