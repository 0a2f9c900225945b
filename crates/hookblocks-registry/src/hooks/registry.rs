//! Hook bindings grouped by hook name in firing order.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use hookblocks_core::error::AppError;
use hookblocks_core::result::AppResult;
use hookblocks_entity::record::meta;

use super::binding::{HookBinding, HookRegistrar};

/// Registry of bindings for one render cycle.
#[derive(Debug, Default)]
pub struct HookRegistry {
    /// Hook name → bindings sorted by priority, then order, then record ID.
    bindings: RwLock<HashMap<String, Vec<HookBinding>>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bindings for a hook in firing order.
    pub async fn get_bindings(&self, hook_name: &str) -> Vec<HookBinding> {
        let bindings = self.bindings.read().await;
        bindings.get(hook_name).cloned().unwrap_or_default()
    }

    /// Returns whether any binding targets a hook.
    pub async fn has_bindings(&self, hook_name: &str) -> bool {
        let bindings = self.bindings.read().await;
        bindings
            .get(hook_name)
            .map(|entries| !entries.is_empty())
            .unwrap_or(false)
    }

    /// Returns the number of bindings at a hook.
    pub async fn binding_count(&self, hook_name: &str) -> usize {
        let bindings = self.bindings.read().await;
        bindings.get(hook_name).map(Vec::len).unwrap_or(0)
    }

    /// Returns every hook name with at least one binding, sorted.
    pub async fn registered_hooks(&self) -> Vec<String> {
        let bindings = self.bindings.read().await;
        let mut hooks: Vec<String> = bindings.keys().cloned().collect();
        hooks.sort();
        hooks
    }
}

#[async_trait]
impl HookRegistrar for HookRegistry {
    async fn add_action(&self, binding: HookBinding) -> AppResult<()> {
        if !meta::is_valid_hook_name(&binding.hook_name) {
            return Err(AppError::hook(format!(
                "Invalid hook name '{}' for record {}",
                binding.hook_name,
                binding.record_id()
            )));
        }

        let hook_name = binding.hook_name.clone();
        let priority = binding.priority;
        let record_id = binding.record_id();

        let mut bindings = self.bindings.write().await;
        let entries = bindings.entry(hook_name.clone()).or_default();
        entries.push(binding);
        entries.sort_by_key(HookBinding::sort_key);

        debug!(
            hook = %hook_name,
            record_id = %record_id,
            priority = priority,
            "Hook binding registered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use hookblocks_entity::record::{ContentRecord, CreateRecord};

    fn binding(hook: &str, priority: i32, order: i32) -> HookBinding {
        let mut record = ContentRecord::from_create(CreateRecord {
            title: format!("{hook}/{priority}/{order}"),
            hook_name: hook.to_string(),
            priority: Some(priority),
            order,
            ..Default::default()
        });
        // Keep names with whitespace intact so validation can see them.
        record.hook_name = hook.to_string();
        HookBinding::for_record(Arc::new(record))
    }

    #[tokio::test]
    async fn test_bindings_sorted_by_priority_then_order() {
        let registry = HookRegistry::new();
        registry.add_action(binding("wp_footer", 20, 1)).await.unwrap();
        registry.add_action(binding("wp_footer", 10, 5)).await.unwrap();
        registry.add_action(binding("wp_footer", 10, 2)).await.unwrap();

        let keys: Vec<(i32, i32)> = registry
            .get_bindings("wp_footer")
            .await
            .iter()
            .map(|b| (b.priority, b.order))
            .collect();
        assert_eq!(keys, vec![(10, 2), (10, 5), (20, 1)]);
    }

    #[tokio::test]
    async fn test_same_hook_twice_is_not_deduplicated() {
        let registry = HookRegistry::new();
        registry.add_action(binding("wp_head", 10, 0)).await.unwrap();
        registry.add_action(binding("wp_head", 10, 0)).await.unwrap();
        assert_eq!(registry.binding_count("wp_head").await, 2);
    }

    #[tokio::test]
    async fn test_invalid_hook_name_rejected() {
        let registry = HookRegistry::new();
        let err = registry
            .add_action(binding("wp footer", 10, 0))
            .await
            .unwrap_err();
        assert_eq!(err.kind, hookblocks_core::error::ErrorKind::Hook);
        assert!(!registry.has_bindings("wp footer").await);
        assert!(registry.registered_hooks().await.is_empty());
    }
}
