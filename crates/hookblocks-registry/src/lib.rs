//! # hookblocks-registry
//!
//! The named-slot content registry. Provides:
//!
//! - [`RegistryCache`]: time-bounded snapshot of the active records
//! - [`HookFanout`]: one hook binding per active record, per content render
//! - [`HookRegistry`] / [`HookDispatcher`]: priority-ordered bindings and firing
//! - [`ContentPipeline`]: filter chains applied to emitted bodies
//! - [`ValidationGate`]: blocks publishing records without a hook name
//! - [`CacheInvalidator`]: drops the snapshot on lifecycle events

pub mod cache;
pub mod content;
pub mod cycle;
pub mod fanout;
pub mod gate;
pub mod hooks;
pub mod invalidation;

pub use cache::RegistryCache;
pub use content::{ContentFilter, ContentPipeline, FilterStage};
pub use cycle::RenderCycle;
pub use fanout::{FanoutReport, HookFanout};
pub use gate::{GateDecision, ValidationGate};
pub use hooks::{HookBinding, HookDispatcher, HookRegistrar, HookRegistry};
pub use invalidation::{CacheInvalidator, RecordEventListener};
