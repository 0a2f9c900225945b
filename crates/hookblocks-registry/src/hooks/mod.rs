//! Hook system: bindings, the registrar seam, the in-process registry,
//! and the dispatcher that fires a hook.

pub mod binding;
pub mod dispatcher;
pub mod registry;

pub use binding::{HookBinding, HookRegistrar};
pub use dispatcher::{DispatchResult, EmittedBlock, HookDispatcher};
pub use registry::HookRegistry;
