//! Content record entity, status, metadata rules, and lifecycle events.

pub mod event;
pub mod meta;
pub mod model;
pub mod status;

pub use event::RecordEvent;
pub use meta::{DEFAULT_PRIORITY, HOOK_META_KEY, PRIORITY_META_KEY};
pub use model::{ContentRecord, CreateRecord, UpdateRecord};
pub use status::RecordStatus;
