//! Transient user-facing notices.

pub mod queue;

pub use queue::{Notice, NoticeLevel, NoticeQueue};
