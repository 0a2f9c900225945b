//! # hookblocks-service
//!
//! Application services for HookBlocks. [`RecordService`] runs the record
//! lifecycle (capability check, publish gate, events), [`NoticeQueue`]
//! holds transient messages for the acting administrator, and
//! [`AppContext`] wires everything from configuration.
//!
//! Services follow constructor injection; dependencies are handed in as
//! `Arc` references.

pub mod context;
pub mod notice;
pub mod record;

pub use context::AppContext;
pub use notice::{Notice, NoticeLevel, NoticeQueue};
pub use record::{AdminRow, AdminSort, PublishOutcome, RecordService};
