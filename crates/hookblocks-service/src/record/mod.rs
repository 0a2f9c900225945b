//! Record lifecycle and the admin list view.

pub mod admin;
pub mod service;

pub use admin::{AdminRow, AdminSort};
pub use service::{PublishOutcome, RecordService};
