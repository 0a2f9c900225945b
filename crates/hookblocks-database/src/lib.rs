//! # hookblocks-database
//!
//! The [`RecordStore`] contract consumed by the registry, and its two
//! implementations:
//!
//! - [`memory::MemoryRecordStore`]: process-local, optionally seeded from JSON
//! - [`repositories::record::PgRecordStore`]: PostgreSQL via `sqlx`
//!
//! [`manager::StoreManager`] picks one from configuration.

pub mod connection;
pub mod manager;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use manager::StoreManager;
pub use store::RecordStore;
