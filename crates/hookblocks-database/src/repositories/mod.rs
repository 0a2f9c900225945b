//! PostgreSQL repository implementations.

pub mod record;

pub use record::PgRecordStore;
