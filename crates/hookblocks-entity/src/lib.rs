//! # hookblocks-entity
//!
//! Domain entity models for HookBlocks. A [`record::ContentRecord`] is a
//! block of markup bound to a named hook with a priority. Records derive
//! `sqlx::FromRow` so the PostgreSQL store can load them directly.

pub mod record;
