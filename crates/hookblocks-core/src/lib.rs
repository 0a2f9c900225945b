//! # hookblocks-core
//!
//! Core crate for HookBlocks. Contains the cache provider trait,
//! configuration schemas, request/actor types, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other HookBlocks crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
