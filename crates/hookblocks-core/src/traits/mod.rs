//! Core traits defined in `hookblocks-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
