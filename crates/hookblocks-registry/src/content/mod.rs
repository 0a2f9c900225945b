//! Content filter chains applied to emitted record bodies.

pub mod filters;
pub mod pipeline;

pub use filters::{FnFilter, TrimFilter};
pub use pipeline::{ContentFilter, ContentPipeline, FilterStage};
