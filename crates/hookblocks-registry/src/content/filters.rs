//! Ready-made content filters.

use std::fmt;

use hookblocks_entity::record::ContentRecord;

use super::pipeline::ContentFilter;

type FilterFn = dyn Fn(String, &ContentRecord) -> String + Send + Sync;

/// Adapts a closure into a [`ContentFilter`].
pub struct FnFilter {
    name: String,
    func: Box<FilterFn>,
}

impl FnFilter {
    /// Wraps `func` under `name`.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(String, &ContentRecord) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }
}

impl fmt::Debug for FnFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFilter").field("name", &self.name).finish()
    }
}

impl ContentFilter for FnFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, content: String, record: &ContentRecord) -> String {
        (self.func)(content, record)
    }
}

/// Trims leading and trailing whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimFilter;

impl ContentFilter for TrimFilter {
    fn name(&self) -> &str {
        "trim"
    }

    fn apply(&self, content: String, _record: &ContentRecord) -> String {
        let trimmed = content.trim();
        if trimmed.len() == content.len() {
            content
        } else {
            trimmed.to_string()
        }
    }
}
