//! Named filter chains.
//!
//! Every emitted body goes through two stages: the page-content chain that
//! ordinary page content also passes through, then the block-content chain
//! that only record bodies see. Filters in a stage run by ascending
//! priority; equal priorities keep registration order.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hookblocks_entity::record::ContentRecord;

/// A named filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStage {
    /// The chain shared with ordinary page content.
    PageContent,
    /// The extra chain applied only to record bodies.
    BlockContent,
}

impl FilterStage {
    /// Return the stage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageContent => "page_content",
            Self::BlockContent => "block_content",
        }
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transforms content on its way out.
pub trait ContentFilter: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Returns the transformed content.
    fn apply(&self, content: String, record: &ContentRecord) -> String;
}

#[derive(Debug, Clone)]
struct FilterEntry {
    priority: i32,
    filter: Arc<dyn ContentFilter>,
}

/// The filter chains used when emitting bodies.
#[derive(Debug, Clone, Default)]
pub struct ContentPipeline {
    stages: BTreeMap<FilterStage, Vec<FilterEntry>>,
}

impl ContentPipeline {
    /// An empty pipeline; every stage is the identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter to a stage.
    pub fn add_filter(
        &mut self,
        stage: FilterStage,
        priority: i32,
        filter: Arc<dyn ContentFilter>,
    ) -> &mut Self {
        let entries = self.stages.entry(stage).or_default();
        entries.push(FilterEntry { priority, filter });
        entries.sort_by_key(|e| e.priority);
        self
    }

    /// Builder form of [`ContentPipeline::add_filter`].
    pub fn with_filter(
        mut self,
        stage: FilterStage,
        priority: i32,
        filter: Arc<dyn ContentFilter>,
    ) -> Self {
        self.add_filter(stage, priority, filter);
        self
    }

    /// Removes every filter from a stage, so a caller can replace it.
    pub fn clear_stage(&mut self, stage: FilterStage) {
        self.stages.remove(&stage);
    }

    /// Number of filters in a stage.
    pub fn filter_count(&self, stage: FilterStage) -> usize {
        self.stages.get(&stage).map(Vec::len).unwrap_or(0)
    }

    /// Runs one stage.
    pub fn apply_stage(&self, stage: FilterStage, content: String, record: &ContentRecord) -> String {
        match self.stages.get(&stage) {
            Some(entries) => entries
                .iter()
                .fold(content, |acc, entry| entry.filter.apply(acc, record)),
            None => content,
        }
    }

    /// Runs page content, then block content, over a record body.
    pub fn render(&self, record: &ContentRecord) -> String {
        let content = self.apply_stage(FilterStage::PageContent, record.body.clone(), record);
        self.apply_stage(FilterStage::BlockContent, content, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::filters::FnFilter;
    use hookblocks_entity::record::CreateRecord;

    fn record(body: &str) -> ContentRecord {
        ContentRecord::from_create(CreateRecord {
            title: "t".to_string(),
            hook_name: "wp_footer".to_string(),
            body: body.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = ContentPipeline::new();
        assert_eq!(pipeline.render(&record("<p>x</p>")), "<p>x</p>");
    }

    #[test]
    fn test_page_stage_runs_before_block_stage() {
        let pipeline = ContentPipeline::new()
            .with_filter(
                FilterStage::BlockContent,
                10,
                Arc::new(FnFilter::new("wrap", |c, _| format!("[{c}]"))),
            )
            .with_filter(
                FilterStage::PageContent,
                10,
                Arc::new(FnFilter::new("upper", |c, _| c.to_uppercase())),
            );
        assert_eq!(pipeline.render(&record("ab")), "[AB]");
    }

    #[test]
    fn test_priority_order_within_stage() {
        let pipeline = ContentPipeline::new()
            .with_filter(
                FilterStage::PageContent,
                20,
                Arc::new(FnFilter::new("b", |c, _| format!("{c}b"))),
            )
            .with_filter(
                FilterStage::PageContent,
                5,
                Arc::new(FnFilter::new("a", |c, _| format!("{c}a"))),
            );
        assert_eq!(pipeline.render(&record("")), "ab");
    }

    #[test]
    fn test_clear_stage_overrides_block_step() {
        let mut pipeline = ContentPipeline::new().with_filter(
            FilterStage::BlockContent,
            10,
            Arc::new(FnFilter::new("drop", |_, _| String::new())),
        );
        pipeline.clear_stage(FilterStage::BlockContent);
        assert_eq!(pipeline.filter_count(FilterStage::BlockContent), 0);
        assert_eq!(pipeline.render(&record("kept")), "kept");
    }
}
