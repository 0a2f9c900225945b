//! Transient per-actor notices, kept in the cache until read.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use hookblocks_cache::{CacheManager, keys};
use hookblocks_core::result::AppResult;
use hookblocks_core::traits::cache::CacheProvider;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Something was refused.
    Error,
    /// Informational.
    Info,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A message shown once to the actor who caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text shown to the user.
    pub message: String,
    /// When the notice was queued.
    pub created_at: DateTime<Utc>,
}

impl Notice {
    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// An informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Notices stored through the cache provider with a short TTL.
///
/// Unread notices simply expire.
#[derive(Debug, Clone)]
pub struct NoticeQueue {
    cache: Arc<CacheManager>,
    ttl: Duration,
}

impl NoticeQueue {
    /// Creates a queue writing entries with the given TTL.
    pub fn new(cache: Arc<CacheManager>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Appends a notice for an actor.
    pub async fn push(&self, actor_id: Uuid, notice: Notice) -> AppResult<()> {
        let key = keys::notices(actor_id);
        let mut queued: Vec<Notice> = self.cache.get_json(&key).await?.unwrap_or_default();
        queued.push(notice);
        self.cache.set_json(&key, &queued, self.ttl).await?;
        debug!(actor_id = %actor_id, count = queued.len(), "Notice queued");
        Ok(())
    }

    /// Returns and clears the actor's pending notices.
    pub async fn take(&self, actor_id: Uuid) -> AppResult<Vec<Notice>> {
        let key = keys::notices(actor_id);
        let queued: Vec<Notice> = self.cache.get_json(&key).await?.unwrap_or_default();
        if !queued.is_empty() {
            self.cache.delete(&key).await?;
        }
        Ok(queued)
    }
}
