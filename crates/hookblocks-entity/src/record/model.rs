//! Content record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::meta::{self, DEFAULT_PRIORITY};
use super::status::RecordStatus;

/// A block of markup bound to a named hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ContentRecord {
    /// Unique record identifier, assigned by the store.
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    /// Admin-facing title.
    #[serde(default)]
    pub title: String,
    /// Name of the hook the body is emitted at. Empty means never active.
    #[serde(default)]
    pub hook_name: String,
    /// Hook priority; lower fires earlier.
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Already-sanitized markup.
    #[serde(default)]
    pub body: String,
    /// Publish status.
    #[serde(default)]
    pub status: RecordStatus,
    /// Explicit ordering value used to break priority ties.
    #[serde(default)]
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    /// When the record was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// When the record was last written.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl ContentRecord {
    /// Build a new draft record from creation data.
    pub fn from_create(data: CreateRecord) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: data.title,
            hook_name: meta::sanitize_hook_name(&data.hook_name),
            priority: data.priority.unwrap_or(DEFAULT_PRIORITY),
            body: data.body,
            status: RecordStatus::Draft,
            order: data.order,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the record names a hook.
    pub fn has_hook(&self) -> bool {
        !self.hook_name.is_empty()
    }

    /// Whether the record belongs to the active set.
    pub fn is_active(&self) -> bool {
        self.status.is_published() && self.has_hook()
    }

    /// Apply a partial update. Status is not touched.
    pub fn apply(&mut self, update: UpdateRecord) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(hook_name) = update.hook_name {
            self.hook_name = meta::sanitize_hook_name(&hook_name);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
        if let Some(order) = update.order {
            self.order = order;
        }
        self.updated_at = Utc::now();
    }
}

/// Data required to create a new record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRecord {
    /// Title.
    pub title: String,
    /// Target hook name (sanitized on create).
    #[serde(default)]
    pub hook_name: String,
    /// Priority; defaults to 10.
    #[serde(default)]
    pub priority: Option<i32>,
    /// Markup body.
    #[serde(default)]
    pub body: String,
    /// Ordering value.
    #[serde(default)]
    pub order: i32,
}

/// Partial update of an existing record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// New title.
    pub title: Option<String>,
    /// New hook name.
    pub hook_name: Option<String>,
    /// New priority.
    pub priority: Option<i32>,
    /// New body.
    pub body: Option<String>,
    /// New ordering value.
    pub order: Option<i32>,
}

impl UpdateRecord {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.hook_name.is_none()
            && self.priority.is_none()
            && self.body.is_none()
            && self.order.is_none()
    }
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}
