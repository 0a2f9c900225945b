//! Admin list view rows with sortable hook and priority columns.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hookblocks_entity::record::{ContentRecord, RecordStatus};

/// One row of the admin record list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRow {
    /// Record ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Publish status.
    pub status: RecordStatus,
    /// Target hook; empty when unset.
    pub hook: String,
    /// Hook priority.
    pub priority: i32,
    /// Ordering value.
    pub order: i32,
}

impl From<&ContentRecord> for AdminRow {
    fn from(record: &ContentRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            status: record.status,
            hook: record.hook_name.clone(),
            priority: record.priority,
            order: record.order,
        }
    }
}

/// Sortable columns of the admin list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminSort {
    /// By ordering value (the list default).
    #[default]
    Order,
    /// By hook name.
    Hook,
    /// By priority.
    Priority,
}

impl AdminSort {
    /// Sorts rows by this column; ties fall back to order, then ID.
    pub fn sort(self, rows: &mut [AdminRow], descending: bool) {
        rows.sort_by(|a, b| {
            let primary = match self {
                Self::Order => Ordering::Equal,
                Self::Hook => a.hook.cmp(&b.hook),
                Self::Priority => a.priority.cmp(&b.priority),
            };
            let primary = if descending { primary.reverse() } else { primary };
            primary.then(a.order.cmp(&b.order)).then(a.id.cmp(&b.id))
        });
    }
}

impl fmt::Display for AdminSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Order => write!(f, "order"),
            Self::Hook => write!(f, "hook"),
            Self::Priority => write!(f, "priority"),
        }
    }
}

impl FromStr for AdminSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "order" => Ok(Self::Order),
            "hook" => Ok(Self::Hook),
            "priority" => Ok(Self::Priority),
            other => Err(format!(
                "unknown sort column '{other}' (expected order, hook or priority)"
            )),
        }
    }
}
