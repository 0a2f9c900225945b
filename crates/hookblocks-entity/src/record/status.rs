//! Record publish status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publish status of a content record.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "record_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Being edited; never emitted.
    #[default]
    Draft,
    /// Live; emitted when the hook name is set.
    Published,
    /// In the trash; kept until the store purges it.
    Trashed,
}

impl RecordStatus {
    /// Whether records in this status can be part of the active set.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Trashed => "trashed",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" | "publish" => Ok(Self::Published),
            "trashed" | "trash" => Ok(Self::Trashed),
            other => Err(format!("unknown record status '{other}'")),
        }
    }
}
