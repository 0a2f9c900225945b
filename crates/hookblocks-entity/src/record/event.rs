//! Lifecycle events emitted by record operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::RecordStatus;

/// Something that happened to a content record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RecordEvent {
    /// The record was written to the store.
    Saved {
        /// The record ID.
        record_id: Uuid,
        /// Status after the save.
        status: RecordStatus,
    },
    /// The record moved between statuses.
    StatusChanged {
        /// The record ID.
        record_id: Uuid,
        /// Previous status.
        from: RecordStatus,
        /// New status.
        to: RecordStatus,
    },
    /// The record was moved to the trash.
    Trashed {
        /// The record ID.
        record_id: Uuid,
    },
    /// The record was permanently deleted.
    Deleted {
        /// The record ID.
        record_id: Uuid,
    },
}

impl RecordEvent {
    /// The record this event concerns.
    pub fn record_id(&self) -> Uuid {
        match self {
            Self::Saved { record_id, .. }
            | Self::StatusChanged { record_id, .. }
            | Self::Trashed { record_id }
            | Self::Deleted { record_id } => *record_id,
        }
    }

    /// Short event name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Saved { .. } => "saved",
            Self::StatusChanged { .. } => "status_changed",
            Self::Trashed { .. } => "trashed",
            Self::Deleted { .. } => "deleted",
        }
    }
}
