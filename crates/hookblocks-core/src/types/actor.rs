//! The administrator (or anonymous caller) performing an operation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity and capability of the caller performing a record operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The caller's ID. Notices are queued per actor.
    pub id: Uuid,
    /// Display name, used in logs.
    pub name: String,
    /// Whether the caller may create, edit, publish, or delete records.
    pub can_manage: bool,
}

impl Actor {
    /// An administrator allowed to manage records.
    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            can_manage: true,
        }
    }

    /// A caller without management capability.
    pub fn viewer(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            can_manage: false,
        }
    }

    /// The fixed local operator used by the command-line tool.
    pub fn operator() -> Self {
        Self {
            id: Uuid::nil(),
            name: "operator".to_string(),
            can_manage: true,
        }
    }
}
