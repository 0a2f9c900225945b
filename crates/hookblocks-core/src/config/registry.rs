//! Registry snapshot, notice, and priority settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the active-record registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Lifetime of the cached active-record snapshot in seconds (12 hours).
    #[serde(default = "default_snapshot_ttl")]
    pub snapshot_ttl_seconds: u64,
    /// Lifetime of a queued user notice in seconds.
    #[serde(default = "default_notice_ttl")]
    pub notice_ttl_seconds: u64,
    /// Priority assigned to records that do not set one.
    #[serde(default = "default_priority")]
    pub default_priority: i32,
}

impl RegistryConfig {
    /// Snapshot TTL as a [`Duration`].
    pub fn snapshot_ttl(&self) -> Duration {
        Duration::from_secs(self.snapshot_ttl_seconds)
    }

    /// Notice TTL as a [`Duration`].
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_seconds)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            snapshot_ttl_seconds: default_snapshot_ttl(),
            notice_ttl_seconds: default_notice_ttl(),
            default_priority: default_priority(),
        }
    }
}

fn default_snapshot_ttl() -> u64 {
    12 * 60 * 60
}

fn default_notice_ttl() -> u64 {
    60
}

fn default_priority() -> i32 {
    10
}
