//! Cache key builders for every HookBlocks cache entry.

use uuid::Uuid;

/// Prefix applied to all HookBlocks cache keys.
pub const PREFIX: &str = "hookblocks";

/// Fixed key holding the materialized list of active records.
pub fn active_records() -> String {
    format!("{PREFIX}:active_records")
}

/// Key holding queued notices for one actor.
pub fn notices(actor_id: Uuid) -> String {
    format!("{PREFIX}:notice:{actor_id}")
}

/// Pattern matching every HookBlocks key.
pub fn all_pattern() -> String {
    format!("{PREFIX}:*")
}
