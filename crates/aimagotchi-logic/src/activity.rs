//! Activity feed records: append-only events emitted by care actions.

use crate::constants::ACTIVITY_FEED_LIMIT;
use serde::{Deserialize, Serialize};

/// Activity kinds stored as `u8`.
pub mod activity_kinds {
    pub const CREATED: u8 = 0;
    pub const FED: u8 = 1;
    pub const PLAYED: u8 = 2;
    pub const DIED: u8 = 3;
    pub const DISTRIBUTED: u8 = 4;
}

/// Display name for an activity kind.
pub fn kind_name(kind: u8) -> &'static str {
    match kind {
        activity_kinds::CREATED => "created",
        activity_kinds::FED => "fed",
        activity_kinds::PLAYED => "played",
        activity_kinds::DIED => "died",
        activity_kinds::DISTRIBUTED => "distributed",
        _ => "unknown",
    }
}

/// Feed message for an activity. `coins` is ignored by kinds that do not
/// mention an amount.
pub fn message(kind: u8, pet_name: &str, coins: u64) -> String {
    match kind {
        activity_kinds::CREATED => format!("{} was born into the world!", pet_name),
        activity_kinds::FED => format!("{} enjoyed a delicious meal!", pet_name),
        activity_kinds::PLAYED => {
            format!("{} had a blast playing and earned {} coins!", pet_name, coins)
        }
        activity_kinds::DIED => format!(
            "{} passed away from neglect. {} coins returned to the pool.",
            pet_name, coins
        ),
        activity_kinds::DISTRIBUTED => {
            format!("{} claimed {} coins from the pool!", pet_name, coins)
        }
        _ => String::new(),
    }
}

/// One immutable feed entry. Ordering for display is `created_at` descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub kind: u8,
    pub pet_name: String,
    pub message: String,
    pub coins_involved: Option<u64>,
    pub created_at: i64,
}

/// The most recent feed entries, newest first, at most
/// [`ACTIVITY_FEED_LIMIT`] of them.
pub fn recent(mut entries: Vec<ActivityRecord>) -> Vec<ActivityRecord> {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries.truncate(ACTIVITY_FEED_LIMIT);
    entries
}
