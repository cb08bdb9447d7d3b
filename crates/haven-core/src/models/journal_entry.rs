use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::mood::Mood;

/// One record in the journal.
///
/// Serialized with the field names of the persisted collection: the body is
/// stored as `content` and `created_at` as `timestamp` (epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JournalEntry {
    pub id: String,
    /// Calendar date of `created_at`, fixed when the entry is written.
    pub date: String,
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
    pub mood: Mood,
    #[serde(
        rename = "timestamp",
        with = "jiff::fmt::serde::timestamp::millisecond::required"
    )]
    #[ts(type = "number")]
    pub created_at: jiff::Timestamp,
}
