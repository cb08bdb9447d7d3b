//! Storage key conventions.
//!
//! Pure constants — no storage dependency. These define the canonical keys
//! under which Haven state is held by a key-value backend.

/// The full journal entry collection, as one JSON array.
pub const JOURNAL_ENTRIES: &str = "journal-entries";
