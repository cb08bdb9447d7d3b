pub mod journal_entry;
pub mod mood;

pub use journal_entry::JournalEntry;
pub use mood::Mood;
