use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use haven_core::models::JournalEntry;
use jiff::Timestamp;

use crate::error::DuplicateId;

/// All journal entries, keyed by id.
///
/// Holds no order of its own; [`EntryCollection::newest_first`] derives the
/// display order from `created_at` on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCollection {
    entries: BTreeMap<String, JournalEntry>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from decoded records, rejecting repeated ids.
    pub fn from_entries(entries: Vec<JournalEntry>) -> Result<Self, DuplicateId> {
        let mut collection = Self::new();
        for entry in entries {
            match collection.entries.entry(entry.id.clone()) {
                Entry::Occupied(slot) => return Err(DuplicateId(slot.key().clone())),
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut JournalEntry> {
        self.entries.get_mut(id)
    }

    /// Insert or replace the entry with the same id.
    pub fn insert(&mut self, entry: JournalEntry) -> Option<JournalEntry> {
        self.entries.insert(entry.id.clone(), entry)
    }

    pub fn remove(&mut self, id: &str) -> Option<JournalEntry> {
        self.entries.remove(id)
    }

    /// Latest `created_at` in the collection.
    pub fn newest_created_at(&self) -> Option<Timestamp> {
        self.entries.values().map(|e| e.created_at).max()
    }

    /// Entries by `created_at`, newest first. Equal times fall back to id,
    /// descending, so the order is total.
    pub fn newest_first(&self) -> Vec<&JournalEntry> {
        let mut sorted: Vec<_> = self.entries.values().collect();
        sorted.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        sorted
    }
}
