use haven_core::models::{JournalEntry, Mood};
use haven_core::storage_keys;
use haven_storage::KeyValueStore;
use haven_storage::error::StorageError;
use haven_storage::state;
use jiff::Timestamp;
use jiff::tz::TimeZone;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::collection::EntryCollection;
use crate::error::JournalError;

/// Owns the journal's persisted collection.
///
/// Each mutation loads the whole collection, applies one change and writes
/// the whole collection back before returning. The backend must replace
/// values atomically. Two stores sharing one key must be serialized by the
/// caller; nothing here locks.
pub struct JournalStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    key: String,
    time_zone: TimeZone,
    last_created: Option<Timestamp>,
}

impl<S: KeyValueStore> JournalStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> JournalStore<S, C> {
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            key: storage_keys::JOURNAL_ENTRIES.to_string(),
            time_zone: TimeZone::system(),
            last_created: None,
        }
    }

    /// Store the collection under `key` instead of the default.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Time zone used for the display date of new entries.
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the persisted collection. A missing key is an empty journal; a
    /// value that cannot be decoded is reported, never replaced.
    pub fn load(&self) -> Result<EntryCollection, JournalError> {
        let entries: Vec<JournalEntry> = match state::load_json(&self.storage, &self.key) {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no journal stored, starting empty");
                return Ok(EntryCollection::new());
            }
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(key = %self.key, error = %e, "stored journal does not decode");
                return Err(self.corruption(e));
            }
            Err(e) => return Err(e.into()),
        };

        let collection = EntryCollection::from_entries(entries).map_err(|e| {
            tracing::warn!(key = %self.key, error = %e, "stored journal has duplicate ids");
            self.corruption(e)
        })?;

        tracing::debug!(key = %self.key, entries = collection.len(), "journal loaded");
        Ok(collection)
    }

    /// All entries, newest first.
    pub fn list(&self) -> Result<Vec<JournalEntry>, JournalError> {
        let collection = self.load()?;
        Ok(collection.newest_first().into_iter().cloned().collect())
    }

    pub fn get(&self, id: &str) -> Result<JournalEntry, JournalError> {
        self.load()?
            .remove(id)
            .ok_or_else(|| JournalError::NotFound { id: id.to_string() })
    }

    /// Write a new entry and return it.
    pub fn create(&mut self, title: &str, body: &str, mood: Mood) -> Result<JournalEntry, JournalError> {
        let (title, body) = validate(title, body)?;
        let mut collection = self.load()?;

        let created_at = self.next_created_at(&collection)?;
        let entry = JournalEntry {
            id: Uuid::new_v4().to_string(),
            date: created_at.to_zoned(self.time_zone.clone()).date().to_string(),
            title,
            body,
            mood,
            created_at,
        };
        collection.insert(entry.clone());
        self.save(&collection)?;
        self.last_created = Some(created_at);

        tracing::info!(id = %entry.id, mood = %entry.mood, "journal entry created");
        Ok(entry)
    }

    /// Replace the title, body and mood of an existing entry. The id,
    /// creation time and display date are kept.
    pub fn update(
        &mut self,
        id: &str,
        title: &str,
        body: &str,
        mood: Mood,
    ) -> Result<JournalEntry, JournalError> {
        let (title, body) = validate(title, body)?;
        let mut collection = self.load()?;

        let entry = collection
            .get_mut(id)
            .ok_or_else(|| JournalError::NotFound { id: id.to_string() })?;
        entry.title = title;
        entry.body = body;
        entry.mood = mood;
        let updated = entry.clone();

        self.save(&collection)?;
        tracing::info!(id = %updated.id, mood = %updated.mood, "journal entry updated");
        Ok(updated)
    }

    /// Remove an entry and return it. Deleting an id that is not present,
    /// including one already deleted, is `NotFound`.
    pub fn delete(&mut self, id: &str) -> Result<JournalEntry, JournalError> {
        let mut collection = self.load()?;
        let removed = collection
            .remove(id)
            .ok_or_else(|| JournalError::NotFound { id: id.to_string() })?;

        self.save(&collection)?;
        tracing::info!(id = %removed.id, "journal entry deleted");
        Ok(removed)
    }

    fn save(&mut self, collection: &EntryCollection) -> Result<(), JournalError> {
        state::save_json(&mut self.storage, &self.key, &collection.newest_first())?;
        Ok(())
    }

    /// Clock time at millisecond precision, moved one millisecond past the
    /// newest known creation time when the clock has not passed it.
    fn next_created_at(&self, collection: &EntryCollection) -> Result<Timestamp, JournalError> {
        let now = self.clock.now().as_millisecond();
        let floor = self.last_created.max(collection.newest_created_at());
        let millis = match floor {
            Some(floor) if now <= floor.as_millisecond() => floor.as_millisecond() + 1,
            _ => now,
        };
        Ok(Timestamp::from_millisecond(millis)?)
    }

    fn corruption(&self, reason: impl std::fmt::Display) -> JournalError {
        JournalError::PersistenceCorruption {
            key: self.key.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Trimmed title and body, or the first one that is blank.
fn validate(title: &str, body: &str) -> Result<(String, String), JournalError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(JournalError::Validation { field: "title" });
    }
    let body = body.trim();
    if body.is_empty() {
        return Err(JournalError::Validation { field: "body" });
    }
    Ok((title.to_string(), body.to_string()))
}
