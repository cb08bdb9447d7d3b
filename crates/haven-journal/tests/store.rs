use std::cell::Cell;

use haven_core::models::{JournalEntry, Mood};
use haven_core::storage_keys;
use haven_journal::error::JournalError;
use haven_journal::{Clock, EntryCollection, JournalStore};
use haven_storage::error::StorageError;
use haven_storage::{FileStore, KeyValueStore, MemoryStore};
use jiff::Timestamp;
use jiff::tz::{self, TimeZone};

/// Always reports the same instant.
struct FrozenClock(Timestamp);

impl Clock for FrozenClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Advances by one second on every reading.
struct TickingClock(Cell<i64>);

impl TickingClock {
    fn starting_at(millis: i64) -> Self {
        Self(Cell::new(millis))
    }
}

impl Clock for TickingClock {
    fn now(&self) -> Timestamp {
        let millis = self.0.get();
        self.0.set(millis + 1_000);
        Timestamp::from_millisecond(millis).unwrap()
    }
}

/// Reads succeed, writes always fail.
#[derive(Default)]
struct ReadOnlyStore(MemoryStore);

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.0.get(key)
    }

    fn set(&mut self, key: &str, _value: Vec<u8>) -> Result<(), StorageError> {
        Err(StorageError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

fn store() -> JournalStore<MemoryStore, TickingClock> {
    JournalStore::with_clock(MemoryStore::new(), TickingClock::starting_at(1_760_000_000_000))
        .with_time_zone(TimeZone::UTC)
}

fn store_with_blob(blob: &str) -> JournalStore<MemoryStore, TickingClock> {
    let mut storage = MemoryStore::new();
    storage
        .set(storage_keys::JOURNAL_ENTRIES, blob.as_bytes().to_vec())
        .unwrap();
    JournalStore::with_clock(storage, TickingClock::starting_at(1_760_000_000_000))
        .with_time_zone(TimeZone::UTC)
}

fn raw_blob<S: KeyValueStore, C: Clock>(store: &JournalStore<S, C>) -> Option<Vec<u8>> {
    store.storage().get(store.key()).unwrap()
}

fn record(id: &str, millis: i64) -> String {
    format!(
        r#"{{"id":"{id}","date":"d","title":"t{id}","content":"c{id}","mood":"okay","timestamp":{millis}}}"#
    )
}

#[test]
fn missing_key_is_an_empty_journal() {
    let store = store();
    assert!(store.load().unwrap().is_empty());
    assert!(store.list().unwrap().is_empty());
    assert!(raw_blob(&store).is_none());
}

#[test]
fn create_then_list_shows_the_new_entry() {
    let mut store = store();
    let entry = store.create("Morning", "Walked by the river.", Mood::Great).unwrap();

    let listed = store.list().unwrap();
    assert_eq!(listed, vec![entry.clone()]);
    assert_eq!(entry.title, "Morning");
    assert_eq!(entry.body, "Walked by the river.");
    assert_eq!(entry.mood, Mood::Great);
    assert!(!entry.id.is_empty());
}

#[test]
fn create_assigns_fresh_ids() {
    let mut store = store();
    let a = store.create("a", "a", Mood::Good).unwrap();
    let b = store.create("b", "b", Mood::Good).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(store.list().unwrap().len(), 2);
}

#[test]
fn create_trims_title_and_body() {
    let mut store = store();
    let entry = store.create("  Evening \n", "\tquiet day  ", Mood::Okay).unwrap();
    assert_eq!(entry.title, "Evening");
    assert_eq!(entry.body, "quiet day");
}

#[test]
fn blank_fields_are_rejected_before_anything_is_written() {
    let mut store = store();

    assert!(matches!(
        store.create("   ", "body", Mood::Low),
        Err(JournalError::Validation { field: "title" })
    ));
    assert!(matches!(
        store.create("title", "\n\t", Mood::Low),
        Err(JournalError::Validation { field: "body" })
    ));
    assert!(raw_blob(&store).is_none());
}

#[test]
fn display_date_follows_the_time_zone() {
    let late_evening: Timestamp = "2024-06-10T23:30:00Z".parse().unwrap();

    let mut utc = JournalStore::with_clock(MemoryStore::new(), FrozenClock(late_evening))
        .with_time_zone(TimeZone::UTC);
    assert_eq!(utc.create("t", "b", Mood::Okay).unwrap().date, "2024-06-10");

    let mut east = JournalStore::with_clock(MemoryStore::new(), FrozenClock(late_evening))
        .with_time_zone(TimeZone::fixed(tz::offset(2)));
    assert_eq!(east.create("t", "b", Mood::Okay).unwrap().date, "2024-06-11");
}

#[test]
fn update_replaces_content_but_keeps_identity() {
    let mut store = store();
    let original = store.create("Draft", "first pass", Mood::Low).unwrap();

    let updated = store
        .update(&original.id, " Final ", "second pass", Mood::Good)
        .unwrap();
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.date, original.date);
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.body, "second pass");
    assert_eq!(updated.mood, Mood::Good);

    assert_eq!(store.list().unwrap(), vec![updated]);
}

#[test]
fn update_of_unknown_id_is_not_found() {
    let mut store = store();
    store.create("kept", "kept", Mood::Okay).unwrap();
    let before = raw_blob(&store);

    assert!(matches!(
        store.update("missing", "t", "b", Mood::Okay),
        Err(JournalError::NotFound { id }) if id == "missing"
    ));
    assert_eq!(raw_blob(&store), before);
}

#[test]
fn update_validates_before_looking_up() {
    let mut store = store();
    assert!(matches!(
        store.update("missing", "", "b", Mood::Okay),
        Err(JournalError::Validation { field: "title" })
    ));
}

#[test]
fn delete_removes_and_second_delete_is_not_found() {
    let mut store = store();
    let keep = store.create("keep", "keep", Mood::Okay).unwrap();
    let gone = store.create("gone", "gone", Mood::Anxious).unwrap();

    let removed = store.delete(&gone.id).unwrap();
    assert_eq!(removed, gone);
    assert_eq!(store.list().unwrap(), vec![keep]);

    assert!(matches!(
        store.delete(&gone.id),
        Err(JournalError::NotFound { id }) if id == gone.id
    ));
}

#[test]
fn get_returns_entry_or_not_found() {
    let mut store = store();
    let entry = store.create("t", "b", Mood::Good).unwrap();
    assert_eq!(store.get(&entry.id).unwrap(), entry);
    assert!(matches!(store.get("nope"), Err(JournalError::NotFound { .. })));
}

#[test]
fn list_is_newest_first_regardless_of_stored_order() {
    let blob = format!("[{},{},{}]", record("a", 100), record("c", 300), record("b", 200));
    let store = store_with_blob(&blob);

    let millis: Vec<_> = store
        .list()
        .unwrap()
        .iter()
        .map(|e| e.created_at.as_millisecond())
        .collect();
    assert_eq!(millis, vec![300, 200, 100]);
}

#[test]
fn list_orders_creates_newest_first() {
    let mut store = store();
    let first = store.create("1", "1", Mood::Okay).unwrap();
    let second = store.create("2", "2", Mood::Okay).unwrap();
    let third = store.create("3", "3", Mood::Okay).unwrap();

    let ids: Vec<_> = store.list().unwrap().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[test]
fn frozen_clock_still_yields_increasing_creation_times() {
    let now: Timestamp = "2026-01-01T09:00:00Z".parse().unwrap();
    let mut store = JournalStore::with_clock(MemoryStore::new(), FrozenClock(now))
        .with_time_zone(TimeZone::UTC);

    let a = store.create("a", "a", Mood::Okay).unwrap();
    let b = store.create("b", "b", Mood::Okay).unwrap();
    let c = store.create("c", "c", Mood::Okay).unwrap();

    assert_eq!(a.created_at, now);
    assert_eq!(b.created_at.as_millisecond(), now.as_millisecond() + 1);
    assert_eq!(c.created_at.as_millisecond(), now.as_millisecond() + 2);
}

#[test]
fn creation_time_passes_the_newest_persisted_entry() {
    let blob = format!("[{}]", record("old", 5_000));
    let storage = {
        let mut s = MemoryStore::new();
        s.set(storage_keys::JOURNAL_ENTRIES, blob.into_bytes()).unwrap();
        s
    };
    let behind = Timestamp::from_millisecond(1_000).unwrap();
    let mut store = JournalStore::with_clock(storage, FrozenClock(behind)).with_time_zone(TimeZone::UTC);

    let entry = store.create("new", "new", Mood::Good).unwrap();
    assert_eq!(entry.created_at.as_millisecond(), 5_001);
    assert_eq!(store.list().unwrap()[0].id, entry.id);
}

#[test]
fn sub_millisecond_clock_readings_survive_persistence() {
    let precise: Timestamp = "2026-03-04T05:06:07.123456789Z".parse().unwrap();
    let mut store = JournalStore::with_clock(MemoryStore::new(), FrozenClock(precise))
        .with_time_zone(TimeZone::UTC);

    let entry = store.create("t", "b", Mood::Okay).unwrap();
    assert_eq!(entry.created_at.as_millisecond(), precise.as_millisecond());
    assert_eq!(store.get(&entry.id).unwrap(), entry);
}

#[test]
fn undecodable_blob_is_reported_and_left_untouched() {
    let mut store = store_with_blob("{ this is not a journal");

    assert!(matches!(store.load(), Err(JournalError::PersistenceCorruption { .. })));
    assert!(matches!(store.list(), Err(JournalError::PersistenceCorruption { .. })));
    assert!(matches!(
        store.create("t", "b", Mood::Okay),
        Err(JournalError::PersistenceCorruption { .. })
    ));
    assert_eq!(raw_blob(&store).unwrap(), b"{ this is not a journal".to_vec());
}

#[test]
fn unknown_mood_in_blob_is_corruption() {
    let blob = r#"[{"id":"1","date":"d","title":"t","content":"c","mood":"ecstatic","timestamp":1}]"#;
    let store = store_with_blob(blob);
    assert!(matches!(store.list(), Err(JournalError::PersistenceCorruption { .. })));
}

#[test]
fn duplicate_ids_are_corruption() {
    let blob = format!("[{},{}]", record("same", 1), record("same", 2));
    let mut store = store_with_blob(&blob);

    match store.load() {
        Err(JournalError::PersistenceCorruption { key, reason }) => {
            assert_eq!(key, storage_keys::JOURNAL_ENTRIES);
            assert!(reason.contains("same"), "reason: {reason}");
        }
        other => panic!("expected corruption, got {other:?}"),
    }
    assert!(store.delete("same").is_err());
    assert_eq!(raw_blob(&store).unwrap(), blob.into_bytes());
}

#[test]
fn write_failures_are_surfaced() {
    let mut store = JournalStore::with_clock(ReadOnlyStore::default(), TickingClock::starting_at(0));
    assert!(matches!(
        store.create("t", "b", Mood::Okay),
        Err(JournalError::Storage(StorageError::Io { .. }))
    ));
}

#[test]
fn legacy_collection_loads() {
    let blob = r#"[
        {"id":"1718000500000","date":"6/10/2024","title":"Second","content":"More.","mood":"low","timestamp":1718000500000},
        {"id":"1718000000000","date":"6/10/2024","title":"First","content":"Hello.","mood":"great","timestamp":1718000000000}
    ]"#;
    let mut store = store_with_blob(blob);

    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "Second");
    assert_eq!(listed[1].mood, Mood::Great);

    let edited = store.update("1718000000000", "First!", "Hello.", Mood::Good).unwrap();
    assert_eq!(edited.date, "6/10/2024");
    assert_eq!(edited.created_at.as_millisecond(), 1_718_000_000_000);
}

#[test]
fn persisted_blob_is_a_newest_first_array_of_records() {
    let mut store = store();
    let older = store.create("older", "o", Mood::Low).unwrap();
    let newer = store.create("newer", "n", Mood::Great).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&raw_blob(&store).unwrap()).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], newer.id.as_str());
    assert_eq!(records[1]["id"], older.id.as_str());
    assert_eq!(records[1]["content"], "o");
    assert_eq!(records[1]["mood"], "low");
    assert_eq!(records[1]["timestamp"], older.created_at.as_millisecond());
}

#[test]
fn collection_round_trips_through_storage() {
    let mut store = store();
    for (i, mood) in Mood::ALL.into_iter().enumerate() {
        store.create(&format!("title {i}"), &format!("body {i}"), mood).unwrap();
    }
    let before = store.list().unwrap();

    let reopened = JournalStore::new(store.into_storage());
    assert_eq!(reopened.list().unwrap(), before);
}

#[test]
fn file_backed_journal_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();

    let created = {
        let mut store = JournalStore::new(FileStore::open(dir.path()).unwrap());
        store.create("On disk", "Persisted.", Mood::Good).unwrap()
    };

    let store = JournalStore::new(FileStore::open(dir.path()).unwrap());
    assert_eq!(store.list().unwrap(), vec![created]);
    assert!(dir.path().join("journal-entries.json").exists());
}

#[test]
fn custom_key_is_used_for_storage() {
    let mut store = store().with_key("journal-test");
    store.create("t", "b", Mood::Okay).unwrap();
    assert!(store.storage().get("journal-test").unwrap().is_some());
    assert!(store.storage().get(storage_keys::JOURNAL_ENTRIES).unwrap().is_none());
}

#[test]
fn collection_rejects_duplicates_and_sorts_ties_by_id() {
    let entry = |id: &str, millis| JournalEntry {
        id: id.to_string(),
        date: String::new(),
        title: "t".to_string(),
        body: "b".to_string(),
        mood: Mood::Okay,
        created_at: Timestamp::from_millisecond(millis).unwrap(),
    };

    assert!(EntryCollection::from_entries(vec![entry("x", 1), entry("x", 2)]).is_err());

    let collection =
        EntryCollection::from_entries(vec![entry("a", 10), entry("b", 10), entry("c", 5)]).unwrap();
    let ids: Vec<_> = collection.newest_first().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
    assert_eq!(collection.newest_created_at().unwrap().as_millisecond(), 10);
}
