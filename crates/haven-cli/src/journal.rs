//! Journal subcommands. Each one runs a single store operation and prints
//! the outcome.

use std::io::Write;

use haven_core::models::{JournalEntry, Mood};
use haven_journal::{Clock, JournalStore};
use haven_storage::KeyValueStore;

pub fn list<S: KeyValueStore, C: Clock>(
    store: &JournalStore<S, C>,
    mut output: impl Write,
) -> eyre::Result<()> {
    let entries = store.list()?;
    if entries.is_empty() {
        writeln!(output, "No journal entries yet.")?;
        return Ok(());
    }
    for entry in &entries {
        writeln!(
            output,
            "{} {}  {}  {}",
            entry.mood.emoji(),
            entry.date,
            entry.title,
            entry.id
        )?;
    }
    Ok(())
}

pub fn show<S: KeyValueStore, C: Clock>(
    store: &JournalStore<S, C>,
    id: &str,
    output: impl Write,
) -> eyre::Result<()> {
    let entry = store.get(id)?;
    print_entry(&entry, output)
}

pub fn add<S: KeyValueStore, C: Clock>(
    store: &mut JournalStore<S, C>,
    title: &str,
    body: &str,
    mood: Mood,
    mut output: impl Write,
) -> eyre::Result<JournalEntry> {
    let entry = store.create(title, body, mood)?;
    writeln!(output, "Entry saved: {}", entry.id)?;
    Ok(entry)
}

pub fn edit<S: KeyValueStore, C: Clock>(
    store: &mut JournalStore<S, C>,
    id: &str,
    title: &str,
    body: &str,
    mood: Mood,
    mut output: impl Write,
) -> eyre::Result<JournalEntry> {
    let entry = store.update(id, title, body, mood)?;
    writeln!(output, "Entry updated: {}", entry.id)?;
    Ok(entry)
}

pub fn delete<S: KeyValueStore, C: Clock>(
    store: &mut JournalStore<S, C>,
    id: &str,
    mut output: impl Write,
) -> eyre::Result<()> {
    let removed = store.delete(id)?;
    writeln!(output, "Entry deleted: {} ({})", removed.title, removed.id)?;
    Ok(())
}

fn print_entry(entry: &JournalEntry, mut output: impl Write) -> eyre::Result<()> {
    writeln!(output, "{}", entry.title)?;
    writeln!(
        output,
        "{}  {} {}",
        entry.date,
        entry.mood.emoji(),
        entry.mood.label()
    )?;
    writeln!(output)?;
    writeln!(output, "{}", entry.body)?;
    Ok(())
}
