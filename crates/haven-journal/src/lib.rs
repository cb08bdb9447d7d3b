//! haven-journal
//!
//! The private journal. Entries live in one collection, persisted as a
//! single blob through a [`haven_storage::KeyValueStore`]; every mutation
//! rewrites the whole blob.

pub mod clock;
pub mod collection;
pub mod error;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use collection::EntryCollection;
pub use store::JournalStore;
