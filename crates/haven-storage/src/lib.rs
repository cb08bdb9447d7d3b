//! haven-storage
//!
//! Whole-value key-value persistence. A backend only has to read and
//! replace one byte blob per key; everything above it does full
//! read-modify-write cycles.

pub mod error;
pub mod file;
pub mod memory;
pub mod state;

pub use file::FileStore;
pub use memory::MemoryStore;

use error::StorageError;

/// A persisted key-value service.
///
/// `set` must replace the stored value atomically: after a crash a reader
/// sees either the previous value or the new one, never a partial write.
/// Callers that share a key between processes must provide their own locking.
pub trait KeyValueStore {
    /// Read the value stored under `key`. `Ok(None)` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
