use serde::{Serialize, de::DeserializeOwned};

use crate::KeyValueStore;
use crate::error::StorageError;

/// Load a JSON value stored under `key`. `Ok(None)` if the key is absent.
///
/// A value that does not decode as `T` is an error, never treated as absent.
pub fn load_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(bytes) = store.get(key)? else {
        return Ok(None);
    };
    let value: T = serde_json::from_slice(&bytes)?;
    Ok(Some(value))
}

/// Serialize `value` as JSON and replace whatever is stored under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.set(key, body)
}
