//! haven-core
//!
//! Pure domain types and storage key conventions.
//! No storage or randomness dependency — this is the shared vocabulary of Haven.

pub mod error;
pub mod models;
pub mod storage_keys;
