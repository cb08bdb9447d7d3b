//! haven-cli library root.
//!
//! Re-exports internal modules so that integration tests can exercise the
//! config layer and the terminal drivers without spawning the binary.

pub mod assess;
pub mod config;
pub mod journal;
