use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown mood: {0}")]
    UnknownMood(String),
}
