use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    /// The instrument's sampling parameters or result bands are unusable.
    #[error("invalid instrument configuration: {0}")]
    Configuration(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("no assessment session in progress")]
    NoActiveSession,

    #[error("score {score} is outside [{min}, {max}]")]
    ScoreOutOfRange { score: u32, min: u32, max: u32 },
}
