//! haven-instruments
//!
//! Self-assessment questionnaires. Defines each instrument's question bank,
//! sample size and result bands, and the engine that samples a session,
//! collects responses and scores them. No storage dependency.

pub mod engine;
pub mod error;
pub mod instruments;
pub mod scoring;

pub use engine::{AssessmentEngine, AssessmentResult};

use error::AssessmentError;
use scoring::{Question, ResultBand};

/// Trait implemented by each self-assessment instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "wellness_check").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Mental Health Check-In").
    fn name(&self) -> &str;

    /// The full question bank, ordered by bank index.
    fn questions(&self) -> &[Question];

    /// How many questions one session draws from the bank.
    fn sample_size(&self) -> usize;

    /// Result bands in ascending score order.
    fn bands(&self) -> &[ResultBand];

    /// Check the sampling parameters and band layout.
    fn validate(&self) -> Result<(), AssessmentError> {
        let bank = self.questions().len();
        let k = self.sample_size();
        if k == 0 || k > bank {
            return Err(AssessmentError::Configuration(format!(
                "{}: sample size {k} must be between 1 and the bank size {bank}",
                self.name()
            )));
        }

        if let Some((pos, q)) = self
            .questions()
            .iter()
            .enumerate()
            .find(|(pos, q)| q.bank_index != *pos)
        {
            return Err(AssessmentError::Configuration(format!(
                "{}: question at position {pos} claims bank index {}",
                self.name(),
                q.bank_index
            )));
        }

        scoring::validate_bands(self.bands(), k).map_err(|e| match e {
            AssessmentError::Configuration(msg) => {
                AssessmentError::Configuration(format!("{}: {msg}", self.name()))
            }
            other => other,
        })
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::wellness_check::WellnessCheck)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
