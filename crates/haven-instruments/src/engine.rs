use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;
use ts_rs::TS;

use crate::error::AssessmentError;
use crate::scoring::{self, Likert, ResultBand, SampledQuestion};
use crate::{Instrument, get_instrument};

/// Score and band for a session, with how many answers were filled in by
/// the unanswered-question default.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct AssessmentResult {
    pub instrument_id: String,
    pub score: u32,
    pub min_score: u32,
    pub max_score: u32,
    pub band: ResultBand,
    pub answered: usize,
    pub unanswered: usize,
}

struct Session {
    questions: Vec<SampledQuestion>,
    responses: BTreeMap<usize, Likert>,
}

/// Runs one assessment session at a time for a single instrument.
///
/// The random source is injected so sessions can be reproduced from a seed.
pub struct AssessmentEngine<R> {
    instrument: Box<dyn Instrument>,
    rng: R,
    session: Option<Session>,
}

impl<R: Rng> AssessmentEngine<R> {
    /// Build an engine, rejecting instruments whose configuration cannot
    /// produce a valid session.
    pub fn new(instrument: Box<dyn Instrument>, rng: R) -> Result<Self, AssessmentError> {
        instrument.validate()?;
        Ok(Self {
            instrument,
            rng,
            session: None,
        })
    }

    /// Build an engine for a registered instrument.
    pub fn for_instrument(id: &str, rng: R) -> Result<Self, AssessmentError> {
        let instrument =
            get_instrument(id).ok_or_else(|| AssessmentError::UnknownInstrument(id.to_string()))?;
        Self::new(instrument, rng)
    }

    pub fn instrument(&self) -> &dyn Instrument {
        self.instrument.as_ref()
    }

    /// Sample a fresh set of questions. Any session in progress is discarded.
    pub fn start_session(&mut self) -> Result<&[SampledQuestion], AssessmentError> {
        let questions = scoring::sample_questions(
            self.instrument.questions(),
            self.instrument.sample_size(),
            &mut self.rng,
        )?;

        tracing::debug!(
            instrument = self.instrument.id(),
            sample_size = questions.len(),
            replaced = self.session.is_some(),
            "assessment session started"
        );

        let session = self.session.insert(Session {
            questions,
            responses: BTreeMap::new(),
        });
        Ok(session.questions.as_slice())
    }

    /// Questions of the current session in display order. Empty if no session.
    pub fn questions(&self) -> &[SampledQuestion] {
        self.session
            .as_ref()
            .map(|s| s.questions.as_slice())
            .unwrap_or_default()
    }

    /// Recorded responses keyed by display index.
    pub fn responses(&self) -> Option<&BTreeMap<usize, Likert>> {
        self.session.as_ref().map(|s| &s.responses)
    }

    pub fn response(&self, display_index: usize) -> Option<Likert> {
        self.session
            .as_ref()
            .and_then(|s| s.responses.get(&display_index).copied())
    }

    /// Record (or overwrite) the response to one displayed question.
    pub fn record_response(&mut self, display_index: usize, value: u8) -> Result<(), AssessmentError> {
        let session = self.session.as_mut().ok_or(AssessmentError::NoActiveSession)?;

        if display_index >= session.questions.len() {
            return Err(AssessmentError::InvalidResponse(format!(
                "question {display_index} is not in this session of {}",
                session.questions.len()
            )));
        }
        let value = Likert::try_from(value)?;

        session.responses.insert(display_index, value);
        Ok(())
    }

    /// True once every question in the session has a response.
    pub fn is_complete(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.responses.len() == s.questions.len())
    }

    /// Total score of the current session. Unanswered questions count as 1.
    pub fn compute_score(&self) -> Result<u32, AssessmentError> {
        let session = self.session.as_ref().ok_or(AssessmentError::NoActiveSession)?;
        Ok(scoring::score_responses(
            self.instrument.questions(),
            &session.questions,
            &session.responses,
        ))
    }

    /// Band for `score`. On a shared edge the lower band wins, since each
    /// band's range is closed and the next one starts one point higher.
    pub fn classify(&self, score: u32) -> Result<&ResultBand, AssessmentError> {
        let bounds = scoring::score_bounds(self.instrument.sample_size());
        scoring::classify(self.instrument.bands(), score).ok_or(AssessmentError::ScoreOutOfRange {
            score,
            min: bounds.min,
            max: bounds.max,
        })
    }

    /// Score and classify the current session.
    pub fn result(&self) -> Result<AssessmentResult, AssessmentError> {
        let score = self.compute_score()?;
        let band = self.classify(score)?.clone();
        let bounds = scoring::score_bounds(self.instrument.sample_size());
        let total = self.questions().len();
        let answered = self.responses().map(BTreeMap::len).unwrap_or(0);

        tracing::debug!(
            instrument = self.instrument.id(),
            score,
            band = %band.id,
            answered,
            "assessment scored"
        );

        Ok(AssessmentResult {
            instrument_id: self.instrument.id().to_string(),
            score,
            min_score: bounds.min,
            max_score: bounds.max,
            band,
            answered,
            unanswered: total - answered,
        })
    }

    /// Discard the current session's questions and responses.
    pub fn reset_session(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!(instrument = self.instrument.id(), "assessment session reset");
        }
    }
}
