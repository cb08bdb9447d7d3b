use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AssessmentError;

/// Lowest value on the response scale.
pub const LIKERT_MIN: u8 = 1;
/// Highest value on the response scale.
pub const LIKERT_MAX: u8 = 5;

/// A statement in an instrument's question bank.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub bank_index: usize,
    pub text: String,
    /// Agreement with this statement indicates lower distress, so its
    /// contribution is `6 - value`.
    pub reverse_scored: bool,
}

/// A bank question placed at a position in one session's presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SampledQuestion {
    pub display_index: usize,
    pub bank_index: usize,
    pub text: String,
}

/// A five-point agreement rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Likert {
    StronglyDisagree = 1,
    Disagree = 2,
    Neutral = 3,
    Agree = 4,
    StronglyAgree = 5,
}

impl Likert {
    pub const ALL: [Likert; 5] = [
        Likert::StronglyDisagree,
        Likert::Disagree,
        Likert::Neutral,
        Likert::Agree,
        Likert::StronglyAgree,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Likert::StronglyDisagree => "Strongly Disagree",
            Likert::Disagree => "Disagree",
            Likert::Neutral => "Neutral",
            Likert::Agree => "Agree",
            Likert::StronglyAgree => "Strongly Agree",
        }
    }
}

impl TryFrom<u8> for Likert {
    type Error = AssessmentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Likert::ALL
            .into_iter()
            .find(|l| l.value() == value)
            .ok_or_else(|| {
                AssessmentError::InvalidResponse(format!(
                    "value {value} is outside [{LIKERT_MIN}, {LIKERT_MAX}]"
                ))
            })
    }
}

impl From<Likert> for u8 {
    fn from(value: Likert) -> Self {
        value.value()
    }
}

/// How concerning a result band is, from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Thriving,
    Steady,
    Strained,
    Urgent,
}

/// Closed integer interval of total scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: u32,
    pub max: u32,
}

impl ScoreRange {
    pub fn contains(&self, score: u32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

/// A labelled sub-range of total scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultBand {
    pub id: String,
    pub label: String,
    pub message: String,
    pub severity: Severity,
    pub range: ScoreRange,
    /// Shown prominently alongside the message, when present.
    pub crisis_notice: Option<String>,
}

/// Range of totals a session of `sample_size` questions can produce.
pub fn score_bounds(sample_size: usize) -> ScoreRange {
    let k = sample_size as u32;
    ScoreRange {
        min: k * u32::from(LIKERT_MIN),
        max: k * u32::from(LIKERT_MAX),
    }
}

/// Draw `sample_size` distinct questions from `bank` and order them for display.
///
/// The subset comes from a partial Fisher–Yates pass over the bank indices;
/// the presentation order is a second, independent shuffle of that subset.
pub fn sample_questions<R: Rng + ?Sized>(
    bank: &[Question],
    sample_size: usize,
    rng: &mut R,
) -> Result<Vec<SampledQuestion>, AssessmentError> {
    if sample_size == 0 || sample_size > bank.len() {
        return Err(AssessmentError::Configuration(format!(
            "sample size {sample_size} must be between 1 and the bank size {}",
            bank.len()
        )));
    }

    let mut indices: Vec<usize> = (0..bank.len()).collect();
    let (chosen, _) = indices.partial_shuffle(rng, sample_size);
    let mut chosen = chosen.to_vec();
    chosen.shuffle(rng);

    Ok(chosen
        .into_iter()
        .enumerate()
        .map(|(display_index, bank_index)| SampledQuestion {
            display_index,
            bank_index,
            text: bank[bank_index].text.clone(),
        })
        .collect())
}

/// Total score for a session.
///
/// Questions with no response count as [`Likert::StronglyDisagree`] before
/// any reversal is applied.
pub fn score_responses(
    bank: &[Question],
    questions: &[SampledQuestion],
    responses: &BTreeMap<usize, Likert>,
) -> u32 {
    questions
        .iter()
        .map(|q| {
            let value = responses
                .get(&q.display_index)
                .copied()
                .unwrap_or(Likert::StronglyDisagree)
                .value();
            let reverse = bank.get(q.bank_index).is_some_and(|b| b.reverse_scored);
            let contribution = if reverse {
                LIKERT_MIN + LIKERT_MAX - value
            } else {
                value
            };
            u32::from(contribution)
        })
        .sum()
}

/// The first band whose interval contains `score`.
pub fn classify(bands: &[ResultBand], score: u32) -> Option<&ResultBand> {
    bands.iter().find(|b| b.range.contains(score))
}

/// Check that `bands` partition the score range of `sample_size` questions:
/// ascending, contiguous, no overlaps, covering both ends.
pub fn validate_bands(bands: &[ResultBand], sample_size: usize) -> Result<(), AssessmentError> {
    let bounds = score_bounds(sample_size);
    let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
        return Err(AssessmentError::Configuration(
            "at least one result band is required".to_string(),
        ));
    };

    if first.range.min != bounds.min || last.range.max != bounds.max {
        return Err(AssessmentError::Configuration(format!(
            "bands cover [{}, {}] but scores span [{}, {}]",
            first.range.min, last.range.max, bounds.min, bounds.max
        )));
    }

    for band in bands {
        if band.range.min > band.range.max {
            return Err(AssessmentError::Configuration(format!(
                "band '{}' has an empty range [{}, {}]",
                band.id, band.range.min, band.range.max
            )));
        }
    }

    for pair in bands.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if upper.range.min != lower.range.max + 1 {
            return Err(AssessmentError::Configuration(format!(
                "band '{}' ends at {} but '{}' starts at {}",
                lower.id, lower.range.max, upper.id, upper.range.min
            )));
        }
    }

    Ok(())
}
