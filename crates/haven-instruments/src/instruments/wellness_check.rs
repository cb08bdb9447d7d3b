use crate::Instrument;
use crate::scoring::{Question, ResultBand, ScoreRange, Severity};

/// Mental Health Check-In: 20 statements, 10 asked per session, each rated
/// on a five-point agreement scale. Totals run 10–50. Higher = more distress.
pub struct WellnessCheck;

const SAMPLE_SIZE: usize = 10;

/// Statements in bank order, with whether each is reverse scored.
const STATEMENTS: [(&str, bool); 20] = [
    ("I often feel motivated to complete my daily tasks.", false),
    ("I find joy in the activities I used to enjoy.", true),
    ("I have trouble sleeping or oversleep frequently.", false),
    ("I feel anxious or worried more than usual.", false),
    ("I feel supported by people around me.", true),
    ("I often feel overwhelmed or hopeless.", false),
    ("I have difficulty concentrating on things.", false),
    ("I feel optimistic about my future.", false),
    ("I often feel tired even after resting.", true),
    ("I feel confident in my ability to handle problems.", true),
    ("I have been eating more or less than usual.", false),
    ("I feel emotionally numb or disconnected.", false),
    ("I enjoy spending time with friends and family.", true),
    ("I feel like I'm a burden to others.", false),
    ("I have thoughts of hurting myself.", false),
    ("I feel physically tense or restless.", false),
    ("I can manage my daily responsibilities well.", true),
    ("I feel like my life has meaning and purpose.", true),
    ("I often feel irritable or easily frustrated.", false),
    ("I feel hopeful about the future.", true),
];

impl Instrument for WellnessCheck {
    fn id(&self) -> &str {
        "wellness_check"
    }

    fn name(&self) -> &str {
        "Mental Health Check-In"
    }

    fn questions(&self) -> &[Question] {
        static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
            STATEMENTS
                .iter()
                .enumerate()
                .map(|(bank_index, (text, reverse_scored))| Question {
                    bank_index,
                    text: text.to_string(),
                    reverse_scored: *reverse_scored,
                })
                .collect()
        });
        &QUESTIONS
    }

    fn sample_size(&self) -> usize {
        SAMPLE_SIZE
    }

    fn bands(&self) -> &[ResultBand] {
        static BANDS: std::sync::LazyLock<Vec<ResultBand>> = std::sync::LazyLock::new(|| {
            vec![
                band(
                    "excellent",
                    "Excellent Mental Wellness",
                    "Your responses suggest you're experiencing excellent mental wellness. \
                     Keep up the great practices that support your well-being!",
                    Severity::Thriving,
                    10,
                    20,
                ),
                band(
                    "good",
                    "Good Mental Health",
                    "Your responses suggest you're maintaining good mental health. \
                     Consider continuing your current wellness practices and perhaps exploring new ones.",
                    Severity::Steady,
                    21,
                    30,
                ),
                band(
                    "mild_stress",
                    "Mild Stress Indicators",
                    "Your responses suggest you may be experiencing some stress. \
                     Consider relaxation techniques, journaling, or talking with someone you trust.",
                    Severity::Strained,
                    31,
                    40,
                ),
                ResultBand {
                    crisis_notice: Some(
                        "If you're having thoughts of self-harm, please contact a crisis \
                         helpline immediately or go to your nearest emergency room."
                            .to_string(),
                    ),
                    ..band(
                        "professional_support",
                        "Consider Professional Support",
                        "Your responses suggest you might benefit from professional support. \
                         Please consider reaching out to a mental health professional or crisis helpline.",
                        Severity::Urgent,
                        41,
                        50,
                    )
                },
            ]
        });
        &BANDS
    }
}

fn band(
    id: &str,
    label: &str,
    message: &str,
    severity: Severity,
    min: u32,
    max: u32,
) -> ResultBand {
    ResultBand {
        id: id.to_string(),
        label: label.to_string(),
        message: message.to_string(),
        severity,
        range: ScoreRange { min, max },
        crisis_notice: None,
    }
}
