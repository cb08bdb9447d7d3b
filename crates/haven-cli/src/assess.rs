//! Terminal driver for one assessment session.

use std::io::{BufRead, Write};

use haven_instruments::error::AssessmentError;
use haven_instruments::scoring::Likert;
use haven_instruments::{AssessmentEngine, AssessmentResult};
use rand::Rng;

/// Ask every sampled question on `output`, read answers from `input`, then
/// print and return the result.
///
/// A blank line skips a question, `b` goes back one question, and end of
/// input submits whatever has been answered so far.
pub fn run_assessment<R: Rng>(
    engine: &mut AssessmentEngine<R>,
    mut input: impl BufRead,
    mut output: impl Write,
) -> eyre::Result<AssessmentResult> {
    let total = engine.start_session()?.len();

    writeln!(output, "{}", engine.instrument().name())?;
    let legend: Vec<_> = Likert::ALL
        .iter()
        .map(|l| format!("{} = {}", l.value(), l.label()))
        .collect();
    writeln!(output, "{}", legend.join(", "))?;
    writeln!(output, "Leave blank to skip, 'b' to go back.\n")?;

    let mut pos = 0;
    let mut line = String::new();
    while pos < total {
        let question = &engine.questions()[pos];
        let current = engine
            .response(pos)
            .map(|l| format!(" [{}]", l.value()))
            .unwrap_or_default();
        write!(output, "{}/{total} {}{current}\n> ", pos + 1, question.text)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        match line.trim() {
            "" => pos += 1,
            "b" | "B" => pos = pos.saturating_sub(1),
            answer => match answer.parse::<u8>() {
                Ok(value) => match engine.record_response(pos, value) {
                    Ok(()) => pos += 1,
                    Err(AssessmentError::InvalidResponse(msg)) => writeln!(output, "{msg}")?,
                    Err(e) => return Err(e.into()),
                },
                Err(_) => writeln!(output, "Please enter a number from 1 to 5.")?,
            },
        }
    }

    let result = engine.result()?;
    render_result(&result, &mut output)?;
    Ok(result)
}

pub fn render_result(result: &AssessmentResult, mut output: impl Write) -> eyre::Result<()> {
    writeln!(output)?;
    writeln!(output, "{}", result.band.label)?;
    writeln!(output, "Score: {}/{}", result.score, result.max_score)?;
    writeln!(output)?;
    writeln!(output, "{}", result.band.message)?;

    if result.unanswered > 0 {
        writeln!(
            output,
            "\nNote: {} of {} questions were left unanswered and scored as \"{}\".",
            result.unanswered,
            result.answered + result.unanswered,
            Likert::StronglyDisagree.label()
        )?;
    }

    if let Some(notice) = &result.band.crisis_notice {
        writeln!(output, "\n{notice}")?;
    }
    Ok(())
}
