use crate::config::BreathingConfig;
use std::io::{self, BufRead, Write};

/// Ask for every phase duration, keeping the current value when the answer is empty.
///
/// Reaching the end of the input keeps the remaining durations untouched.
pub(crate) fn prompt_durations<R, W>(
    input: &mut R,
    output: &mut W,
    breathing: &mut BreathingConfig,
) -> Result<(), PromptError>
where
    R: BufRead,
    W: Write,
{
    let questions = [
        ("Inhale duration", &mut breathing.inhale, true),
        ("Hold after inhale", &mut breathing.post_inhale_hold, false),
        ("Exhale duration", &mut breathing.exhale, true),
        ("Hold after exhale", &mut breathing.post_exhale_hold, false),
    ];
    for (label, value, positive) in questions {
        if !ask(input, output, label, value, positive)? {
            break;
        }
    }
    Ok(())
}

// Returns false once the input is exhausted.
fn ask<R, W>(input: &mut R, output: &mut W, label: &str, value: &mut f64, positive: bool) -> Result<bool, PromptError>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{label} in seconds [{value}]: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(true);
        }
        match answer.parse::<f64>() {
            Ok(seconds) if seconds.is_finite() && (seconds > 0.0 || (!positive && seconds == 0.0)) => {
                *value = seconds;
                return Ok(true);
            }
            _ if positive => writeln!(output, "'{answer}' is not a positive number of seconds")?,
            _ => writeln!(output, "'{answer}' is not a number of seconds")?,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PromptError {
    #[error("prompt failed: {0}")]
    Io(#[from] io::Error),
}
