//! Interactive input form.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the form provides the "run `quake` and answer two questions" UX
//!
//! Each field re-prompts until it gets a valid value; an empty answer takes
//! the default and `q` cancels.

use std::io::{self, BufRead, Write};

use crate::domain::FilterCriteria;
use crate::error::AppError;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;
pub const DEFAULT_MIN_MAGNITUDE: f64 = 0.0;

/// Prompt on stdin/stdout for the lookback window and minimum magnitude.
pub fn prompt_for_criteria() -> Result<FilterCriteria, AppError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    prompt_for_criteria_with(&mut input, &mut output)
}

/// Same as [`prompt_for_criteria`] with explicit streams.
pub fn prompt_for_criteria_with(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<FilterCriteria, AppError> {
    let days = prompt_field(
        input,
        output,
        &format!("How many past days of earthquakes? [{DEFAULT_LOOKBACK_DAYS}]: "),
        parse_lookback_days,
    )?;
    let min_mw = prompt_field(
        input,
        output,
        &format!("Minimum Mw: [{DEFAULT_MIN_MAGNITUDE}]: "),
        parse_min_magnitude,
    )?;

    FilterCriteria::new(days, min_mw).map_err(AppError::from)
}

fn prompt_field<T>(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
    parse: fn(&str) -> Result<T, String>,
) -> Result<T, AppError> {
    loop {
        write!(output, "{prompt}")
            .and_then(|_| output.flush())
            .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Use `quake map -d <days> -m <mw>` for non-interactive runs.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        match parse(line) {
            Ok(value) => return Ok(value),
            Err(msg) => {
                writeln!(output, "{msg}")
                    .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;
            }
        }
    }
}

/// Parse the lookback answer; empty means the default.
pub fn parse_lookback_days(raw: &str) -> Result<u32, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_LOOKBACK_DAYS);
    }
    match raw.parse::<u32>() {
        Ok(0) => Err("Days must be at least 1.".to_string()),
        Ok(days) => Ok(days),
        Err(_) => Err(format!("Invalid number of days: '{raw}'. Enter a whole number, e.g. 7.")),
    }
}

/// Parse the minimum magnitude answer; empty means the default.
///
/// A decimal comma (`2,5`) is accepted as typed on Turkish keyboards.
pub fn parse_min_magnitude(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_MIN_MAGNITUDE);
    }
    let normalized = raw.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("Invalid magnitude: '{raw}'. Enter a number, e.g. 2.5.")),
    }
}
