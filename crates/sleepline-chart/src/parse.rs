//! Raw input parsing: sample digit strings and sleep-start timestamps.
//!
//! Raw nights arrive as one decimal digit per elapsed minute
//! (`"4421103..."`). Parsing fails fast on the first character that is
//! not a known stage code; nothing is coerced.

use chrono::NaiveDateTime;

use crate::types::{ChartError, StageCode};

/// Timestamp layouts accepted by [`parse_timestamp`], tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a per-minute stage digit string into typed samples.
///
/// ASCII whitespace is ignored so samples may be wrapped across lines.
/// The reported index counts samples, not bytes.
///
/// # Errors
///
/// Returns [`ChartError::InvalidSample`] for the first character that is
/// not a stage digit, or [`ChartError::EmptyInput`] when no samples remain
/// after skipping whitespace.
pub fn parse_samples(input: &str) -> Result<Vec<StageCode>, ChartError> {
    let samples = input
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .enumerate()
        .map(|(index, value)| {
            value
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .and_then(|d| StageCode::try_from(d).ok())
                .ok_or(ChartError::InvalidSample { index, value })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if samples.is_empty() {
        return Err(ChartError::EmptyInput);
    }
    Ok(samples)
}

/// Parse a local sleep-start timestamp such as `2021-04-03 15:55:00`.
///
/// Seconds are optional and a `T` separator is accepted.
///
/// # Errors
///
/// Returns [`ChartError::InvalidTimestamp`] when none of the accepted
/// layouts match.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, ChartError> {
    let trimmed = input.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            ChartError::InvalidTimestamp(format!(
                "{trimmed:?} does not match YYYY-MM-DD HH:MM[:SS]"
            ))
        })
}
