/*!
 * SRT timestamp codec.
 *
 * Converts `HH:MM:SS,mmm` strings to fractional seconds and back, and splits
 * a `start --> end` range line into its two halves.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

/// Separator between the start and end timestamp of a range line
pub const RANGE_SEPARATOR: &str = " --> ";

// @const: Timestamp regex, digit counts are not enforced
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d+):(\d+),(\d+)$").unwrap()
});

/// Decode a `HH:MM:SS,mmm` timestamp to seconds.
///
/// The millisecond field is read as an integer count of milliseconds, so
/// `00:00:01,5` is 1.005 seconds.
pub fn to_seconds(timestamp: &str) -> Result<f64, SubtitleError> {
    let trimmed = timestamp.trim();
    let caps = TIMESTAMP_REGEX
        .captures(trimmed)
        .ok_or_else(|| SubtitleError::MalformedTimestamp(timestamp.to_string()))?;

    let field = |i: usize| -> Result<f64, SubtitleError> {
        caps[i]
            .parse::<u64>()
            .map(|v| v as f64)
            .map_err(|_| SubtitleError::MalformedTimestamp(timestamp.to_string()))
    };

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let millis = field(4)?;

    Ok(hours * 3600.0 + minutes * 60.0 + seconds + millis / 1000.0)
}

/// Encode seconds as `HH:MM:SS,mmm`, rounded to the nearest millisecond.
pub fn from_seconds(seconds: f64) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Split a range line at the first `" --> "`.
pub fn split_range(range_line: &str) -> Result<(&str, &str), SubtitleError> {
    range_line
        .split_once(RANGE_SEPARATOR)
        .map(|(start, end)| (start.trim(), end.trim()))
        .ok_or_else(|| SubtitleError::MalformedTimestamp(range_line.to_string()))
}

/// Decode both halves of a range line to seconds.
pub fn range_to_seconds(range_line: &str) -> Result<(f64, f64), SubtitleError> {
    let (start, end) = split_range(range_line)?;
    Ok((to_seconds(start)?, to_seconds(end)?))
}

/// Render a range line from its two timestamps
pub fn format_range(start: &str, end: &str) -> String {
    format!("{}{}{}", start, RANGE_SEPARATOR, end)
}
