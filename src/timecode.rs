/*!
 * WebVTT timestamp codec.
 *
 * Converts between `HH:MM:SS.mmm` / `MM:SS.mmm` text and integer milliseconds.
 */

use crate::errors::SubtitleError;

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Parse a WebVTT timestamp into milliseconds.
///
/// Accepts `HH:MM:SS.mmm` and `MM:SS.mmm`. The fractional part is read as a
/// decimal fraction of a second: missing means zero, shorter than three digits
/// is right-padded (`.5` is 500ms), longer is truncated to milliseconds.
pub fn parse_timestamp(text: &str) -> Result<u64, SubtitleError> {
    let malformed = || SubtitleError::MalformedTimestamp(text.to_string());
    let trimmed = text.trim();

    let (clock, fraction) = match trimmed.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (trimmed, None),
    };

    let fields = clock
        .split(':')
        .map(parse_digits)
        .collect::<Option<Vec<u64>>>()
        .ok_or_else(malformed)?;

    let (hours, minutes, seconds) = match fields.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => (0, *m, *s),
        _ => return Err(malformed()),
    };

    let millis = match fraction {
        Some(fraction) => parse_fraction_ms(fraction).ok_or_else(malformed)?,
        None => 0,
    };

    hours
        .checked_mul(MS_PER_HOUR)
        .zip(minutes.checked_mul(MS_PER_MINUTE))
        .zip(seconds.checked_mul(MS_PER_SECOND))
        .and_then(|((h, m), s)| h.checked_add(m)?.checked_add(s)?.checked_add(millis))
        .ok_or_else(malformed)
}

/// Format milliseconds as `HH:MM:SS.mmm`. Negative input is clamped to zero.
pub fn format_timestamp(ms: i64) -> String {
    format_timestamp_ms(ms.max(0) as u64)
}

/// Format non-negative milliseconds as `HH:MM:SS.mmm`.
pub fn format_timestamp_ms(ms: u64) -> String {
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Add a signed offset to a timestamp, clamping at zero.
pub fn offset_ms(ms: u64, offset: i64) -> u64 {
    let shifted = i128::from(ms) + i128::from(offset);
    shifted.clamp(0, i128::from(u64::MAX)) as u64
}

// `str::parse::<u64>` accepts a leading '+', which is not a valid field
fn parse_digits(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_fraction_ms(fraction: &str) -> Option<u64> {
    if fraction.is_empty() {
        return Some(0);
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut millis = 0;
    for (i, digit) in fraction.bytes().chain(std::iter::repeat(b'0')).take(3).enumerate() {
        millis += u64::from(digit - b'0') * 10u64.pow(2 - i as u32);
    }
    Some(millis)
}
