//! Conversion between subtitle timestamp text and integer milliseconds.
//!
//! SRT uses `HH:MM:SS,mmm`. LRC uses `MM:SS.ff` where the fraction width
//! decides the unit: one digit is tenths, two digits are hundredths and three
//! digits are already milliseconds.

use crate::error::{ParseError, Result};

/// Parse an SRT timestamp (`01:02:03,456`) into milliseconds.
///
/// The text is split on `:` and `,`. At least four groups must be present and
/// every group must be numeric; groups past the fourth are ignored.
pub fn parse_srt_timestamp(text: &str) -> Result<u64> {
    let groups: Vec<&str> = text.trim().split([':', ',']).collect();
    if groups.len() < 4 {
        return Err(ParseError::format(
            0,
            format!("expected HH:MM:SS,mmm, got {:?}", text),
        ));
    }

    let mut values = [0u64; 4];
    for (idx, group) in groups.iter().enumerate() {
        let value = parse_group(group)
            .ok_or_else(|| ParseError::format(0, format!("non-numeric group {:?} in {:?}", group, text)))?;
        if let Some(slot) = values.get_mut(idx) {
            *slot = value;
        }
    }

    let [hours, minutes, seconds, millis] = values;
    sum_ms(&[(hours, 3_600_000), (minutes, 60_000), (seconds, 1_000), (millis, 1)])
        .ok_or_else(|| ParseError::format(0, format!("timestamp {:?} out of range", text)))
}

/// Parse an LRC timestamp (`01:02.50`, `01:02.500` or `[01:02.50]`) into
/// milliseconds.
pub fn parse_lrc_timestamp(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);

    let malformed = || ParseError::format(0, format!("expected MM:SS.ff, got {:?}", text));

    let (minutes, rest) = inner.split_once(':').ok_or_else(malformed)?;
    let (seconds, fraction) = rest.split_once('.').ok_or_else(malformed)?;

    let minutes = parse_group(minutes).ok_or_else(malformed)?;
    let seconds = parse_group(seconds).ok_or_else(malformed)?;
    let fraction_ms = lrc_fraction_ms(fraction).ok_or_else(malformed)?;

    sum_ms(&[(minutes, 60_000), (seconds, 1_000), (fraction_ms, 1)]).ok_or_else(malformed)
}

/// Sum `value * unit` terms, `None` on overflow.
fn sum_ms(terms: &[(u64, u64)]) -> Option<u64> {
    terms
        .iter()
        .try_fold(0u64, |total, &(value, unit)| total.checked_add(value.checked_mul(unit)?))
}

/// Normalize an LRC fraction to milliseconds.
///
/// `"5"` is 500ms, `"50"` is 500ms and `"500"` is 500ms. Treating a two-digit
/// fraction as milliseconds would shift every timestamp by a factor of ten.
pub(crate) fn lrc_fraction_ms(fraction: &str) -> Option<u64> {
    let value = parse_group(fraction)?;
    match fraction.len() {
        1 => Some(value * 100),
        2 => Some(value * 10),
        3 => Some(value),
        _ => None,
    }
}

fn parse_group(group: &str) -> Option<u64> {
    if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    group.parse().ok()
}

/// Format milliseconds as an SRT timestamp.
pub fn format_srt_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1_000) % 60;
    let millis = ms % 1_000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}
