//! Segment planning: turns parsed subtitle lines into clip-ready segments.

use crate::types::{Segment, SubtitleLine};
use serde::Serialize;

/// Maximum number of characters of line text used in a clip filename.
const FILENAME_PREFIX_CHARS: usize = 20;

/// A line whose resolved span was empty or inverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedSpan {
    /// 1-based position of the line in the parsed input.
    pub line: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// Result of planning: segments in subtitle order plus rejected spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentPlan {
    pub segments: Vec<Segment>,
    pub rejected: Vec<RejectedSpan>,
}

/// Resolve open end-times against the audio duration, drop blank lines and
/// number the remaining segments from 1.
///
/// Lines whose resolved end does not come after their start are never
/// clamped; they are reported in [`SegmentPlan::rejected`].
pub fn plan_segments(lines: &[SubtitleLine], total_duration_ms: u64) -> SegmentPlan {
    let mut plan = SegmentPlan::default();

    for (idx, line) in lines.iter().enumerate() {
        let text = line.text.trim();
        if text.is_empty() {
            continue;
        }

        let end_ms = line.end_ms.unwrap_or(total_duration_ms);
        if end_ms <= line.start_ms {
            tracing::warn!(
                line = idx + 1,
                start_ms = line.start_ms,
                end_ms,
                "rejecting subtitle line with empty span"
            );
            plan.rejected.push(RejectedSpan {
                line: idx + 1,
                start_ms: line.start_ms,
                end_ms,
                text: text.to_string(),
            });
            continue;
        }

        plan.segments.push(Segment {
            index: plan.segments.len() + 1,
            start_ms: line.start_ms,
            end_ms,
            text: text.to_string(),
            translation: line.translation.clone(),
        });
    }

    plan
}

/// Keep alphanumerics, spaces, underscores and hyphens of a line, then cut
/// to the first characters of what is left.
pub fn sanitize_prefix(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .take(FILENAME_PREFIX_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Build the media filename for a segment: `{config}_{index:03}_{prefix}.{ext}`.
pub fn clip_filename(config_name: &str, segment: &Segment, extension: &str) -> String {
    format!(
        "{}_{:03}_{}.{}",
        config_name,
        segment.index,
        sanitize_prefix(&segment.text),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_lrc;
    use pretty_assertions::assert_eq;

    fn line(start_ms: u64, end_ms: Option<u64>, text: &str) -> SubtitleLine {
        SubtitleLine::new(start_ms, end_ms, text)
    }

    #[test]
    fn open_end_resolves_to_duration() {
        let input = "[00:10.00]One\n[01:00.00]Two\n[02:00.00]Three\n";
        let parsed = parse_lrc(input).unwrap();
        let plan = plan_segments(&parsed.lines, 135_000);
        let third = &plan.segments[2];
        assert_eq!((third.start_ms, third.end_ms), (120_000, 135_000));
    }

    #[test]
    fn segments_are_ordered_and_numbered_from_one() {
        let lines = vec![line(0, Some(1_000), "a"), line(1_000, Some(2_000), "b")];
        let plan = plan_segments(&lines, 5_000);
        let indices: Vec<_> = plan.segments.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(plan.segments[1].text, "b");
    }

    #[test]
    fn blank_lines_are_dropped() {
        let lines = vec![line(0, Some(1_000), "  "), line(1_000, Some(2_000), "kept")];
        let plan = plan_segments(&lines, 5_000);
        assert_eq!(plan.segments.len(), 1);
        assert_eq!(plan.segments[0].index, 1);
        assert!(plan.rejected.is_empty());
    }

    #[test]
    fn empty_and_inverted_spans_are_rejected() {
        let lines = vec![
            line(1_000, Some(1_000), "zero"),
            line(3_000, Some(2_000), "inverted"),
            line(4_000, None, "past the end"),
            line(0, Some(500), "fine"),
        ];
        let plan = plan_segments(&lines, 3_500);
        assert_eq!(plan.segments.len(), 1);
        assert_eq!(plan.segments[0].text, "fine");
        assert_eq!(plan.segments[0].index, 1);
        let rejected: Vec<_> = plan.rejected.iter().map(|r| r.line).collect();
        assert_eq!(rejected, vec![1, 2, 3]);
    }

    #[test]
    fn every_segment_has_positive_span() {
        let lines = vec![
            line(0, Some(10), "a"),
            line(10, Some(10), "b"),
            line(20, None, "c"),
        ];
        let plan = plan_segments(&lines, 25);
        assert!(plan.segments.iter().all(|s| s.start_ms < s.end_ms));
    }

    #[test]
    fn sanitize_filters_then_keeps_twenty_chars() {
        assert_eq!(sanitize_prefix("Hello, world! It's a fine day"), "Hello world Its a fi");
        assert_eq!(sanitize_prefix("snake_case - ok"), "snake_case - ok");
        assert_eq!(sanitize_prefix("Ça va? Très bien."), "Ça va Très bien");
    }

    #[test]
    fn clip_filename_layout() {
        let segment = Segment {
            index: 7,
            start_ms: 0,
            end_ms: 1,
            text: "The quick fox jumps.".to_string(),
            translation: None,
        };
        assert_eq!(clip_filename("npr", &segment, "mp3"), "npr_007_The quick fox jumps.mp3");
    }
}
