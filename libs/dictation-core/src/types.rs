//! Core types shared by the subtitle pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Subtitle grammar, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtitleFormat {
    Srt,
    Lrc,
}

impl SubtitleFormat {
    /// Get the canonical extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Lrc => "lrc",
        }
    }

    /// Resolve a format from an extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "srt" => Some(Self::Srt),
            "lrc" => Some(Self::Lrc),
            _ => None,
        }
    }
}

/// One timed line as read from a subtitle file.
///
/// `end_ms` is `None` when the source does not say when the line ends (the
/// last line of an LRC file); the segment planner resolves it against the
/// audio duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleLine {
    pub start_ms: u64,
    pub end_ms: Option<u64>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl SubtitleLine {
    pub fn new(start_ms: u64, end_ms: Option<u64>, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
            translation: None,
        }
    }

    pub fn with_translation(mut self, translation: Option<String>) -> Self {
        self.translation = translation.filter(|t| !t.is_empty());
        self
    }
}

/// Output of a subtitle parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSubtitles {
    pub lines: Vec<SubtitleLine>,
    /// SRT blocks that did not match the record grammar and were dropped.
    pub skipped: usize,
    /// LRC ID tags such as `ti`, `ar` or `offset`.
    pub metadata: BTreeMap<String, String>,
}

impl ParsedSubtitles {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A resolved, non-empty audio span bound to one subtitle line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position, used in clip filenames.
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl Segment {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}
