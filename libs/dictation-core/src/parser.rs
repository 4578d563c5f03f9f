//! Subtitle parser for SRT and LRC files.
//!
//! # SRT
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:03,500
//! The quick fox jumps.
//! 敏捷的狐狸跳了起来。
//! ```
//! The first text line is the sentence, the second the translation, further
//! lines are ignored. Blocks that do not match are skipped and counted.
//!
//! # LRC
//! ```text
//! [ti:Morning News]
//! [00:01.00]The quick fox jumps.
//! 敏捷的狐狸跳了起来。
//! [00:04.50]Over the lazy dog.
//! ```
//! A bare line directly after a timed line is that line's translation. Each
//! line ends where the next timed line starts; the last one is left open.

use crate::error::{ParseError, Result};
use crate::timecode::{lrc_fraction_ms, parse_srt_timestamp};
use crate::types::{ParsedSubtitles, SubtitleFormat, SubtitleLine};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

static SRT_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+:\d{2}:\d{2},\d{3})\s*-->\s*(\d+:\d{2}:\d{2},\d{3})").expect("valid SRT timing regex")
});

static LRC_TIMED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d{2,3}):(\d{2})\.(\d{1,3})\](.*)$").expect("valid LRC timestamp regex")
});

static LRC_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([A-Za-z#]+):(.*)\]$").expect("valid LRC tag regex"));

impl SubtitleFormat {
    /// Resolve the grammar for a subtitle file from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(extension).ok_or_else(|| ParseError::UnsupportedFormat {
            extension: extension.to_string(),
        })
    }
}

/// Read and parse a subtitle file, dispatching on its extension.
pub fn parse_file(path: &Path) -> Result<ParsedSubtitles> {
    let format = SubtitleFormat::from_path(path)?;

    let bytes = fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|e| ParseError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let parsed = parse_str(content.trim_start_matches('\u{feff}'), format)?;
    tracing::info!(
        path = %path.display(),
        format = format.as_str(),
        records = parsed.lines.len(),
        skipped = parsed.skipped,
        "parsed subtitle file"
    );
    Ok(parsed)
}

/// Parse subtitle content with an explicit grammar.
pub fn parse_str(content: &str, format: SubtitleFormat) -> Result<ParsedSubtitles> {
    match format {
        SubtitleFormat::Srt => Ok(parse_srt(content)),
        SubtitleFormat::Lrc => parse_lrc(content),
    }
}

// ---------------------------------------------------------------------------
// SRT
// ---------------------------------------------------------------------------

/// Parse SRT content. Never fails; malformed blocks are counted in `skipped`.
pub fn parse_srt(content: &str) -> ParsedSubtitles {
    let mut parser = SrtParser::new();
    let mut block: Vec<&str> = Vec::new();
    let mut block_start = 1;

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        if line.trim().is_empty() {
            parser.process_block(&block, block_start);
            block.clear();
        } else {
            if block.is_empty() {
                block_start = line_num;
            }
            block.push(line);
        }
    }
    parser.process_block(&block, block_start);

    parser.finalize()
}

struct SrtRecordBuilder {
    start_ms: u64,
    end_ms: u64,
    text_lines: Vec<String>,
    start_line: usize,
}

impl SrtRecordBuilder {
    fn build(self) -> Option<SubtitleLine> {
        let mut text_lines = self
            .text_lines
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let text = text_lines.next()?;
        let translation = text_lines.next();
        Some(SubtitleLine::new(self.start_ms, Some(self.end_ms), text).with_translation(translation))
    }
}

struct SrtParser {
    current: Option<SrtRecordBuilder>,
    lines: Vec<SubtitleLine>,
    skipped: usize,
}

impl SrtParser {
    fn new() -> Self {
        Self {
            current: None,
            lines: Vec::new(),
            skipped: 0,
        }
    }

    fn process_block(&mut self, block: &[&str], start_line: usize) {
        let Some(first) = block.first() else {
            return;
        };

        if !is_srt_index(first) {
            // Text separated from its record by a blank line still belongs to it.
            match self.current {
                Some(ref mut record) => {
                    record.text_lines.extend(block.iter().map(|l| l.to_string()));
                }
                None => self.skip(start_line, "block does not start with a numeric index"),
            }
            return;
        }

        self.flush();

        let timing = match block.get(1) {
            Some(line) => line.trim(),
            None => {
                self.skip(start_line, "missing timing line");
                return;
            }
        };

        match parse_srt_timing(timing) {
            Ok((start_ms, end_ms)) => {
                self.current = Some(SrtRecordBuilder {
                    start_ms,
                    end_ms,
                    text_lines: block[2..].iter().map(|l| l.to_string()).collect(),
                    start_line,
                });
            }
            Err(e) => self.skip(start_line, &e.to_string()),
        }
    }

    fn flush(&mut self) {
        if let Some(record) = self.current.take() {
            let start_line = record.start_line;
            match record.build() {
                Some(line) => self.lines.push(line),
                None => self.skip(start_line, "record has no text"),
            }
        }
    }

    fn skip(&mut self, line: usize, reason: &str) {
        tracing::debug!(line, reason, "skipping SRT block");
        self.skipped += 1;
    }

    fn finalize(mut self) -> ParsedSubtitles {
        self.flush();
        ParsedSubtitles {
            lines: self.lines,
            skipped: self.skipped,
            metadata: BTreeMap::new(),
        }
    }
}

fn is_srt_index(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
}

fn parse_srt_timing(line: &str) -> Result<(u64, u64)> {
    let caps = SRT_TIMING
        .captures(line)
        .ok_or_else(|| ParseError::format(0, format!("not a timing line: {:?}", line)))?;
    let start_ms = parse_srt_timestamp(&caps[1])?;
    let end_ms = parse_srt_timestamp(&caps[2])?;
    Ok((start_ms, end_ms))
}

// ---------------------------------------------------------------------------
// LRC
// ---------------------------------------------------------------------------

/// Parse LRC content.
///
/// Fails with [`ParseError::Format`] when a line is neither a timed line, an
/// ID tag, nor a translation directly following a timed line.
pub fn parse_lrc(content: &str) -> Result<ParsedSubtitles> {
    let mut parser = LrcParser::new();

    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }

    Ok(parser.finalize())
}

struct TimedEntry {
    start_ms: u64,
    text: String,
    translation: Option<String>,
}

struct LrcParser {
    timed: Vec<TimedEntry>,
    metadata: BTreeMap<String, String>,
    awaiting_translation: bool,
}

impl LrcParser {
    fn new() -> Self {
        Self {
            timed: Vec::new(),
            metadata: BTreeMap::new(),
            awaiting_translation: false,
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line).map_err(|e| e.at_line(line_num))? {
            LrcLine::Timed { start_ms, text } => {
                self.timed.push(TimedEntry {
                    start_ms,
                    text: text.to_string(),
                    translation: None,
                });
                self.awaiting_translation = true;
            }
            LrcLine::Tag { key, value } => {
                self.metadata.insert(key.to_ascii_lowercase(), value.to_string());
                self.awaiting_translation = false;
            }
            LrcLine::Text(text) => self.handle_text(text, line_num)?,
            LrcLine::Empty => {}
        }
        Ok(())
    }

    fn parse_line(line: &str) -> Result<LrcLine<'_>> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Ok(LrcLine::Empty);
        }

        if let Some(caps) = LRC_TIMED.captures(trimmed) {
            let minutes: u64 = caps[1].parse().map_err(|_| bad_timestamp(trimmed))?;
            let seconds: u64 = caps[2].parse().map_err(|_| bad_timestamp(trimmed))?;
            let fraction = lrc_fraction_ms(&caps[3]).ok_or_else(|| bad_timestamp(trimmed))?;
            let text = caps.get(4).map_or("", |m| m.as_str()).trim();
            return Ok(LrcLine::Timed {
                start_ms: minutes * 60_000 + seconds * 1_000 + fraction,
                text,
            });
        }

        if trimmed.starts_with('[') && trimmed[1..].starts_with(|c: char| c.is_ascii_digit()) {
            return Err(bad_timestamp(trimmed));
        }

        if let Some(caps) = LRC_TAG.captures(trimmed) {
            let key = caps.get(1).map_or("", |m| m.as_str());
            let value = caps.get(2).map_or("", |m| m.as_str()).trim();
            return Ok(LrcLine::Tag { key, value });
        }

        Ok(LrcLine::Text(trimmed))
    }

    fn handle_text(&mut self, text: &str, line_num: usize) -> Result<()> {
        if !self.awaiting_translation {
            return Err(ParseError::format(
                line_num,
                format!("line is neither timestamped nor a translation: {:?}", text),
            ));
        }

        if let Some(entry) = self.timed.last_mut() {
            entry.translation = Some(text.to_string());
        }
        self.awaiting_translation = false;
        Ok(())
    }

    fn finalize(self) -> ParsedSubtitles {
        let next_starts: Vec<Option<u64>> = self
            .timed
            .iter()
            .skip(1)
            .map(|entry| Some(entry.start_ms))
            .chain(std::iter::once(None))
            .collect();

        let lines = self
            .timed
            .into_iter()
            .zip(next_starts)
            .filter(|(entry, _)| !entry.text.is_empty())
            .map(|(entry, end_ms)| {
                SubtitleLine::new(entry.start_ms, end_ms, entry.text).with_translation(entry.translation)
            })
            .collect();

        ParsedSubtitles {
            lines,
            skipped: 0,
            metadata: self.metadata,
        }
    }
}

enum LrcLine<'a> {
    Timed { start_ms: u64, text: &'a str },
    Tag { key: &'a str, value: &'a str },
    Text(&'a str),
    Empty,
}

fn bad_timestamp(line: &str) -> ParseError {
    ParseError::format(0, format!("malformed LRC timestamp: {:?}", line))
}
