//! Deck build pipeline: parse, decode, plan, clip, package.

use crate::config::{DeckConfig, Settings};
use crate::error::{BuildError, Result};
use crate::services::package::stable_id;
use dictation_core::{
    clip_filename, parse_file, plan_segments, AudioClipper, DeckPackage, DeckWriter, Note, NoteModel,
};
use std::path::{Path, PathBuf};

/// Characters of line text shown in progress logs.
const PREVIEW_CHARS: usize = 40;

/// Outcome of one successful configuration build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub config: String,
    pub output: PathBuf,
    pub notes: usize,
    /// Lines dropped by the planner for a zero or negative span.
    pub rejected: usize,
    /// Malformed SRT blocks skipped by the parser.
    pub skipped_blocks: usize,
}

/// Build one configuration's deck. Segments are clipped in subtitle order.
pub fn build_deck<C, W>(
    settings: &Settings,
    deck: &DeckConfig,
    model: &NoteModel,
    clipper: &C,
    writer: &W,
) -> Result<BuildReport>
where
    C: AudioClipper,
    W: DeckWriter,
{
    let span = tracing::info_span!("build", config = %deck.name);
    let _guard = span.enter();

    require_file("audio", &deck.audio)?;
    require_file("subtitle", &deck.subtitles)?;

    tracing::info!(path = %deck.subtitles.display(), "parsing subtitles");
    let parsed = parse_file(&deck.subtitles)?;

    tracing::info!(path = %deck.audio.display(), "decoding audio");
    let track = clipper.decode(&deck.audio)?;
    let total_ms = clipper.duration_ms(&track);

    let plan = plan_segments(&parsed.lines, total_ms);
    if plan.segments.is_empty() {
        return Err(BuildError::NoSegments {
            path: deck.subtitles.clone(),
        });
    }

    let media_dir = settings.media_dir(deck);
    std::fs::create_dir_all(&media_dir).map_err(|source| BuildError::MediaDir {
        path: media_dir.clone(),
        source,
    })?;

    tracing::info!(
        segments = plan.segments.len(),
        media_dir = %media_dir.display(),
        "slicing audio"
    );
    let mut package = DeckPackage::new(stable_id(&deck.deck_name), deck.deck_name.as_str(), model.clone());

    for segment in &plan.segments {
        let filename = clip_filename(&deck.name, segment, &settings.audio_format);
        let clip_path = media_dir.join(&filename);

        let clip = clipper.slice(&track, segment.start_ms, segment.end_ms);
        clipper.encode(&clip, &clip_path, &settings.audio_format)?;

        package.push(Note::from_segment(segment, &filename), clip_path);
        tracing::info!("Processed line {}: {}...", segment.index, preview(&segment.text));
    }

    tracing::info!(output = %deck.output.display(), "writing package");
    writer.write(&package, &deck.output)?;

    Ok(BuildReport {
        config: deck.name.clone(),
        output: deck.output.clone(),
        notes: package.notes.len(),
        rejected: plan.rejected.len(),
        skipped_blocks: parsed.skipped,
    })
}

fn require_file(kind: &'static str, path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(BuildError::MissingInput {
            kind,
            path: path.to_path_buf(),
        })
    }
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_by_chars() {
        let text = "é".repeat(50);
        assert_eq!(preview(&text).chars().count(), PREVIEW_CHARS);
        assert_eq!(preview("short"), "short");
    }
}
