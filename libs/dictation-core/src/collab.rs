//! Seams to the two external collaborators of a deck build: the audio
//! clipper and the deck writer.

use crate::error::{AudioError, PackageWriteError};
use crate::note::{Note, NoteModel};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Decodes an audio file and cuts it into encoded clips.
pub trait AudioClipper {
    /// Decoded (or probed) source audio.
    type Track;
    /// A span of a track, ready to encode.
    type Clip;

    fn decode(&self, path: &Path) -> Result<Self::Track, AudioError>;

    fn duration_ms(&self, track: &Self::Track) -> u64;

    /// Select `[start_ms, end_ms)` of the track.
    fn slice(&self, track: &Self::Track, start_ms: u64, end_ms: u64) -> Self::Clip;

    /// Encode a clip to `path` in the given container format (`"mp3"`, ...).
    fn encode(&self, clip: &Self::Clip, path: &Path, format: &str) -> Result<(), AudioError>;
}

/// Everything a deck writer needs to produce one package.
#[derive(Debug, Clone, Serialize)]
pub struct DeckPackage {
    pub deck_id: i64,
    pub deck_name: String,
    pub model: NoteModel,
    pub notes: Vec<Note>,
    /// Media files to bundle, in note order.
    pub media: Vec<PathBuf>,
}

impl DeckPackage {
    pub fn new(deck_id: i64, deck_name: impl Into<String>, model: NoteModel) -> Self {
        Self {
            deck_id,
            deck_name: deck_name.into(),
            model,
            notes: Vec::new(),
            media: Vec::new(),
        }
    }

    /// Add a note together with the clip it references.
    pub fn push(&mut self, note: Note, clip: PathBuf) {
        self.notes.push(note);
        self.media.push(clip);
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Produces one distributable package file from a deck.
pub trait DeckWriter {
    /// Write the package to `output`. A failed write must not leave a
    /// partial file behind.
    fn write(&self, package: &DeckPackage, output: &Path) -> Result<(), PackageWriteError>;
}
