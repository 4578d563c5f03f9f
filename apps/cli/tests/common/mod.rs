//! Common test utilities for integration tests.
//!
//! Provides an in-memory audio clipper and a deck writer that records what
//! it was asked to write, so the build pipeline runs without ffmpeg.

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dictation_core::{AudioClipper, AudioError, DeckPackage, DeckWriter, PackageWriteError};

/// Fake track: only the source path and its duration.
#[derive(Debug, Clone)]
pub struct FakeTrack {
    pub path: PathBuf,
    pub duration_ms: u64,
}

/// Audio clipper that "decodes" any existing file to a fixed duration and
/// writes the clip span as text.
pub struct FakeClipper {
    pub duration_ms: u64,
    pub encoded: Mutex<Vec<PathBuf>>,
    /// Files whose decode fails.
    pub undecodable: Vec<PathBuf>,
}

impl FakeClipper {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            encoded: Mutex::new(Vec::new()),
            undecodable: Vec::new(),
        }
    }

    pub fn encoded(&self) -> Vec<PathBuf> {
        self.encoded.lock().unwrap().clone()
    }
}

impl AudioClipper for FakeClipper {
    type Track = FakeTrack;
    type Clip = (PathBuf, u64, u64);

    fn decode(&self, path: &Path) -> Result<FakeTrack, AudioError> {
        if self.undecodable.iter().any(|p| p == path) {
            return Err(AudioError::Decode {
                path: path.to_path_buf(),
                reason: "corrupt stream".to_string(),
            });
        }
        Ok(FakeTrack {
            path: path.to_path_buf(),
            duration_ms: self.duration_ms,
        })
    }

    fn duration_ms(&self, track: &FakeTrack) -> u64 {
        track.duration_ms
    }

    fn slice(&self, track: &FakeTrack, start_ms: u64, end_ms: u64) -> Self::Clip {
        (track.path.clone(), start_ms, end_ms)
    }

    fn encode(&self, clip: &Self::Clip, path: &Path, format: &str) -> Result<(), AudioError> {
        std::fs::write(path, format!("{} {}-{} {}", clip.0.display(), clip.1, clip.2, format)).map_err(
            |e| AudioError::Encode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        )?;
        self.encoded.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// Deck writer that keeps every package instead of writing it.
#[derive(Default)]
pub struct RecordingWriter {
    pub written: Mutex<Vec<(PathBuf, DeckPackage)>>,
}

impl RecordingWriter {
    pub fn packages(&self) -> Vec<(PathBuf, DeckPackage)> {
        self.written.lock().unwrap().clone()
    }
}

impl DeckWriter for RecordingWriter {
    fn write(&self, package: &DeckPackage, output: &Path) -> Result<(), PackageWriteError> {
        self.written
            .lock()
            .unwrap()
            .push((output.to_path_buf(), package.clone()));
        Ok(())
    }
}
