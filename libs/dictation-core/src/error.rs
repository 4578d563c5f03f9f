//! Error types for dictation-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while reading or parsing a subtitle file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read subtitle file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode subtitle file {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("malformed input at line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("unsupported subtitle format: {extension:?}")]
    UnsupportedFormat { extension: String },
}

impl ParseError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason: reason.into(),
        }
    }

    /// Attach a source line number to a format error.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Self::Format { reason, .. } => Self::Format { line, reason },
            other => other,
        }
    }
}

/// Errors raised by an audio-clipper implementation.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("cannot decode audio {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("cannot encode clip {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("required tool not found in PATH: {tool}")]
    ToolMissing { tool: String },
}

/// Errors raised by a deck-writer implementation.
#[derive(Debug, Error)]
pub enum PackageWriteError {
    #[error("cannot write package {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("deck package error: {0}")]
    Archive(String),
}

/// Errors raised while handing grading state from the front to the back face.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("cannot serialize hand-off state for card {card_id}: {source}")]
    Serialize {
        card_id: String,
        #[source]
        source: serde_json::Error,
    },
}
