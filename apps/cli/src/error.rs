//! Error handling for deck builds

use dictation_core::{AudioError, PackageWriteError, ParseError};
use std::path::PathBuf;
use thiserror::Error;

/// Deck build error types
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Unknown configuration: {0}")]
    UnknownConfig(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing {kind} file: {}", path.display())]
    MissingInput { kind: &'static str, path: PathBuf },

    #[error("Subtitle error: {0}")]
    Parse(#[from] ParseError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Package error: {0}")]
    Package(#[from] PackageWriteError),

    #[error("No usable subtitle lines in {}", path.display())]
    NoSegments { path: PathBuf },

    #[error("Cannot create media directory {}: {source}", path.display())]
    MediaDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for build operations
pub type Result<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_config() {
        let error = BuildError::UnknownConfig("bbc".to_string());
        assert_eq!(error.to_string(), "Unknown configuration: bbc");
    }

    #[test]
    fn test_error_display_config() {
        let error = BuildError::Config("duplicate configuration name: npr".to_string());
        assert_eq!(error.to_string(), "Configuration error: duplicate configuration name: npr");
    }

    #[test]
    fn test_error_display_missing_input() {
        let error = BuildError::MissingInput {
            kind: "audio",
            path: PathBuf::from("npr/episode.m4a"),
        };
        assert_eq!(error.to_string(), "Missing audio file: npr/episode.m4a");
    }

    #[test]
    fn test_error_display_parse() {
        let error = BuildError::from(ParseError::UnsupportedFormat {
            extension: "vtt".to_string(),
        });
        assert_eq!(error.to_string(), "Subtitle error: unsupported subtitle format: \"vtt\"");
    }

    #[test]
    fn test_error_display_audio() {
        let error = BuildError::from(AudioError::ToolMissing {
            tool: "ffprobe".to_string(),
        });
        assert_eq!(error.to_string(), "Audio error: required tool not found in PATH: ffprobe");
    }

    #[test]
    fn test_error_display_package() {
        let error = BuildError::from(PackageWriteError::Archive("bad header".to_string()));
        assert_eq!(error.to_string(), "Package error: deck package error: bad header");
    }

    #[test]
    fn test_error_display_no_segments() {
        let error = BuildError::NoSegments {
            path: PathBuf::from("empty.srt"),
        };
        assert_eq!(error.to_string(), "No usable subtitle lines in empty.srt");
    }
}
