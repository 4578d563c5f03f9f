//! Audio clipping through the ffmpeg command line tools.

use dictation_core::{AudioClipper, AudioError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Source audio as reported by ffprobe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedTrack {
    pub path: PathBuf,
    pub duration_ms: u64,
}

/// A span of a probed track. Nothing is cut until it is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipSpan {
    pub source: PathBuf,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// [`AudioClipper`] backed by `ffprobe` and `ffmpeg` found on `PATH`.
#[derive(Debug, Clone)]
pub struct FfmpegClipper {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegClipper {
    pub fn locate() -> Result<Self, AudioError> {
        Ok(Self {
            ffmpeg: find_tool("ffmpeg")?,
            ffprobe: find_tool("ffprobe")?,
        })
    }
}

fn find_tool(tool: &str) -> Result<PathBuf, AudioError> {
    which::which(tool).map_err(|_| AudioError::ToolMissing {
        tool: tool.to_string(),
    })
}

impl AudioClipper for FfmpegClipper {
    type Track = ProbedTrack;
    type Clip = ClipSpan;

    fn decode(&self, path: &Path) -> Result<ProbedTrack, AudioError> {
        let decode_error = |reason: String| AudioError::Decode {
            path: path.to_path_buf(),
            reason,
        };

        let output = Command::new(&self.ffprobe)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .map_err(|e| decode_error(e.to_string()))?;

        if !output.status.success() {
            return Err(decode_error(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let duration_ms = parse_probe_duration(&stdout)
            .ok_or_else(|| decode_error(format!("unreadable duration {:?}", stdout.trim())))?;

        tracing::debug!(path = %path.display(), duration_ms, "probed audio");
        Ok(ProbedTrack {
            path: path.to_path_buf(),
            duration_ms,
        })
    }

    fn duration_ms(&self, track: &ProbedTrack) -> u64 {
        track.duration_ms
    }

    fn slice(&self, track: &ProbedTrack, start_ms: u64, end_ms: u64) -> ClipSpan {
        ClipSpan {
            source: track.path.clone(),
            start_ms,
            end_ms,
        }
    }

    fn encode(&self, clip: &ClipSpan, path: &Path, format: &str) -> Result<(), AudioError> {
        let start = seconds(clip.start_ms);
        let length = seconds(clip.end_ms.saturating_sub(clip.start_ms));

        let output = Command::new(&self.ffmpeg)
            .args(["-y", "-v", "error", "-ss", start.as_str(), "-i"])
            .arg(&clip.source)
            .args(["-t", length.as_str(), "-vn", "-f", muxer(format)])
            .arg(path)
            .output()
            .map_err(|e| AudioError::Encode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(AudioError::Encode {
                path: path.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Parse ffprobe's `format=duration` output (seconds) into milliseconds.
pub fn parse_probe_duration(output: &str) -> Option<u64> {
    let seconds: f64 = output.trim().parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some((seconds * 1000.0).round() as u64)
}

fn seconds(ms: u64) -> String {
    format!("{}.{:03}", ms / 1000, ms % 1000)
}

/// ffmpeg muxer name for a clip extension.
fn muxer(format: &str) -> &str {
    match format {
        "m4a" | "aac" => "ipod",
        "oga" => "ogg",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_duration() {
        assert_eq!(parse_probe_duration("135.000000\n"), Some(135000));
        assert_eq!(parse_probe_duration("0.0126"), Some(13));
        assert_eq!(parse_probe_duration("N/A"), None);
        assert_eq!(parse_probe_duration("-1"), None);
    }

    #[test]
    fn test_seconds_formatting() {
        assert_eq!(seconds(62500), "62.500");
        assert_eq!(seconds(7), "0.007");
    }

    #[test]
    fn test_muxer_names() {
        assert_eq!(muxer("mp3"), "mp3");
        assert_eq!(muxer("m4a"), "ipod");
    }

    #[test]
    fn test_slice_keeps_span() {
        let clipper = FfmpegClipper {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        };
        let track = ProbedTrack {
            path: PathBuf::from("a.m4a"),
            duration_ms: 10_000,
        };
        let clip = clipper.slice(&track, 1_000, 2_500);
        assert_eq!(clip.source, PathBuf::from("a.m4a"));
        assert_eq!(clip.end_ms - clip.start_ms, 1_500);
        assert_eq!(clipper.duration_ms(&track), 10_000);
    }
}
