//! Test fixtures and factory functions for creating test data.

use std::path::{Path, PathBuf};

use sub2deck::config::{DeckConfig, Settings};

/// Three timed LRC lines, the first with a translation.
pub const SAMPLE_LRC: &str = "[ti:Sample]\n\
[00:01.00]The quick fox jumps.\n\
敏捷的狐狸跳了。\n\
[00:04.50]Hello world\n\
[02:00.00]Last line\n";

/// Two SRT records, one malformed block in between.
pub const SAMPLE_SRT: &str = "1\n\
00:00:01,000 --> 00:00:02,500\n\
First line\n\
第一行\n\
\n\
2\n\
00:00:03,000 -> broken\n\
Skipped\n\
\n\
3\n\
00:00:04,000 --> 00:00:05,000\n\
Second line\n";

/// Write `content` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture file");
    path
}

/// A deck configuration whose inputs live in `dir`.
pub fn deck_config(dir: &Path, name: &str, subtitles: &str) -> DeckConfig {
    DeckConfig {
        name: name.to_string(),
        audio: dir.join(format!("{name}.m4a")),
        subtitles: dir.join(subtitles),
        deck_name: name.to_uppercase(),
        output: dir.join(format!("{name}_deck.apkg")),
    }
}

/// Settings writing media under `dir`.
pub fn settings(dir: &Path, decks: Vec<DeckConfig>) -> Settings {
    let content = format!("media_root = {:?}\n", dir.display().to_string());
    let mut settings = Settings::from_toml(&content, Path::new("")).expect("valid settings");
    settings.decks = decks;
    settings
}
