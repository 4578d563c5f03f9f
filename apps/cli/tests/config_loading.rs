//! Configuration file loading tests.

mod common;

use common::fixtures::write_file;
use pretty_assertions::assert_eq;
use sub2deck::config::Settings;
use sub2deck::error::BuildError;

#[test]
fn test_load_resolves_paths_against_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "decks.toml",
        r#"
media_root = "out"
audio_format = "m4a"

[[deck]]
name = "npr"
audio = "npr/episode.m4a"
subtitles = "npr/episode.lrc"
deck_name = "NPR"
output = "npr_deck.apkg"
"#,
    );

    let settings = Settings::load(&path).unwrap();
    let deck = settings.select("npr").unwrap()[0];

    assert_eq!(settings.audio_format, "m4a");
    assert_eq!(deck.audio, dir.path().join("npr/episode.m4a"));
    assert_eq!(deck.output, dir.path().join("npr_deck.apkg"));
    assert_eq!(settings.media_dir(deck), dir.path().join("out").join("media_npr"));
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, BuildError::Config(_)));
}

#[test]
fn test_invalid_toml_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "decks.toml", "[[deck]\nname = ");
    assert!(matches!(Settings::load(&path), Err(BuildError::Config(_))));
}
