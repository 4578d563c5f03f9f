//! Deck configurations loaded from a TOML file.
//!
//! Relative paths inside the file are resolved against the directory that
//! contains it.

use crate::error::{BuildError, Result};
use dictation_core::FieldNaming;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Target name that selects every configuration.
pub const ALL_TARGET: &str = "all";

pub const DEFAULT_CONFIG_PATH: &str = "decks.toml";

/// One audio + subtitle pair and where its deck goes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeckConfig {
    pub name: String,
    pub audio: PathBuf,
    pub subtitles: PathBuf,
    pub deck_name: String,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Directory under which the `media_<config>` clip directories are created.
    #[serde(default = "default_media_root")]
    pub media_root: PathBuf,

    /// Clip container and file extension.
    #[serde(default = "default_audio_format")]
    pub audio_format: String,

    #[serde(default)]
    pub field_naming: FieldNaming,

    #[serde(default, rename = "deck")]
    pub decks: Vec<DeckConfig>,
}

fn default_media_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_audio_format() -> String {
    "mp3".to_string()
}

impl Settings {
    /// Read and validate the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BuildError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml(&content, base)
    }

    /// Parse configuration text, resolving relative paths against `base`.
    pub fn from_toml(content: &str, base: &Path) -> Result<Self> {
        let mut settings: Settings =
            toml::from_str(content).map_err(|e| BuildError::Config(e.to_string()))?;
        settings.validate()?;
        settings.resolve_paths(base);
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.audio_format.trim().is_empty() {
            return Err(BuildError::Config("audio_format must not be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for deck in &self.decks {
            if deck.name.trim().is_empty() {
                return Err(BuildError::Config("configuration name must not be empty".to_string()));
            }
            if deck.name == ALL_TARGET {
                return Err(BuildError::Config(format!(
                    "configuration name {ALL_TARGET:?} is reserved"
                )));
            }
            if !seen.insert(deck.name.as_str()) {
                return Err(BuildError::Config(format!(
                    "duplicate configuration name: {}",
                    deck.name
                )));
            }
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        resolve(&mut self.media_root);
        for deck in &mut self.decks {
            resolve(&mut deck.audio);
            resolve(&mut deck.subtitles);
            resolve(&mut deck.output);
        }
    }

    /// Configurations selected by a CLI target: one by name, or all of them.
    pub fn select(&self, target: &str) -> Result<Vec<&DeckConfig>> {
        if target == ALL_TARGET {
            return Ok(self.decks.iter().collect());
        }

        self.decks
            .iter()
            .find(|deck| deck.name == target)
            .map(|deck| vec![deck])
            .ok_or_else(|| BuildError::UnknownConfig(target.to_string()))
    }

    /// Directory the clips of one configuration are written to.
    pub fn media_dir(&self, deck: &DeckConfig) -> PathBuf {
        self.media_root.join(format!("media_{}", deck.name))
    }
}
