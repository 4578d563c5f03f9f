//! Deck package writer.
//!
//! Packages are Anki `.apkg` files built with `genanki-rs`: the notes go into
//! the bundled collection and every clip is attached as media. The package is
//! written next to its destination and renamed into place once complete.

use dictation_core::{DeckPackage, DeckWriter, NoteModel, PackageWriteError};
use genanki_rs::{Deck, Field, Model, Note, Package, Template};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Positive id derived from a name, stable across runs.
pub fn stable_id(name: &str) -> i64 {
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(bytes) >> 1) as i64
}

/// [`DeckWriter`] producing Anki packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnkiDeckWriter;

impl DeckWriter for AnkiDeckWriter {
    fn write(&self, package: &DeckPackage, output: &Path) -> Result<(), PackageWriteError> {
        for path in &package.media {
            std::fs::metadata(path).map_err(|source| PackageWriteError::Io {
                path: path.clone(),
                source,
            })?;
        }

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir).map_err(|source| PackageWriteError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        write_apkg(package, tmp.path())?;

        tmp.persist(output).map_err(|e| PackageWriteError::Io {
            path: output.to_path_buf(),
            source: e.error,
        })?;

        tracing::info!(
            output = %output.display(),
            notes = package.notes.len(),
            media = package.media.len(),
            "wrote deck package"
        );
        Ok(())
    }
}

fn anki_model(model: &NoteModel) -> Model {
    let fields = model.fields.iter().map(|name| Field::new(name)).collect();
    let templates = model
        .templates
        .iter()
        .map(|t| Template::new(&t.name).qfmt(&t.front).afmt(&t.back))
        .collect();

    Model::new(stable_id(&model.name), &model.name, fields, templates).css(&model.css)
}

fn write_apkg(package: &DeckPackage, path: &Path) -> Result<(), PackageWriteError> {
    let model = anki_model(&package.model);
    let mut deck = Deck::new(package.deck_id, &package.deck_name, "");

    for note in &package.notes {
        let fields: Vec<&str> = note.fields.iter().map(String::as_str).collect();
        let note = Note::new(model.clone(), fields).map_err(package_error)?;
        deck.add_note(note);
    }

    let media = package
        .media
        .iter()
        .map(|p| utf8_path(p))
        .collect::<Result<Vec<_>, _>>()?;

    let mut apkg = Package::new(vec![deck], media).map_err(package_error)?;
    apkg.write_to_file(utf8_path(path)?).map_err(package_error)?;
    Ok(())
}

fn utf8_path(path: &Path) -> Result<&str, PackageWriteError> {
    path.to_str().ok_or_else(|| PackageWriteError::Io {
        path: PathBuf::from(path),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path is not valid UTF-8"),
    })
}

fn package_error(e: impl std::fmt::Display) -> PackageWriteError {
    PackageWriteError::Archive(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dictation_core::FieldNaming;

    #[test]
    fn test_stable_id_is_deterministic_and_positive() {
        assert_eq!(stable_id("NPR"), stable_id("NPR"));
        assert_ne!(stable_id("NPR"), stable_id("BBC"));
        assert!(stable_id("NPR") >= 0);
    }

    #[test]
    fn test_note_with_wrong_field_count_is_package_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut package = DeckPackage::new(1, "NPR", crate::templates::note_model(FieldNaming::Standard));
        package.notes.push(dictation_core::Note {
            card_id: "c1".to_string(),
            fields: vec!["only one".to_string()],
        });

        let output = dir.path().join("deck.apkg");
        let err = AnkiDeckWriter.write(&package, &output).unwrap_err();
        assert!(matches!(err, PackageWriteError::Archive(_)));
        assert!(!output.exists());
    }
}
