//! Note schema: the field values written for each segment and the model
//! (field names, templates, stylesheet) they are rendered with.

use crate::types::Segment;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field-name scheme of the note model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNaming {
    /// `Audio, AudioRaw, Sentence, Translation, UUID`
    #[default]
    Standard,
    /// `Audio, AudioRaw, Text_en, Text_cn, UUID`
    Legacy,
}

impl FieldNaming {
    pub fn sentence_field(self) -> &'static str {
        match self {
            Self::Standard => "Sentence",
            Self::Legacy => "Text_en",
        }
    }

    pub fn translation_field(self) -> &'static str {
        match self {
            Self::Standard => "Translation",
            Self::Legacy => "Text_cn",
        }
    }

    /// Field names in note order.
    pub fn field_names(self) -> [&'static str; 5] {
        ["Audio", "AudioRaw", self.sentence_field(), self.translation_field(), "UUID"]
    }
}

/// One card template, front and back markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub name: String,
    pub front: String,
    pub back: String,
}

/// Note type shared by every note in a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteModel {
    pub name: String,
    pub fields: Vec<String>,
    pub templates: Vec<CardTemplate>,
    pub css: String,
}

impl NoteModel {
    /// Build a model from template markup written against the standard
    /// field names; `{{Sentence}}` and `{{Translation}}` are rewritten to the
    /// chosen scheme.
    pub fn new(name: impl Into<String>, naming: FieldNaming, front: &str, back: &str, css: &str) -> Self {
        let rename = |markup: &str| {
            markup
                .replace("{{Sentence}}", &format!("{{{{{}}}}}", naming.sentence_field()))
                .replace("{{Translation}}", &format!("{{{{{}}}}}", naming.translation_field()))
        };

        Self {
            name: name.into(),
            fields: naming.field_names().iter().map(|f| f.to_string()).collect(),
            templates: vec![CardTemplate {
                name: "Card 1".to_string(),
                front: rename(front),
                back: rename(back),
            }],
            css: css.to_string(),
        }
    }
}

/// Field values of one note, in model field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub card_id: String,
    pub fields: Vec<String>,
}

impl Note {
    /// Note for a segment whose clip was written as `clip_filename`, with a
    /// fresh random card id.
    pub fn from_segment(segment: &Segment, clip_filename: &str) -> Self {
        Self::with_card_id(segment, clip_filename, Uuid::new_v4().to_string())
    }

    pub fn with_card_id(segment: &Segment, clip_filename: &str, card_id: String) -> Self {
        let fields = vec![
            format!("[sound:{clip_filename}]"),
            clip_filename.to_string(),
            segment.text.clone(),
            segment.translation.clone().unwrap_or_default(),
            card_id.clone(),
        ];
        Self { card_id, fields }
    }

    pub fn sentence(&self) -> &str {
        &self.fields[2]
    }

    pub fn translation(&self) -> &str {
        &self.fields[3]
    }
}
