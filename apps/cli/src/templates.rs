//! Card templates and stylesheet bundled into every deck.
//!
//! Each face is its markup followed by one inline script: the shared card
//! helpers, then the face's own handler. The front grades input and hands
//! its mistakes to the back through `sessionStorage`.

use dictation_core::{FieldNaming, NoteModel};

pub const MODEL_NAME: &str = "Dictation";

const FRONT_MARKUP: &str = include_str!("../assets/front.html");
const BACK_MARKUP: &str = include_str!("../assets/back.html");
const STYLESHEET: &str = include_str!("../assets/style.css");

const CARD_SCRIPT: &str = include_str!("../assets/card.js");
const FRONT_SCRIPT: &str = include_str!("../assets/front.js");
const BACK_SCRIPT: &str = include_str!("../assets/back.js");

fn face(markup: &str, script: &str) -> String {
    format!("{markup}\n<script>\n{CARD_SCRIPT}\n{script}</script>\n")
}

pub fn note_model(naming: FieldNaming) -> NoteModel {
    NoteModel::new(
        MODEL_NAME,
        naming,
        &face(FRONT_MARKUP, FRONT_SCRIPT),
        &face(BACK_MARKUP, BACK_SCRIPT),
        STYLESHEET,
    )
}
