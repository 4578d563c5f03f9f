//! Review data for the back face: the sentence with mistaken words flagged
//! and the rows of the mistake table, both derived from the ledger.

use crate::ledger::MistakeLedger;
use crate::matching::{normalize_word, tokenize_reference};
use serde::Serialize;
use std::collections::HashSet;

/// One sentence word on the back face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedWord {
    pub text: String,
    /// Matches a ledger key under the grading comparison rule.
    pub flagged: bool,
}

/// One row of the review table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MistakeRow {
    pub target: String,
    /// Recorded attempts joined in recording order.
    pub attempts: String,
}

/// Split the sentence into words and flag those whose normalized form
/// matches the normalized form of any ledger key.
pub fn highlight_words(sentence: &str, ledger: &MistakeLedger) -> Vec<HighlightedWord> {
    let keys: HashSet<String> = ledger.iter().map(|e| normalize_word(&e.word)).collect();

    tokenize_reference(sentence)
        .into_iter()
        .map(|word| HighlightedWord {
            flagged: keys.contains(&normalize_word(&word)),
            text: word,
        })
        .collect()
}

pub fn mistake_rows(ledger: &MistakeLedger) -> Vec<MistakeRow> {
    ledger
        .iter()
        .map(|entry| MistakeRow {
            target: entry.word.clone(),
            attempts: entry.attempts.join(", "),
        })
        .collect()
}
