//! Word matching for dictation input.

use serde::{Deserialize, Serialize};

/// Trailing characters ignored when comparing a typed word to a reference word.
pub const SENTENCE_PUNCTUATION: [char; 5] = ['.', ',', '!', '?', '"'];

/// Verdict for one committed input word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordVerdict {
    Correct,
    Incorrect,
}

/// Live input split into committed words and the word still being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTokens<'a> {
    pub committed: Vec<&'a str>,
    /// Last token when the input does not end in whitespace.
    pub in_progress: Option<&'a str>,
}

/// Normalize a word for comparison: lowercase, then drop a single trailing
/// sentence punctuation character.
pub fn normalize_word(word: &str) -> String {
    let lowered = word.to_lowercase();
    match lowered.strip_suffix(|c: char| SENTENCE_PUNCTUATION.contains(&c)) {
        Some(stripped) => stripped.to_string(),
        None => lowered,
    }
}

/// Compare a typed word to a reference word.
pub fn words_match(typed: &str, reference: &str) -> bool {
    normalize_word(typed) == normalize_word(reference)
}

/// Split a reference sentence into words.
pub fn tokenize_reference(sentence: &str) -> Vec<String> {
    sentence.split_whitespace().map(str::to_string).collect()
}

/// Split live input into committed words and the in-progress fragment.
pub fn tokenize_input(input: &str) -> InputTokens<'_> {
    let mut committed: Vec<&str> = input.split_whitespace().collect();
    let ends_with_separator = input.chars().last().map_or(true, char::is_whitespace);

    let in_progress = if ends_with_separator {
        None
    } else {
        committed.pop()
    };

    InputTokens {
        committed,
        in_progress,
    }
}

/// Grade the typed word at `position` against the reference words.
///
/// Positions past the end of the reference are always incorrect.
pub fn grade_word(position: usize, typed: &str, reference: &[String]) -> WordVerdict {
    match reference.get(position) {
        Some(expected) if words_match(typed, expected) => WordVerdict::Correct,
        _ => WordVerdict::Incorrect,
    }
}
