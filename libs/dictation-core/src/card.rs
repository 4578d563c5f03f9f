//! Per-card dictation state machine.
//!
//! A card is rendered twice: the front ([`DictationCard`]) grades what the
//! learner types, the back ([`AnswerCard`]) reviews the result. The two
//! instances never share memory; the front writes a [`HandoffState`] into a
//! [`HandoffStore`] under the card id on every grading pass and the back
//! reads it from there.

use crate::error::HandoffError;
use crate::handoff::{HandoffState, HandoffStore};
use crate::ledger::MistakeLedger;
use crate::matching::{grade_word, tokenize_input, tokenize_reference, WordVerdict};
use crate::render::{highlight_words, HighlightedWord};
use crate::session::Transport;
use std::collections::BTreeSet;

/// Typing this character asks for the next word.
pub const HINT_TRIGGER: char = '#';

/// Placeholder used for the hidden part of a hinted word.
const HINT_PLACEHOLDER: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// Front rendered, nothing typed yet.
    Idle,
    /// Input present and graded.
    Grading,
    /// A hint is being applied; only observable inside a grading pass.
    HintReveal,
    /// Back face showing the result.
    Reviewing,
}

/// One committed input word after grading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedWord {
    pub text: String,
    pub verdict: WordVerdict,
    /// Filled in by a hint rather than typed.
    pub hinted: bool,
}

/// Outcome of one grading pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradePass {
    /// Input value after hint handling; the caller replaces its buffer with it.
    pub input: String,
    pub words: Vec<GradedWord>,
    /// Trailing fragment that is not graded yet.
    pub in_progress: Option<String>,
    /// Number of committed words, which is also the current hint position.
    pub typed_word_count: usize,
    /// Position revealed by a hint during this pass.
    pub revealed: Option<usize>,
}

/// Masked reference words shown before and during typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintMask {
    pub words: Vec<String>,
    pub current: usize,
}

impl HintMask {
    pub fn new(reference: &[String], current: usize) -> Self {
        Self {
            words: reference.iter().map(|w| mask_word(w)).collect(),
            current,
        }
    }
}

/// First character of the word followed by one placeholder per remaining character.
pub fn mask_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => std::iter::once(first)
            .chain(chars.map(|_| HINT_PLACEHOLDER))
            .collect(),
        None => String::new(),
    }
}

/// Capabilities a rendered card face exposes to its markup.
pub trait CardHandler {
    fn phase(&self) -> CardPhase;

    fn transport(&self) -> &Transport;

    fn transport_mut(&mut self) -> &mut Transport;
}

/// Front face: grades input and accumulates mistakes.
#[derive(Debug, Clone)]
pub struct DictationCard {
    card_id: String,
    reference: Vec<String>,
    revealed: BTreeSet<usize>,
    ledger: MistakeLedger,
    phase: CardPhase,
    typed_word_count: usize,
    transport: Transport,
}

impl DictationCard {
    pub fn new(card_id: impl Into<String>, sentence: &str) -> Self {
        Self {
            card_id: card_id.into(),
            reference: tokenize_reference(sentence.trim()),
            revealed: BTreeSet::new(),
            ledger: MistakeLedger::new(),
            phase: CardPhase::Idle,
            typed_word_count: 0,
            transport: Transport::default(),
        }
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn reference_words(&self) -> &[String] {
        &self.reference
    }

    pub fn ledger(&self) -> &MistakeLedger {
        &self.ledger
    }

    pub fn revealed_positions(&self) -> &BTreeSet<usize> {
        &self.revealed
    }

    /// False when the reference sentence is empty; input is then never recorded.
    pub fn can_grade(&self) -> bool {
        !self.reference.is_empty()
    }

    /// Hint line for the current position.
    pub fn hint_mask(&self) -> HintMask {
        HintMask::new(&self.reference, self.typed_word_count)
    }

    /// Run one grading pass over the full input value and hand the result off.
    pub fn grade(&mut self, input: &str, store: &mut dyn HandoffStore) -> Result<GradePass, HandoffError> {
        let mut value = input.to_string();
        let mut revealed = None;

        if value.ends_with(HINT_TRIGGER) {
            self.phase = CardPhase::HintReveal;
            value.pop();
            revealed = self.reveal_next(&mut value);
        }

        let tokens = tokenize_input(&value);
        let mut words = Vec::with_capacity(tokens.committed.len());

        for (position, typed) in tokens.committed.iter().enumerate() {
            let verdict = grade_word(position, typed, &self.reference);
            let hinted = self.revealed.contains(&position);

            if let Some(expected) = self.reference.get(position) {
                if hinted {
                    self.ledger.record_hint(expected);
                } else if verdict == WordVerdict::Incorrect {
                    self.ledger.record_mistake(expected, typed);
                }
            }

            words.push(GradedWord {
                text: typed.to_string(),
                verdict,
                hinted,
            });
        }

        self.typed_word_count = words.len();
        if !value.is_empty() || self.phase != CardPhase::Idle {
            self.phase = CardPhase::Grading;
        }

        store.put(
            &self.card_id,
            &HandoffState {
                mistakes: self.ledger.clone(),
                typed_word_count: self.typed_word_count,
            },
        )?;

        Ok(GradePass {
            in_progress: tokens.in_progress.map(str::to_string),
            input: value,
            words,
            typed_word_count: self.typed_word_count,
            revealed,
        })
    }

    /// Append the next reference word to `value` and mark its position.
    fn reveal_next(&mut self, value: &mut String) -> Option<usize> {
        let position = value.split_whitespace().count();
        let word = self.reference.get(position)?;

        if !value.is_empty() && !value.ends_with(char::is_whitespace) {
            value.push(' ');
        }
        value.push_str(word);
        value.push(' ');

        self.revealed.insert(position);
        tracing::debug!(card_id = %self.card_id, position, "revealed word by hint");
        Some(position)
    }
}

impl CardHandler for DictationCard {
    fn phase(&self) -> CardPhase {
        self.phase
    }

    fn transport(&self) -> &Transport {
        &self.transport
    }

    fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }
}

/// Back face: reads the hand-off and exposes the review.
#[derive(Debug, Clone)]
pub struct AnswerCard {
    card_id: String,
    sentence: String,
    translation: String,
    handoff: Option<HandoffState>,
    transport: Transport,
}

impl AnswerCard {
    /// Render the back face, reading whatever the front left under `card_id`.
    pub fn open(
        card_id: impl Into<String>,
        sentence: &str,
        translation: &str,
        store: &dyn HandoffStore,
    ) -> Self {
        let card_id = card_id.into();
        let handoff = store.get(&card_id);
        Self {
            card_id,
            sentence: sentence.trim().to_string(),
            translation: translation.trim().to_string(),
            handoff,
            transport: Transport::default(),
        }
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    /// False when the front never graded anything for this card.
    pub fn is_graded(&self) -> bool {
        self.handoff.is_some()
    }

    pub fn typed_word_count(&self) -> usize {
        self.handoff.as_ref().map_or(0, |h| h.typed_word_count)
    }

    pub fn ledger(&self) -> Option<&MistakeLedger> {
        self.handoff
            .as_ref()
            .map(|h| &h.mistakes)
            .filter(|ledger| !ledger.is_empty())
    }

    /// Sentence words with those matching a ledger key flagged.
    pub fn highlighted_sentence(&self) -> Vec<HighlightedWord> {
        match self.ledger() {
            Some(ledger) => highlight_words(&self.sentence, ledger),
            None => highlight_words(&self.sentence, &MistakeLedger::new()),
        }
    }
}

impl CardHandler for AnswerCard {
    fn phase(&self) -> CardPhase {
        CardPhase::Reviewing
    }

    fn transport(&self) -> &Transport {
        &self.transport
    }

    fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }
}
