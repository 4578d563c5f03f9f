//! Review session: the registry of rendered card faces keyed by card id.
//!
//! The session owns the hand-off store, so everything a front face leaves
//! behind disappears when the session ends.

use crate::card::{AnswerCard, CardHandler, CardPhase, DictationCard, GradePass};
use crate::error::HandoffError;
use crate::handoff::{HandoffStore, SessionStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Playback speeds offered on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackRate {
    Half,
    ThreeQuarters,
    Normal,
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::Normal
    }
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 3] = [Self::Half, Self::ThreeQuarters, Self::Normal];

    pub fn multiplier(self) -> f32 {
        match self {
            Self::Half => 0.5,
            Self::ThreeQuarters => 0.75,
            Self::Normal => 1.0,
        }
    }

    pub fn from_multiplier(value: f32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rate| (rate.multiplier() - value).abs() < f32::EPSILON)
    }
}

/// Audio transport state of one rendered face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    pub rate: PlaybackRate,
    pub looping: bool,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            rate: PlaybackRate::Normal,
            looping: true,
        }
    }
}

impl Transport {
    pub fn set_speed(&mut self, rate: PlaybackRate) {
        self.rate = rate;
    }

    /// Flip looping and return the new value.
    pub fn toggle_loop(&mut self) -> bool {
        self.looping = !self.looping;
        self.looping
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no card rendered with id {0}")]
    UnknownCard(String),

    #[error("card {0} is showing its answer and cannot be graded")]
    NotGradable(String),

    #[error(transparent)]
    Handoff(#[from] HandoffError),
}

/// The face currently rendered for a card id.
#[derive(Debug, Clone)]
pub enum Face {
    Front(DictationCard),
    Back(AnswerCard),
}

impl Face {
    fn handler(&self) -> &dyn CardHandler {
        match self {
            Self::Front(card) => card,
            Self::Back(card) => card,
        }
    }

    fn handler_mut(&mut self) -> &mut dyn CardHandler {
        match self {
            Self::Front(card) => card,
            Self::Back(card) => card,
        }
    }
}

/// Registry of rendered faces plus the session's hand-off store.
pub struct ReviewSession<S: HandoffStore = SessionStore> {
    faces: HashMap<String, Face>,
    store: S,
}

impl ReviewSession<SessionStore> {
    pub fn new() -> Self {
        Self::with_store(SessionStore::new())
    }
}

impl Default for ReviewSession<SessionStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: HandoffStore> ReviewSession<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            faces: HashMap::new(),
            store,
        }
    }

    /// Render the front of a card, replacing whatever was registered for it.
    pub fn show_front(&mut self, card_id: &str, sentence: &str) {
        let card = DictationCard::new(card_id, sentence);
        self.faces.insert(card_id.to_string(), Face::Front(card));
    }

    /// Render the back of a card. The front instance is discarded; only the
    /// hand-off store carries its state over.
    pub fn show_back(&mut self, card_id: &str, sentence: &str, translation: &str) {
        let card = AnswerCard::open(card_id, sentence, translation, &self.store);
        self.faces.insert(card_id.to_string(), Face::Back(card));
    }

    pub fn front(&self, card_id: &str) -> Option<&DictationCard> {
        match self.faces.get(card_id) {
            Some(Face::Front(card)) => Some(card),
            _ => None,
        }
    }

    pub fn back(&self, card_id: &str) -> Option<&AnswerCard> {
        match self.faces.get(card_id) {
            Some(Face::Back(card)) => Some(card),
            _ => None,
        }
    }

    /// Grade input on the front face of a card.
    pub fn grade(&mut self, card_id: &str, input: &str) -> Result<GradePass, SessionError> {
        match self.faces.get_mut(card_id) {
            Some(Face::Front(card)) => Ok(card.grade(input, &mut self.store)?),
            Some(Face::Back(_)) => Err(SessionError::NotGradable(card_id.to_string())),
            None => Err(SessionError::UnknownCard(card_id.to_string())),
        }
    }

    pub fn set_speed(&mut self, card_id: &str, rate: PlaybackRate) -> Result<(), SessionError> {
        self.face_mut(card_id)?.handler_mut().transport_mut().set_speed(rate);
        Ok(())
    }

    pub fn toggle_loop(&mut self, card_id: &str) -> Result<bool, SessionError> {
        Ok(self.face_mut(card_id)?.handler_mut().transport_mut().toggle_loop())
    }

    pub fn transport(&self, card_id: &str) -> Option<Transport> {
        self.faces.get(card_id).map(|face| *face.handler().transport())
    }

    pub fn phase(&self, card_id: &str) -> Option<CardPhase> {
        self.faces.get(card_id).map(|face| face.handler().phase())
    }

    pub fn face(&self, card_id: &str) -> Option<&Face> {
        self.faces.get(card_id)
    }

    /// Navigate away from a card. In-progress grading state is dropped.
    pub fn abandon(&mut self, card_id: &str) {
        self.faces.remove(card_id);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// End the session, dropping every face and all hand-off state.
    pub fn finish(mut self) {
        self.faces.clear();
        self.store.clear();
    }

    fn face_mut(&mut self, card_id: &str) -> Result<&mut Face, SessionError> {
        self.faces
            .get_mut(card_id)
            .ok_or_else(|| SessionError::UnknownCard(card_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rates_come_from_fixed_set() {
        assert_eq!(PlaybackRate::from_multiplier(0.75), Some(PlaybackRate::ThreeQuarters));
        assert_eq!(PlaybackRate::from_multiplier(2.0), None);
        assert_eq!(PlaybackRate::Half.multiplier(), 0.5);
    }

    #[test]
    fn loop_defaults_to_enabled() {
        let transport = Transport::default();
        assert!(transport.looping);
        assert_eq!(transport.rate, PlaybackRate::Normal);
    }

    #[test]
    fn front_to_back_hand_off() {
        let mut session = ReviewSession::new();
        session.show_front("c1", "The quick fox jumps.");
        session.grade("c1", "The quik fox jumps.").unwrap();
        session.grade("c1", "The quick fox jumps. ").unwrap();

        session.show_back("c1", "The quick fox jumps.", "");
        let back = session.back("c1").unwrap();
        let attempts = back.ledger().unwrap().attempts("quick").unwrap().to_vec();
        assert_eq!(attempts, vec!["quik".to_string()]);
        assert_eq!(session.phase("c1"), Some(CardPhase::Reviewing));
    }

    #[test]
    fn cards_are_isolated_by_id() {
        let mut session = ReviewSession::new();
        session.show_front("a", "one two");
        session.show_front("b", "one two");
        session.grade("a", "won ").unwrap();

        session.show_back("b", "one two", "");
        assert!(!session.back("b").unwrap().is_graded());
        session.show_back("a", "one two", "");
        assert!(session.back("a").unwrap().ledger().is_some());
    }

    #[test]
    fn back_without_front_is_ungraded() {
        let mut session = ReviewSession::new();
        session.show_back("c1", "one", "");
        assert!(!session.back("c1").unwrap().is_graded());
    }

    #[test]
    fn grading_back_or_unknown_card_fails() {
        let mut session = ReviewSession::new();
        assert!(matches!(session.grade("x", "a"), Err(SessionError::UnknownCard(_))));

        session.show_back("c1", "one", "");
        assert!(matches!(session.grade("c1", "a"), Err(SessionError::NotGradable(_))));
    }

    #[test]
    fn transport_actions_leave_grading_alone() {
        let mut session = ReviewSession::new();
        session.show_front("c1", "one two");
        session.grade("c1", "on ").unwrap();

        session.set_speed("c1", PlaybackRate::Half).unwrap();
        assert!(!session.toggle_loop("c1").unwrap());

        assert_eq!(session.transport("c1").unwrap().rate, PlaybackRate::Half);
        assert_eq!(session.phase("c1"), Some(CardPhase::Grading));
        assert!(session.front("c1").unwrap().ledger().contains("one"));
    }

    #[test]
    fn abandoning_keeps_store_until_finish() {
        let mut session = ReviewSession::new();
        session.show_front("c1", "one");
        session.grade("c1", "two ").unwrap();
        session.abandon("c1");

        assert!(session.face("c1").is_none());
        assert!(session.store().get("c1").is_some());
    }
}
