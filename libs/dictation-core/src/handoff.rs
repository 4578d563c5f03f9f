//! Session-scoped hand-off of grading state from a card's front to its back.

use crate::error::HandoffError;
use crate::ledger::MistakeLedger;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the front face leaves behind for the back face.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffState {
    pub mistakes: MistakeLedger,
    pub typed_word_count: usize,
}

/// Key-value store addressed by card id.
pub trait HandoffStore {
    /// Store the latest state for a card, replacing any previous value.
    fn put(&mut self, card_id: &str, state: &HandoffState) -> Result<(), HandoffError>;

    /// Read the state for a card. `None` means the card was never graded.
    fn get(&self, card_id: &str) -> Option<HandoffState>;

    /// Drop everything stored for this session.
    fn clear(&mut self);
}

/// In-memory store holding serialized JSON values, one per card id.
#[derive(Debug, Default)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw value without going through serialization.
    #[cfg(test)]
    pub(crate) fn put_raw(&mut self, card_id: &str, value: impl Into<String>) {
        self.values.insert(card_id.to_string(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl HandoffStore for SessionStore {
    fn put(&mut self, card_id: &str, state: &HandoffState) -> Result<(), HandoffError> {
        let json = serde_json::to_string(state).map_err(|source| HandoffError::Serialize {
            card_id: card_id.to_string(),
            source,
        })?;
        self.values.insert(card_id.to_string(), json);
        Ok(())
    }

    fn get(&self, card_id: &str) -> Option<HandoffState> {
        let raw = self.values.get(card_id)?;
        match serde_json::from_str(raw) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(card_id, error = %e, "discarding unreadable hand-off state");
                None
            }
        }
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_ungraded() {
        let store = SessionStore::new();
        assert_eq!(store.get("nope"), None);
    }

    #[test]
    fn put_then_get_by_same_key() {
        let mut store = SessionStore::new();
        let mut state = HandoffState::default();
        state.mistakes.record_mistake("quick", "quik");
        state.typed_word_count = 3;

        store.put("card-1", &state).unwrap();
        assert_eq!(store.get("card-1"), Some(state));
        assert_eq!(store.get("card-2"), None);
    }

    #[test]
    fn unreadable_value_reads_as_ungraded() {
        let mut store = SessionStore::new();
        store.put_raw("card-1", "{not json");
        assert_eq!(store.get("card-1"), None);
    }

    #[test]
    fn clear_drops_all_cards() {
        let mut store = SessionStore::new();
        store.put("a", &HandoffState::default()).unwrap();
        store.put("b", &HandoffState::default()).unwrap();
        store.clear();
        assert!(store.is_empty());
    }
}
