//! Append-only record of incorrect attempts per reference word.
//!
//! Serialized as a JSON object in recording order:
//! `{"quick": ["quik", "quack"], "jumps.": ["#"]}`.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ledger value recorded for a word that was revealed with a hint.
pub const HINT_MARKER: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub word: String,
    pub attempts: Vec<String>,
}

/// Mistakes keyed by reference word. Entries and attempts are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MistakeLedger {
    entries: Vec<LedgerEntry>,
}

impl MistakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a typed token for a reference word. Returns false when that
    /// token was already recorded.
    pub fn record_mistake(&mut self, word: &str, typed: &str) -> bool {
        let entry = self.entry_mut(word);
        if entry.attempts.iter().any(|a| a == typed) {
            return false;
        }
        entry.attempts.push(typed.to_string());
        true
    }

    /// Record the hint marker for a word that has no entry yet.
    pub fn record_hint(&mut self, word: &str) -> bool {
        if self.contains(word) {
            return false;
        }
        self.entries.push(LedgerEntry {
            word: word.to_string(),
            attempts: vec![HINT_MARKER.to_string()],
        });
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.iter().any(|e| e.word == word)
    }

    pub fn attempts(&self, word: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.word == word)
            .map(|e| e.attempts.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, word: &str) -> &mut LedgerEntry {
        let pos = match self.entries.iter().position(|e| e.word == word) {
            Some(pos) => pos,
            None => {
                self.entries.push(LedgerEntry {
                    word: word.to_string(),
                    attempts: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos]
    }
}

impl Serialize for MistakeLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.word, &entry.attempts)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MistakeLedger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LedgerVisitor)
    }
}

struct LedgerVisitor;

impl<'de> Visitor<'de> for LedgerVisitor {
    type Value = MistakeLedger;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of reference words to incorrect attempts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut ledger = MistakeLedger::new();
        while let Some((word, attempts)) = access.next_entry::<String, Vec<String>>()? {
            let entry = ledger.entry_mut(&word);
            for attempt in attempts {
                if !entry.attempts.contains(&attempt) {
                    entry.attempts.push(attempt);
                }
            }
        }
        Ok(ledger)
    }
}
