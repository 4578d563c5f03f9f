//! Core dictation library used by the deck builder.
//!
//! Provides:
//! - SRT and LRC subtitle parsing into timed line records
//! - Segment planning against the audio duration
//! - The per-card dictation state machine (grading, hints, mistake ledger)
//!   and the front-to-back hand-off store
//! - Review data for the back face (flagged sentence words, mistake rows)
//! - Note schema and the audio-clipper / deck-writer seams

pub mod card;
pub mod collab;
pub mod error;
pub mod handoff;
pub mod ledger;
pub mod matching;
pub mod note;
pub mod parser;
pub mod planner;
pub mod render;
pub mod session;
pub mod timecode;
pub mod types;

pub use card::{AnswerCard, CardHandler, CardPhase, DictationCard, GradePass, GradedWord, HintMask};
pub use collab::{AudioClipper, DeckPackage, DeckWriter};
pub use error::{AudioError, HandoffError, PackageWriteError, ParseError, Result};
pub use handoff::{HandoffState, HandoffStore, SessionStore};
pub use ledger::{LedgerEntry, MistakeLedger, HINT_MARKER};
pub use matching::{normalize_word, tokenize_input, tokenize_reference, words_match, WordVerdict};
pub use note::{CardTemplate, FieldNaming, Note, NoteModel};
pub use parser::{parse_file, parse_lrc, parse_srt, parse_str};
pub use planner::{clip_filename, plan_segments, sanitize_prefix, RejectedSpan, SegmentPlan};
pub use render::{highlight_words, mistake_rows, HighlightedWord, MistakeRow};
pub use session::{PlaybackRate, ReviewSession, SessionError, Transport};
pub use timecode::{parse_lrc_timestamp, parse_srt_timestamp};
pub use types::{ParsedSubtitles, Segment, SubtitleFormat, SubtitleLine};
