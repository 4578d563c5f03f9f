//! Terminal practice session tests driven by scripted input.

mod common;

use common::fixtures::{deck_config, write_file, SAMPLE_LRC};
use common::FakeClipper;
use dictation_core::{parse_lrc, plan_segments};
use pretty_assertions::assert_eq;
use sub2deck::practice::{practice_decks, run_practice, PracticeSummary};

fn practice(script: &str) -> (PracticeSummary, String) {
    let parsed = parse_lrc(SAMPLE_LRC).unwrap();
    let plan = plan_segments(&parsed.lines, 135_000);
    let mut out = Vec::new();
    let summary = run_practice(&plan.segments, script.as_bytes(), &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[test]
fn test_corrected_mistake_still_reviewed() {
    let (summary, out) = practice("The quik fox jumps.\nThe quick fox jumps.\n\n");

    assert_eq!(summary.cards, 2);
    assert_eq!(summary.cards_with_mistakes, 1);
    assert!(out.contains("Mistake Review"));
    assert!(out.contains("quik"));
    assert!(out.contains("敏捷的狐狸跳了。"));
}

#[test]
fn test_hint_fills_next_word() {
    let (summary, out) = practice("The #\n\n");

    assert!(out.contains("The quick"));
    assert_eq!(summary.cards_with_mistakes, 1);
}

#[test]
fn test_clean_run_through_every_line() {
    let (summary, out) = practice("The quick fox jumps.\n\nhello world\n\nlast line\n\n");

    assert_eq!(summary, PracticeSummary { cards: 3, cards_with_mistakes: 0 });
    assert!(out.contains("No mistakes."));
    assert!(out.contains("Practiced 3 card(s), 0 with mistakes."));
}

#[test]
fn test_unloadable_deck_does_not_stop_the_others() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "npr.lrc", SAMPLE_LRC);
    let decks = vec![
        deck_config(dir.path(), "broken", "missing.srt"),
        deck_config(dir.path(), "npr", "npr.lrc"),
    ];

    let mut out = Vec::new();
    let failed = practice_decks(&decks, &FakeClipper::new(135_000), "".as_bytes(), &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(failed, 1);
    assert!(!out.contains("Practicing BROKEN"));
    assert!(out.contains("Practicing NPR (3 lines)"));
    assert!(out.contains("Practiced 1 card(s), 0 with mistakes."));
}
