//! Terminal dictation practice over planned segments.
//!
//! Every entered line is the full input value of the front side. Enter
//! commits the last word unless the line ends with the hint trigger. An
//! empty line turns the card over.

use colored::Colorize;
use comfy_table::Table;
use dictation_core::timecode::format_srt_timestamp;
use dictation_core::{
    mistake_rows, parse_file, plan_segments, AnswerCard, AudioClipper, GradePass, HintMask, ReviewSession, Segment,
    WordVerdict,
};
use std::io::{BufRead, Write};

use crate::config::DeckConfig;
use crate::error::BuildError;

/// Totals for one practice run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PracticeSummary {
    pub cards: usize,
    pub cards_with_mistakes: usize,
}

/// Parse and plan one configuration for practice. No clips are written.
pub fn load_segments<C: AudioClipper>(deck: &DeckConfig, clipper: &C) -> Result<Vec<Segment>, BuildError> {
    let parsed = parse_file(&deck.subtitles)?;
    let track = clipper.decode(&deck.audio)?;
    Ok(plan_segments(&parsed.lines, clipper.duration_ms(&track)).segments)
}

/// Practice every configuration in turn and return how many could not be
/// loaded. A failing configuration is logged and the next one starts.
pub fn practice_decks<C, R, W>(decks: &[DeckConfig], clipper: &C, mut input: R, mut out: W) -> anyhow::Result<usize>
where
    C: AudioClipper,
    R: BufRead,
    W: Write,
{
    let mut failed = 0;
    for deck in decks {
        let segments = match load_segments(deck, clipper) {
            Ok(segments) => segments,
            Err(e) => {
                failed += 1;
                tracing::error!(config = %deck.name, error = %e, "cannot load deck for practice");
                continue;
            }
        };

        writeln!(out, "Practicing {} ({} lines)", deck.deck_name, segments.len())?;
        run_practice(&segments, &mut input, &mut out)?;
    }
    Ok(failed)
}

/// Practice each segment in order until the input runs out.
pub fn run_practice<R, W>(segments: &[Segment], mut input: R, mut out: W) -> anyhow::Result<PracticeSummary>
where
    R: BufRead,
    W: Write,
{
    let mut session = ReviewSession::new();
    let mut summary = PracticeSummary::default();

    for segment in segments {
        let card_id = format!("practice-{}", segment.index);
        session.show_front(&card_id, &segment.text);

        writeln!(
            out,
            "\n{} [{} --> {}]",
            format!("Line {}", segment.index).bold(),
            format_srt_timestamp(segment.start_ms),
            format_srt_timestamp(segment.end_ms)
        )?;
        if let Some(card) = session.front(&card_id) {
            writeln!(out, "{}", hint_line(&card.hint_mask()))?;
        }

        let finished = loop {
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break true;
            }
            let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            if line.trim().is_empty() {
                break false;
            }

            let value = if line.ends_with(dictation_core::card::HINT_TRIGGER) {
                line.to_string()
            } else {
                format!("{line} ")
            };

            let pass = session.grade(&card_id, &value)?;
            writeln!(out, "{}", feedback_line(&pass))?;
            if pass.revealed.is_some() {
                writeln!(out, "{} {}", "input:".dimmed(), pass.input.trim_end())?;
            }
            if let Some(card) = session.front(&card_id) {
                writeln!(out, "{}", hint_line(&card.hint_mask()))?;
            }
        };

        session.show_back(&card_id, &segment.text, segment.translation.as_deref().unwrap_or(""));
        if let Some(back) = session.back(&card_id) {
            write_review(&mut out, back)?;
            summary.cards += 1;
            if back.ledger().is_some() {
                summary.cards_with_mistakes += 1;
            }
        }
        session.abandon(&card_id);

        if finished {
            break;
        }
    }

    session.finish();
    writeln!(
        out,
        "\nPracticed {} card(s), {} with mistakes.",
        summary.cards, summary.cards_with_mistakes
    )?;
    Ok(summary)
}

fn feedback_line(pass: &GradePass) -> String {
    let mut words: Vec<String> = pass
        .words
        .iter()
        .map(|word| {
            let text = match word.verdict {
                WordVerdict::Correct => word.text.green(),
                WordVerdict::Incorrect => word.text.red().underline(),
            };
            if word.hinted {
                text.italic().to_string()
            } else {
                text.to_string()
            }
        })
        .collect();

    if let Some(fragment) = &pass.in_progress {
        words.push(fragment.dimmed().to_string());
    }
    words.join(" ")
}

fn hint_line(mask: &HintMask) -> String {
    mask.words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i == mask.current {
                word.yellow().bold().to_string()
            } else {
                word.yellow().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_review<W: Write>(out: &mut W, card: &AnswerCard) -> std::io::Result<()> {
    let sentence = card
        .highlighted_sentence()
        .iter()
        .map(|word| {
            if word.flagged {
                word.text.red().bold().to_string()
            } else {
                word.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "{sentence}")?;

    if !card.translation().is_empty() {
        writeln!(out, "{}", card.translation().dimmed())?;
    }

    match card.ledger() {
        Some(ledger) => {
            let mut table = Table::new();
            table.set_header(vec!["Target Word", "Your Attempt"]);
            for row in mistake_rows(ledger) {
                table.add_row(vec![row.target, row.attempts]);
            }
            writeln!(out, "{}", "Mistake Review".red().bold())?;
            writeln!(out, "{table}")?;
        }
        None if card.is_graded() => writeln!(out, "{}", "No mistakes.".green())?,
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(index: usize, text: &str) -> Segment {
        Segment {
            index,
            start_ms: 0,
            end_ms: 1000,
            text: text.to_string(),
            translation: None,
        }
    }

    #[test]
    fn test_end_of_input_reviews_current_card() {
        let mut out = Vec::new();
        let summary = run_practice(&[segment(1, "one two")], "".as_bytes(), &mut out).unwrap();
        assert_eq!(summary.cards, 1);
        assert_eq!(summary.cards_with_mistakes, 0);
    }
}
