use crate::config::{ALL_TARGET, DEFAULT_CONFIG_PATH};
use clap::Parser;
use std::path::PathBuf;

/// Build dictation flashcard decks from subtitles and audio
#[derive(Parser, Debug)]
#[command(name = "sub2deck", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration to build, or `all`
    #[arg(default_value = ALL_TARGET)]
    pub target: String,

    /// Deck configuration file
    #[arg(short, long, env = "SUB2DECK_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Practice the selected decks in the terminal instead of building them
    #[arg(long)]
    pub practice: bool,
}
