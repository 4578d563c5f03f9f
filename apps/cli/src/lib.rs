pub mod cli;
pub mod config;
pub mod error;
pub mod practice;
pub mod services;
pub mod templates;

use std::sync::Arc;

use clap::Parser;
use dictation_core::{AudioClipper, DeckWriter, NoteModel};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::{DeckConfig, Settings};
use crate::error::BuildError;
use crate::services::audio::FfmpegClipper;
use crate::services::build::{build_deck, BuildReport};
use crate::services::package::AnkiDeckWriter;

/// Result of one configuration in a batch, in configuration order.
pub type BatchResult = Vec<(String, Result<BuildReport, BuildError>)>;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    tracing::info!(config = %cli.config.display(), "Loading deck configurations...");
    let settings = Settings::load(&cli.config)?;
    let decks: Vec<DeckConfig> = settings.select(&cli.target)?.into_iter().cloned().collect();
    if decks.is_empty() {
        tracing::warn!(config = %cli.config.display(), "no deck configurations defined");
        return Ok(());
    }

    let clipper = FfmpegClipper::locate()?;

    if cli.practice {
        let stdin = std::io::stdin();
        let failed = practice::practice_decks(&decks, &clipper, stdin.lock(), std::io::stdout().lock())?;
        if failed > 0 {
            anyhow::bail!("{failed} of {} deck configuration(s) could not be practiced", decks.len());
        }
        return Ok(());
    }

    let model = templates::note_model(settings.field_naming);
    let results = build_batch(
        Arc::new(settings),
        decks,
        Arc::new(model),
        Arc::new(clipper),
        Arc::new(AnkiDeckWriter),
    )
    .await?;

    let total = results.len();
    let mut failed = 0;
    for (name, result) in results {
        match result {
            Ok(report) => tracing::info!(
                config = %name,
                notes = report.notes,
                rejected = report.rejected,
                skipped_blocks = report.skipped_blocks,
                output = %report.output.display(),
                "deck built"
            ),
            Err(e) => {
                failed += 1;
                tracing::error!(config = %name, error = %e, "deck build failed");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {total} deck configuration(s) failed");
    }
    Ok(())
}

/// Build configurations in parallel. A failing configuration does not stop
/// the others; each result is reported under its configuration name.
pub async fn build_batch<C, W>(
    settings: Arc<Settings>,
    decks: Vec<DeckConfig>,
    model: Arc<NoteModel>,
    clipper: Arc<C>,
    writer: Arc<W>,
) -> anyhow::Result<BatchResult>
where
    C: AudioClipper + Send + Sync + 'static,
    W: DeckWriter + Send + Sync + 'static,
{
    let handles: Vec<_> = decks
        .into_iter()
        .map(|deck| {
            let settings = Arc::clone(&settings);
            let model = Arc::clone(&model);
            let clipper = Arc::clone(&clipper);
            let writer = Arc::clone(&writer);
            let name = deck.name.clone();
            let handle = tokio::task::spawn_blocking(move || {
                build_deck(&settings, &deck, &model, clipper.as_ref(), writer.as_ref())
            });
            (name, handle)
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        results.push((name, handle.await?));
    }
    Ok(results)
}
