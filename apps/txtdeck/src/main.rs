mod config;
mod deck;
mod errors;
mod layout;
mod pptx;
mod report;
mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::deck::build_deck;
use crate::report::BuildReport;

/// Turn a directory of text files into a slide deck.
///
/// Each `.txt` file becomes a title slide followed by one slide per
/// paragraph; the first slide is a linked table of contents.
#[derive(Debug, Parser)]
#[command(name = "txtdeck", version)]
struct Cli {
    /// Directory to scan for .txt files [env: TXTDECK_INPUT_DIR, default: .]
    input_dir: Option<PathBuf>,

    /// Output .pptx path [env: TXTDECK_OUTPUT, default: output.pptx]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Font family for all text [env: TXTDECK_FONT]
    #[arg(long)]
    font: Option<String>,

    /// Also write a JSON build report to this path [env: TXTDECK_REPORT]
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(dir) = self.input_dir {
            config.input_dir = dir;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(font) = self.font {
            config.font = font;
        }
        if self.report.is_some() {
            config.report = self.report;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    cli.apply(&mut config);

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting txtdeck v{}", env!("CARGO_PKG_VERSION"));

    let report = run(&config)?;
    info!(
        output = %report.output.display(),
        slides = report.slide_count,
        "Deck written"
    );
    Ok(())
}

/// Scans, builds and saves the deck described by `config`.
fn run(config: &Config) -> Result<BuildReport> {
    let sources = source::load_dir(&config.input_dir)
        .with_context(|| format!("Failed to load sources from {}", config.input_dir.display()))?;
    if sources.is_empty() {
        warn!(
            dir = %config.input_dir.display(),
            "No .txt files found; writing a deck with only the table of contents"
        );
    }

    let fit = config.fit_params();
    let geometry = config.geometry();
    let fit_box = geometry.fit_box();
    info!(
        files = sources.len(),
        box_width_pt = fit_box.width_pt,
        box_height_pt = fit_box.height_pt,
        min_pt = fit.min_size,
        max_pt = fit.max_size,
        "Building deck"
    );

    let deck = build_deck(&sources, geometry, &fit, &config.deck_style());

    let title = config
        .output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    pptx::save(&deck, &config.output, &title)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    let report = BuildReport::from_deck(&deck, &sources, &config.output);
    let overflow = report.overflow_count();
    if overflow > 0 {
        warn!(
            paragraphs = overflow,
            min_pt = fit.min_size,
            "Some paragraphs exceed the text box even at the minimum font size"
        );
    }

    if let Some(path) = &config.report {
        report
            .write(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    Ok(report)
}
