//! `SubLedger` - batch runner for the subscription extraction engine
//!
//! Reads a JSON array of already-decoded messages and prints the
//! deduplicated subscription candidates as JSON.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use subledger_core::{ExtractionConfig, Extractor, InputMessage, read_batch};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Extract subscription records from decoded email batches.
#[derive(Debug, Parser)]
#[command(name = "subledger", version, about)]
struct Cli {
    /// JSON array of decoded messages, or `-` for stdin.
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Config file. Defaults to `<config dir>/subledger/config.json` when present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Brand name to add to the configured list (repeatable).
    #[arg(short, long = "brand")]
    brands: Vec<String>,

    /// Extract messages in parallel.
    #[arg(long)]
    parallel: bool,

    /// Print counters alongside the candidates.
    #[arg(long)]
    report: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subledger=info,subledger_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let extractor = Extractor::new(config).context("invalid extraction config")?;

    let batch = load_batch(&cli.input)?;
    info!("Loaded {} messages from {:?}", batch.len(), cli.input);

    let report = if cli.parallel {
        extractor.extract_with_report_par(&batch)
    } else {
        extractor.extract_with_report(&batch)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match (cli.report, cli.pretty) {
        (true, true) => serde_json::to_writer_pretty(&mut out, &report)?,
        (true, false) => serde_json::to_writer(&mut out, &report)?,
        (false, true) => serde_json::to_writer_pretty(&mut out, &report.candidates)?,
        (false, false) => serde_json::to_writer(&mut out, &report.candidates)?,
    }
    writeln!(out)?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ExtractionConfig> {
    let mut config = match &cli.config {
        Some(path) => ExtractionConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ExtractionConfig::load_or_default().context("failed to load default config")?,
    };
    config.known_brands.extend(cli.brands.iter().cloned());
    Ok(config)
}

fn load_batch(input: &Path) -> Result<Vec<InputMessage>> {
    if input == Path::new("-") {
        return read_batch(io::stdin().lock()).context("failed to read batch from stdin");
    }
    let file = File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    read_batch(BufReader::new(file)).with_context(|| format!("failed to parse {}", input.display()))
}
