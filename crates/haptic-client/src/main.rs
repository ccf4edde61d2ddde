//! haptic-register — entry point.
//!
//! Registers every `.json` pattern file in a directory with the haptic
//! backend. Point it at a folder of pattern files and run it; the backend
//! must already be running.
//!
//! # Usage
//!
//! ```text
//! haptic-register [OPTIONS]
//!
//! Options:
//!   --config <PATH>  Shared configuration document [default: config.json]
//!   --dir <PATH>     Directory scanned for .json pattern files [default: .]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable              | Default       | Description                     |
//! |-----------------------|---------------|---------------------------------|
//! | `HAPTIC_CONFIG`       | `config.json` | Configuration document path     |
//! | `HAPTIC_PATTERN_DIR`  | `.`           | Directory with pattern files    |
//!
//! The backend address and port come from the configuration document, not
//! the CLI: a first run writes `backend.address` and `backend.port` defaults
//! into the document, and a user who sets `use-config: true` can repoint the
//! client by editing the file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use haptic_client::{collect_pattern_files, BackendClient, BackendSettings};
use haptic_core::{ConfigStore, DEFAULT_CONFIG_FILE};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Register pattern files with the haptic device-control backend.
#[derive(Debug, Parser)]
#[command(
    name = "haptic-register",
    about = "Registers .json pattern files with the haptic backend",
    version
)]
struct Cli {
    /// Path to the shared configuration document.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, env = "HAPTIC_CONFIG")]
    config: PathBuf,

    /// Directory scanned (non-recursively) for `.json` pattern files.
    #[arg(long, default_value = ".", env = "HAPTIC_PATTERN_DIR")]
    dir: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut store = ConfigStore::load(&cli.config)
        .with_context(|| format!("loading configuration document {}", cli.config.display()))?;
    let settings = BackendSettings::attach(&mut store).context("attaching backend settings")?;

    let patterns = collect_pattern_files(&cli.dir)
        .with_context(|| format!("scanning {} for pattern files", cli.dir.display()))?;
    if patterns.is_empty() {
        info!("no .json pattern files found in {}", cli.dir.display());
        return Ok(());
    }

    let client = BackendClient::from_settings(&settings);
    let status = client
        .register_patterns(&patterns)
        .await
        .context("registering patterns")?;

    info!(
        %status,
        count = patterns.len(),
        backend = client.base_url(),
        "registration complete"
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
