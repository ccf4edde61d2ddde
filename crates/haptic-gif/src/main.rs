//! haptic-gif — entry point.
//!
//! Converts haptic pattern files into looping GIF previews of the motor
//! grid, one frame per pattern iteration.
//!
//! # Usage
//!
//! ```text
//! haptic-gif [OPTIONS] <FILES>...
//!
//! Arguments:
//!   <FILES>...  Pattern .json files to convert
//!
//! Options:
//!   --config <PATH>  Shared configuration document [default: config.json]
//! ```
//!
//! Frame rate and output directory come from the configuration document
//! (`gif-converter.fps`, `gif-converter.output_dir`); a first run writes the
//! defaults there. A file that fails to convert is logged and does not stop
//! the batch, but the process exits nonzero if any file failed.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use haptic_core::{ConfigStore, DEFAULT_CONFIG_FILE};
use haptic_gif::{convert_file, ConverterSettings};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Convert haptic pattern files into GIF previews.
#[derive(Debug, Parser)]
#[command(
    name = "haptic-gif",
    about = "Converts pattern .json files into GIF previews of the motor grid",
    version
)]
struct Cli {
    /// Pattern `.json` files to convert.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to the shared configuration document.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, env = "HAPTIC_CONFIG")]
    config: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut store = ConfigStore::load(&cli.config)
        .with_context(|| format!("loading configuration document {}", cli.config.display()))?;
    let settings = ConverterSettings::attach(&mut store).context("attaching converter settings")?;

    let mut failures = 0usize;
    for file in &cli.files {
        match convert_file(file, &settings) {
            Ok(output) => info!("wrote {}", output.display()),
            Err(e) => {
                error!("failed to convert {}: {e}", file.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} file(s) failed to convert", cli.files.len());
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
