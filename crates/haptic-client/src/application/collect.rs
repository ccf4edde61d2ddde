//! Pattern-file discovery.
//!
//! Scans a directory (non-recursively) for `.json` files and turns each into
//! a [`NamedPattern`] named after its file stem. Results are name-sorted so
//! registration order is deterministic regardless of directory iteration
//! order.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::wire::NamedPattern;

/// Errors raised while scanning for pattern files.
#[derive(Debug, Error)]
pub enum CollectError {
    /// A file system error reading the directory or one of its files.
    #[error("I/O error reading pattern files at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `.json` file that is not valid JSON.
    #[error("pattern file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Collects every `.json` file in `dir` as a registration payload.
///
/// An empty result is not an error — the caller decides whether "nothing to
/// register" is worth reporting.
///
/// # Errors
///
/// [`CollectError::Io`] for unreadable directories or files,
/// [`CollectError::Parse`] for files that are not valid JSON (a misnamed or
/// truncated pattern file should stop registration, not be silently
/// dropped).
pub fn collect_pattern_files(dir: &Path) -> Result<Vec<NamedPattern>, CollectError> {
    let entries = std::fs::read_dir(dir).map_err(|source| CollectError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut patterns = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CollectError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let name = match path.file_stem().and_then(|s| s.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        let raw = std::fs::read_to_string(&path).map_err(|source| CollectError::Io {
            path: path.clone(),
            source,
        })?;
        let pattern = serde_json::from_str(&raw).map_err(|source| CollectError::Parse {
            path: path.clone(),
            source,
        })?;

        patterns.push(NamedPattern {
            pattern_name: name,
            pattern,
        });
    }

    patterns.sort_by(|a, b| a.pattern_name.cmp(&b.pattern_name));
    debug!(count = patterns.len(), dir = %dir.display(), "collected pattern files");
    Ok(patterns)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
