//! # haptic-core
//!
//! Shared library for the haptic toolkit containing the configuration
//! attachment subsystem and the vibration-pattern vocabulary.
//!
//! This crate is used by both the backend client (`haptic-client`) and the
//! GIF converter (`haptic-gif`). It performs no network I/O and pulls in no
//! frameworks; its only blocking calls are the configuration document read at
//! load time and the document write triggered by an attach.
//!
//! # What lives here
//!
//! - **`config`** – The shared configuration document. Independent components
//!   declare named, typed attributes; the store reconciles them against a
//!   single on-disk JSON document, filling the document with code defaults on
//!   first use and restoring user-edited values on every later run.
//!
//! - **`pattern`** – The on-disk vibration-pattern shape (iterations of
//!   motor coordinate + amplitude samples) and the 6×4 motor-grid coordinate
//!   scheme shared by the backend payloads and the GIF renderer.

pub mod config;
pub mod pattern;

// Re-export the most-used types at the crate root so callers can write
// `haptic_core::ConfigStore` instead of `haptic_core::config::store::ConfigStore`.
pub use config::{
    default_document, AttachOutcome, Attachable, AttributeSet, ConfigError, ConfigStore,
    ConfigTable, ConfigValue, ValueKind, DEFAULT_CONFIG_FILE,
};
pub use pattern::{MotorSample, PatternError, PatternFile, PatternIteration, GRID_COLS, GRID_ROWS};
