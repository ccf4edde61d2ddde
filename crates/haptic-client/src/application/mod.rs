//! Application layer for haptic-client.
//!
//! Turns a directory of pattern files into registration payloads. File
//! system reads only — the network belongs to the infrastructure layer.

pub mod collect;

pub use collect::{collect_pattern_files, CollectError};
