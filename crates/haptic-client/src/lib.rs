//! haptic-client library crate.
//!
//! HTTP client for the haptic device-control backend: registers pattern
//! files and transmits patterns or encodings to the device queue. The
//! backend itself is an external collaborator; this crate only ships the
//! client side, plus the `haptic-register` binary that registers every
//! `.json` pattern file found in a directory.
//!
//! # Architecture
//!
//! ```text
//! [haptic-client]
//!   ├── domain/          Pure types: wire payloads, BackendSettings
//!   ├── application/     Pattern-file discovery (directory → payloads)
//!   └── infrastructure/  BackendClient (reqwest HTTP transport)
//! ```
//!
//! # Layer rules
//!
//! - `domain` depends on `haptic-core` only (no I/O, no async).
//! - `application` reads the file system but never the network.
//! - `infrastructure` owns the HTTP transport.
//!
//! Connection settings come from the shared configuration document:
//! [`domain::BackendSettings`] attaches at construction, so a first run
//! writes the defaults into the document and a user who opts in can repoint
//! the client without recompiling.

/// Domain layer: wire payload types and backend connection settings.
pub mod domain;

/// Application layer: pattern-file discovery.
pub mod application;

/// Infrastructure layer: the HTTP client.
pub mod infrastructure;

pub use application::collect::{collect_pattern_files, CollectError};
pub use domain::settings::BackendSettings;
pub use domain::wire::NamedPattern;
pub use infrastructure::http::{BackendClient, BackendError};
