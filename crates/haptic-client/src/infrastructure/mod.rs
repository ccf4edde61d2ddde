//! Infrastructure layer for haptic-client.
//!
//! Owns the HTTP transport to the backend. Everything network-shaped lives
//! here; payload construction stays in the domain layer.

pub mod http;

pub use http::{BackendClient, BackendError};
