//! Domain layer for haptic-client.
//!
//! Pure types only: the JSON payloads the backend API accepts and the
//! attachable connection settings. Nothing in here performs I/O or touches
//! `reqwest`, which keeps the payload shapes testable in isolation.

pub mod settings;
pub mod wire;

pub use settings::BackendSettings;
pub use wire::{EncodingBody, EncodingRequest, NamedPattern, PatternRequest, RegisterPacket};
