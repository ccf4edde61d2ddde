//! JSON payload shapes of the backend API.
//!
//! Pattern bodies are carried as raw [`serde_json::Value`]: the client
//! forwards whatever the pattern author wrote, it does not re-shape or
//! validate user JSON. Field names here are the wire contract — renaming one
//! breaks the backend.

use serde::{Deserialize, Serialize};

/// One pattern to register, named after its source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPattern {
    pub pattern_name: String,
    pub pattern: serde_json::Value,
}

/// Body of the registration POST (to the backend base URL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterPacket {
    pub patterns: Vec<NamedPattern>,
}

/// Body of `POST /devices/pattern`: play a registered pattern by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRequest {
    pub pattern_name: String,
    /// Skip the device queue and play immediately.
    pub force_now: bool,
}

/// Body of `POST /devices/encoding`: play an ad-hoc encoding string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingRequest {
    pub encoding: EncodingBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingBody {
    pub pattern: String,
    pub force_now: bool,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
