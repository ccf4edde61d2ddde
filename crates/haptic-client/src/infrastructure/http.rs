//! The backend HTTP client.
//!
//! Three operations, all POSTs of JSON payloads:
//!
//! - register patterns → the backend base URL
//! - play a registered pattern → `/devices/pattern`
//! - play an ad-hoc encoding → `/devices/encoding`
//!
//! The backend reports outcomes through HTTP status codes, so every
//! operation returns the [`StatusCode`] as-is; a non-success status is the
//! caller's to interpret (it is logged at `warn` here). Only transport
//! failures — connection refused, timeouts, invalid URLs — are errors.
//!
//! [`reqwest::Client`] keeps a connection pool internally, so one
//! [`BackendClient`] reused across calls gets the fast path automatically.

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::settings::BackendSettings;
use crate::domain::wire::{
    EncodingBody, EncodingRequest, NamedPattern, PatternRequest, RegisterPacket,
};

/// Errors raised by backend requests.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced an HTTP response.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Client pointed at the address/port the settings resolved.
    pub fn from_settings(settings: &BackendSettings) -> Self {
        Self::new(settings.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers `patterns` with the backend.
    ///
    /// # Errors
    ///
    /// [`BackendError::Request`] if the POST cannot be delivered.
    pub async fn register_patterns(
        &self,
        patterns: &[NamedPattern],
    ) -> Result<StatusCode, BackendError> {
        let names: Vec<&str> = patterns.iter().map(|p| p.pattern_name.as_str()).collect();
        info!("registering patterns: {}", names.join(", "));

        let packet = RegisterPacket {
            patterns: patterns.to_vec(),
        };
        self.post(self.base_url.clone(), &packet).await
    }

    /// Asks the backend to play a registered pattern.
    ///
    /// `force_now` skips the device queue and plays immediately.
    ///
    /// # Errors
    ///
    /// [`BackendError::Request`] if the POST cannot be delivered.
    pub async fn send_pattern(
        &self,
        pattern_name: &str,
        force_now: bool,
    ) -> Result<StatusCode, BackendError> {
        info!(pattern = pattern_name, force_now, "transmitting pattern");

        let request = PatternRequest {
            pattern_name: pattern_name.to_string(),
            force_now,
        };
        self.post(format!("{}/devices/pattern", self.base_url), &request)
            .await
    }

    /// Asks the backend to play an ad-hoc encoding string.
    ///
    /// # Errors
    ///
    /// [`BackendError::Request`] if the POST cannot be delivered.
    pub async fn send_encoding(
        &self,
        pattern: &str,
        force_now: bool,
    ) -> Result<StatusCode, BackendError> {
        info!(force_now, "transmitting encoding");

        let request = EncodingRequest {
            encoding: EncodingBody {
                pattern: pattern.to_string(),
                force_now,
            },
        };
        self.post(format!("{}/devices/encoding", self.base_url), &request)
            .await
    }

    async fn post<T: Serialize>(&self, url: String, body: &T) -> Result<StatusCode, BackendError> {
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| BackendError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, url = %url, "backend returned a non-success status");
        }
        Ok(status)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
