//! Backend connection settings.
//!
//! [`BackendSettings`] is an attachable component: it declares its defaults
//! and binds them to the shared configuration document at construction. On a
//! first run the defaults land in the document; once a user opts in
//! (`use-config: true`) an edited address or port is restored here instead.

use haptic_core::{Attachable, AttributeSet, ConfigError, ConfigStore};

/// Default backend address prefix. The port is appended verbatim, so the
/// trailing colon matters.
pub const DEFAULT_ADDRESS: &str = "http://localhost:";

/// Default backend port.
pub const DEFAULT_PORT: i64 = 8000;

/// Where to reach the device-control backend.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    attrs: AttributeSet,
}

impl BackendSettings {
    /// Namespace key in the configuration document.
    pub const IDENTITY: &'static str = "backend";

    /// Settings with code defaults, not yet attached.
    pub fn new() -> Self {
        Self {
            attrs: AttributeSet::new()
                .with("address", DEFAULT_ADDRESS)
                .with("port", DEFAULT_PORT),
        }
    }

    /// Constructs the settings and attaches them to `store`.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from the attach (including the save it may
    /// trigger).
    pub fn attach(store: &mut ConfigStore) -> Result<Self, ConfigError> {
        let mut settings = Self::new();
        store.attach(&mut settings)?;
        Ok(settings)
    }

    pub fn address(&self) -> &str {
        self.attrs.str("address").unwrap_or(DEFAULT_ADDRESS)
    }

    pub fn port(&self) -> i64 {
        self.attrs.int("port").unwrap_or(DEFAULT_PORT)
    }

    /// Full base URL: the address with the port appended, exactly as the
    /// backend expects it (`http://localhost:8000` by default).
    pub fn base_url(&self) -> String {
        format!("{}{}", self.address(), self.port())
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Attachable for BackendSettings {
    fn identity(&self) -> Option<String> {
        Some(Self::IDENTITY.to_string())
    }

    fn attributes(&self) -> &AttributeSet {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut AttributeSet {
        &mut self.attrs
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
