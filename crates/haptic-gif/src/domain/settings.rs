//! Converter settings.
//!
//! Attachable component holding the GIF knobs: frame rate and output
//! directory. Defaults land in the shared configuration document on first
//! run; an opted-in user can change them by editing the file.

use haptic_core::{Attachable, AttributeSet, ConfigError, ConfigStore};

pub const DEFAULT_FPS: i64 = 8;
pub const DEFAULT_OUTPUT_DIR: &str = "gifs";

#[derive(Debug, Clone)]
pub struct ConverterSettings {
    attrs: AttributeSet,
}

impl ConverterSettings {
    /// Namespace key in the configuration document.
    pub const IDENTITY: &'static str = "gif-converter";

    /// Settings with code defaults, not yet attached.
    pub fn new() -> Self {
        Self {
            attrs: AttributeSet::new()
                .with("fps", DEFAULT_FPS)
                .with("output_dir", DEFAULT_OUTPUT_DIR),
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

    /// Frames per second, clamped to at least 1 so a zero or negative edit
    /// cannot produce a division by zero downstream.
    pub fn fps(&self) -> u32 {
        self.attrs.int("fps").unwrap_or(DEFAULT_FPS).max(1) as u32
    }

    pub fn output_dir(&self) -> &str {
        self.attrs.str("output_dir").unwrap_or(DEFAULT_OUTPUT_DIR)
    }
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Attachable for ConverterSettings {
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
