//! The configuration document model.
//!
//! A document is a nested string-keyed mapping serialized as indented JSON so
//! users can edit it by hand. The top level carries two reserved keys:
//!
//! - `use-config` (boolean) – whether the on-disk document is honoured. When
//!   it is `false` or absent the store discards the file's content in memory
//!   and starts from [`default_document`] (the file itself is left alone until
//!   the next save overwrites it).
//! - `use-config-comment` – a string list explaining the switch to whoever
//!   opens the file. It is never read programmatically.
//!
//! Component entries live at `document[section][component][attribute]`, or
//! directly at `document[component][attribute]` when the section is the empty
//! string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reserved top-level key: honour the on-disk document?
pub const USE_CONFIG_KEY: &str = "use-config";

/// Reserved top-level key: user-facing explanation of `use-config`.
pub const USE_CONFIG_COMMENT_KEY: &str = "use-config-comment";

/// Attributes whose name starts with this marker are private component state
/// and never persisted or restored.
pub const PRIVATE_PREFIX: char = '_';

/// A string-keyed mapping of configuration values.
///
/// `BTreeMap` keeps keys sorted, which makes serialization deterministic and
/// `save()` byte-idempotent.
pub type ConfigTable = BTreeMap<String, ConfigValue>;

/// A single configuration value.
///
/// Serialized untagged, so the JSON form is the natural one (`true`, `3`,
/// `2.5`, `"text"`, `[..]`, `{..}`). `Tuple` and `Seq` both serialize to a
/// JSON array; a bare array always deserializes as `Seq`. The distinction is
/// carried by the component's *declared* default: when a component declares a
/// `Tuple` and the document holds an array, the restored value is re-tagged
/// as `Tuple` (see the store's merge). No other cross-kind conversion exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<ConfigValue>),
    Tuple(Vec<ConfigValue>),
    Map(ConfigTable),
}

/// The kind of a [`ConfigValue`], used for eligibility checks and for
/// re-tagging tuples on restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
    Seq,
    Tuple,
    Map,
}

impl ConfigValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::Bool(_) => ValueKind::Bool,
            ConfigValue::Int(_) => ValueKind::Int,
            ConfigValue::Float(_) => ValueKind::Float,
            ConfigValue::Str(_) => ValueKind::Str,
            ConfigValue::Seq(_) => ValueKind::Seq,
            ConfigValue::Tuple(_) => ValueKind::Tuple,
            ConfigValue::Map(_) => ValueKind::Map,
        }
    }

    /// Whether a declared attribute of this kind participates in attach.
    ///
    /// Plain sequences are legal *document* values (the `use-config-comment`
    /// field is one) but are not part of the eligible attribute set; a
    /// declared `Seq` attribute is silently skipped.
    pub fn is_attachable(&self) -> bool {
        !matches!(self, ConfigValue::Seq(_))
    }

    /// Builds a fixed-size tuple value.
    pub fn tuple(items: impl Into<Vec<ConfigValue>>) -> Self {
        ConfigValue::Tuple(items.into())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items of a `Seq` or `Tuple` value.
    pub fn as_items(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Seq(items) | ConfigValue::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&ConfigTable> {
        match self {
            ConfigValue::Map(table) => Some(table),
            _ => None,
        }
    }
}

// From impls for the primitive kinds so declarations read naturally:
// `.with("port", 8000)` / `.with("speed", 1.0)` / `.with("label", "x")`.
// Only one integer and one float impl exist so literal inference is unambiguous.

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Str(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Str(value)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        ConfigValue::Seq(value)
    }
}

impl From<ConfigTable> for ConfigValue {
    fn from(value: ConfigTable) -> Self {
        ConfigValue::Map(value)
    }
}

/// The built-in default document: configuration disabled, plus the
/// explanatory comment embedded for whoever opens the file.
pub fn default_document() -> ConfigTable {
    let mut doc = ConfigTable::new();
    doc.insert(USE_CONFIG_KEY.to_string(), ConfigValue::Bool(false));
    doc.insert(
        USE_CONFIG_COMMENT_KEY.to_string(),
        ConfigValue::Seq(vec![
            "Set to true if you edit the config file manually.".into(),
            "If false, the config file will be overwritten with the default config every restart."
                .into(),
        ]),
    );
    doc
}

/// Whether a loaded document asks to be honoured.
///
/// Only a literal boolean `true` counts; any other value (or absence) means
/// the built-in defaults supersede the file in memory.
pub fn honours_file(doc: &ConfigTable) -> bool {
    matches!(doc.get(USE_CONFIG_KEY), Some(ConfigValue::Bool(true)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
