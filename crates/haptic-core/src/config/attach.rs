//! The attachable-component contract.
//!
//! Any object can participate in shared configuration by declaring an
//! [`AttributeSet`] — an explicit list of `(name, default value)` pairs — and
//! implementing [`Attachable`]. There is no runtime reflection: only declared
//! attributes participate, and the declared default carries the type tag used
//! to reconcile against the document.
//!
//! The usual shape is a settings struct that owns an `AttributeSet`, declares
//! its defaults in its constructor, and calls
//! [`ConfigStore::attach`](crate::config::ConfigStore::attach) before it is
//! returned to the caller. After that the accessors reflect either the
//! document's stored values or the defaults just persisted.

use std::collections::{btree_map, BTreeMap};

use crate::config::document::ConfigValue;

/// The declared, persistable attributes of one component.
///
/// Attribute order is irrelevant to the merge; a `BTreeMap` keeps iteration
/// deterministic so attach outcomes and logs are stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    entries: BTreeMap<String, ConfigValue>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an attribute with its code default (builder form).
    pub fn with(mut self, name: impl Into<String>, default: impl Into<ConfigValue>) -> Self {
        self.declare(name, default);
        self
    }

    /// Declares an attribute with its code default.
    pub fn declare(&mut self, name: impl Into<String>, default: impl Into<ConfigValue>) {
        self.entries.insert(name.into(), default.into());
    }

    /// Current value of an attribute, if declared.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.entries.get(name)
    }

    /// Plain in-memory assignment.
    ///
    /// This does *not* touch the document: attach only runs at construction,
    /// and a component wanting a later change persisted must write it into
    /// the store's document and call `save()` explicitly.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ConfigValue::as_bool)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ConfigValue::as_int)
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ConfigValue::as_float)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ConfigValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ConfigValue> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, ConfigValue> {
        self.entries.iter_mut()
    }
}

/// The capability a component exposes to participate in shared configuration.
pub trait Attachable {
    /// Document section this component's entry is grouped under.
    ///
    /// The empty string (the default) places the entry directly under the
    /// document root.
    fn section(&self) -> &str {
        ""
    }

    /// Explicit identity override.
    ///
    /// `None` (the default) derives the namespace key from the lower-cased
    /// type name. Two instances of the same type share one configuration slot
    /// unless their constructors supply distinct override strings — the store
    /// does not disambiguate instances on its own.
    fn identity(&self) -> Option<String> {
        None
    }

    /// The declared attribute set, read by attach.
    fn attributes(&self) -> &AttributeSet;

    /// The declared attribute set, written by attach when restoring stored
    /// values.
    fn attributes_mut(&mut self) -> &mut AttributeSet;
}

/// Per-attribute outcome of an attach call.
///
/// `defaulted` counts attributes whose code default was newly written into
/// the document; `restored` counts attributes overwritten on the component
/// from stored document values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttachOutcome {
    pub defaulted: usize,
    pub restored: usize,
}

/// Derives the default namespace key for a component type: the final segment
/// of the Rust type name, lower-cased.
pub(crate) fn type_identity<C>() -> String {
    let full = std::any::type_name::<C>();
    let base = full.split('<').next().unwrap_or(full);
    let base = base.rsplit("::").next().unwrap_or(base);
    base.to_ascii_lowercase()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
