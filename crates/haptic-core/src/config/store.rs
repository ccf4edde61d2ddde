//! The process-wide configuration store.
//!
//! [`ConfigStore`] is the single authority for loaded configuration state and
//! disk persistence: loaded once at process start, handed `&mut` to every
//! component constructor (dependency injection — there is no global), and
//! flushed back to disk whenever an attach introduces at least one new
//! default. Create one instance per process; nothing enforces that, but two
//! stores over the same file will race on the last save.
//!
//! # Merge policy
//!
//! Existing stored values always win over code defaults; code defaults only
//! fill gaps. That gives schema evolution by accretion: a new attribute added
//! in code appears in the document on the next run without clobbering values
//! the user already edited, and without any migration step.
//!
//! # Concurrency
//!
//! Single-threaded and synchronous by design. The only blocking calls are
//! the document read at load time and the save-triggered write, both inline,
//! without retry or timeout. Concurrent *processes* sharing one document file
//! race on the final write — last save wins, no cross-process merge.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::attach::{type_identity, AttachOutcome, Attachable};
use crate::config::document::{
    default_document, honours_file, ConfigTable, ConfigValue, ValueKind, PRIVATE_PREFIX,
};

/// Default document file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Errors raised by configuration loading, persistence, and attachment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document file exists but is not a parseable nested mapping.
    ///
    /// Not recovered locally: silently discarding a document the user edited
    /// by hand would be surprising, so the process should fail fast.
    #[error("malformed config document at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A file system I/O error occurred reading or writing the document.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory document could not be serialized.
    #[error("failed to serialize config document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An existing document entry on the attach path is not a mapping.
    ///
    /// Overwriting it would destroy a user edit, so this is surfaced instead.
    #[error("config entry '{key}' is not a table; cannot attach component '{component}'")]
    EntryNotATable { key: String, component: String },
}

/// In-memory mirror of the configuration document file.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    document: ConfigTable,
}

impl ConfigStore {
    /// Loads the document from `path`.
    ///
    /// A missing file is not an error: the built-in default document is
    /// substituted. A present file whose `use-config` key is not literally
    /// `true` is parsed but then superseded in memory by the defaults (the
    /// file itself is left alone until the next save overwrites it).
    ///
    /// # Errors
    ///
    /// [`ConfigError::Malformed`] if the file exists but does not parse as a
    /// nested mapping, [`ConfigError::Io`] for read failures other than
    /// "not found".
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let document = match std::fs::read_to_string(&path) {
            Ok(raw) => {
                let table: ConfigTable =
                    serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
                        path: path.clone(),
                        source,
                    })?;
                if honours_file(&table) {
                    debug!(path = %path.display(), "loaded config document");
                    table
                } else {
                    debug!(
                        path = %path.display(),
                        "use-config is false or absent; starting from defaults"
                    );
                    default_document()
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config document; starting from defaults");
                default_document()
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        Ok(Self { path, document })
    }

    /// Path of the document file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory document.
    pub fn document(&self) -> &ConfigTable {
        &self.document
    }

    /// Mutable access to the in-memory document.
    ///
    /// Do not mutate the document without following up with [`save`] — the
    /// in-memory mapping is the sole point of truth for persistence, and
    /// attach only runs at component construction.
    ///
    /// [`save`]: ConfigStore::save
    pub fn document_mut(&mut self) -> &mut ConfigTable {
        &mut self.document
    }

    /// Serializes the document back to its file, fully overwriting it.
    ///
    /// The write goes to a sibling temp file which is then renamed into
    /// place, so a crash mid-write never leaves a truncated document behind.
    /// Saving twice without intervening mutation produces byte-identical
    /// output (`BTreeMap` key order is stable).
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] for write failures (permissions, disk full);
    /// there is no retry.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut content = serde_json::to_string_pretty(&self.document)?;
        content.push('\n');

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(|source| ConfigError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), "saved config document");
        Ok(())
    }

    /// Binds a component's declared attributes to the document.
    ///
    /// Resolves (creating as needed) the entry at
    /// `document[section][identity]`, then for every declared attribute that
    /// is eligible and not marked private:
    ///
    /// - absent from the entry → the code default is written into the
    ///   document (`defaulted`);
    /// - present in the entry → the stored value overwrites the component's
    ///   default (`restored`).
    ///
    /// The document is persisted iff at least one default was newly added.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EntryNotATable`] if an existing entry on the resolve
    /// path is not a mapping, or any [`save`](ConfigStore::save) error when
    /// persistence triggers.
    pub fn attach<C: Attachable>(&mut self, component: &mut C) -> Result<AttachOutcome, ConfigError> {
        let name = component
            .identity()
            .unwrap_or_else(|| type_identity::<C>());
        let section = component.section().to_string();

        let entry = resolve_entry(&mut self.document, &section, &name)?;

        let mut outcome = AttachOutcome::default();
        for (attr, value) in component.attributes_mut().iter_mut() {
            if attr.starts_with(PRIVATE_PREFIX) {
                continue;
            }
            if !value.is_attachable() {
                debug!(component = %name, attribute = %attr, "skipping ineligible attribute");
                continue;
            }
            match entry.get(attr.as_str()) {
                None => {
                    entry.insert(attr.clone(), value.clone());
                    outcome.defaulted += 1;
                }
                Some(stored) => {
                    *value = restore_value(stored, value.kind());
                    outcome.restored += 1;
                }
            }
        }

        if outcome.defaulted > 0 {
            self.save()?;
        }

        debug!(
            component = %name,
            section = %section,
            defaulted = outcome.defaulted,
            restored = outcome.restored,
            "attached component"
        );
        Ok(outcome)
    }
}

/// Resolves (creating as needed) the component table at
/// `document[section][name]`; an empty section maps directly under the root.
fn resolve_entry<'doc>(
    document: &'doc mut ConfigTable,
    section: &str,
    name: &str,
) -> Result<&'doc mut ConfigTable, ConfigError> {
    let table = if section.is_empty() {
        document
    } else {
        match document
            .entry(section.to_string())
            .or_insert_with(|| ConfigValue::Map(ConfigTable::new()))
        {
            ConfigValue::Map(table) => table,
            _ => {
                return Err(ConfigError::EntryNotATable {
                    key: section.to_string(),
                    component: name.to_string(),
                })
            }
        }
    };

    match table
        .entry(name.to_string())
        .or_insert_with(|| ConfigValue::Map(ConfigTable::new()))
    {
        ConfigValue::Map(table) => Ok(table),
        _ => Err(ConfigError::EntryNotATable {
            key: name.to_string(),
            component: name.to_string(),
        }),
    }
}

/// Applies the declared type tag to a stored value.
///
/// JSON arrays always load as `Seq`; when the component declared a `Tuple`,
/// the restored value keeps that tag. Everything else is restored as stored.
fn restore_value(stored: &ConfigValue, declared: ValueKind) -> ConfigValue {
    match (stored, declared) {
        (ConfigValue::Seq(items), ValueKind::Tuple) => ConfigValue::Tuple(items.clone()),
        _ => stored.clone(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::attach::AttributeSet;
    use crate::config::document::USE_CONFIG_KEY;

    /// Minimal attachable component used throughout these tests.
    struct Widget {
        section: String,
        identity: Option<String>,
        attrs: AttributeSet,
    }

    impl Widget {
        fn new() -> Self {
            Self {
                section: String::new(),
                identity: None,
                attrs: AttributeSet::new().with("speed", 1.0).with("enabled", true),
            }
        }

        fn in_section(section: &str) -> Self {
            Self {
                section: section.to_string(),
                ..Self::new()
            }
        }

        fn named(identity: &str) -> Self {
            Self {
                identity: Some(identity.to_string()),
                ..Self::new()
            }
        }
    }

    impl Attachable for Widget {
        fn section(&self) -> &str {
            &self.section
        }

        fn identity(&self) -> Option<String> {
            self.identity.clone()
        }

        fn attributes(&self) -> &AttributeSet {
            &self.attrs
        }

        fn attributes_mut(&mut self) -> &mut AttributeSet {
            &mut self.attrs
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::load(dir.path().join(DEFAULT_CONFIG_FILE)).unwrap()
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    #[test]
    fn test_load_missing_file_substitutes_defaults() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let store = store_in(&dir);

        // Assert: the default document, and nothing written yet
        assert_eq!(
            store.document().get(USE_CONFIG_KEY),
            Some(&ConfigValue::Bool(false))
        );
        assert!(!store.path().exists());
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        // Arrange: a file that is not JSON at all
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "{{{ not json").unwrap();

        // Act
        let result = ConfigStore::load(&path);

        // Assert
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_load_non_mapping_document_is_an_error() {
        // A top-level array parses as JSON but is not the expected shape.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let result = ConfigStore::load(&path);

        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_load_discards_file_when_use_config_absent() {
        // Arrange: a valid document with values but no use-config key
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, r#"{ "widget": { "speed": 9.9 } }"#).unwrap();

        // Act
        let store = ConfigStore::load(&path).unwrap();

        // Assert: the on-disk content is superseded in memory
        assert!(store.document().get("widget").is_none());
    }

    // ── Saving ────────────────────────────────────────────────────────────────

    #[test]
    fn test_save_is_byte_idempotent() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.attach(&mut Widget::new()).unwrap();

        // Act: save twice with no intervening mutation
        store.save().unwrap();
        let first = std::fs::read(store.path()).unwrap();
        store.save().unwrap();
        let second = std::fs::read(store.path()).unwrap();

        // Assert
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save().unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from(DEFAULT_CONFIG_FILE)]);
    }

    #[test]
    fn test_save_to_unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten by the rename target file.
        let path = dir.path().join("config.json");
        std::fs::create_dir(&path).unwrap();

        let store = ConfigStore {
            path,
            document: default_document(),
        };
        let result = store.save();

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    // ── Attach: defaulting ────────────────────────────────────────────────────

    #[test]
    fn test_attach_to_empty_store_defaults_every_attribute() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let mut widget = Widget::new();

        // Act
        let outcome = store.attach(&mut widget).unwrap();

        // Assert: both attributes defaulted, component untouched
        assert_eq!(outcome, AttachOutcome { defaulted: 2, restored: 0 });
        assert_eq!(widget.attrs.float("speed"), Some(1.0));
        assert_eq!(widget.attrs.bool("enabled"), Some(true));
    }

    #[test]
    fn test_attach_with_new_defaults_persists_the_document() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        // Act
        store.attach(&mut Widget::new()).unwrap();

        // Assert: the file now exists and contains the widget entry
        let raw = std::fs::read_to_string(store.path()).unwrap();
        let doc: ConfigTable = serde_json::from_str(&raw).unwrap();
        let entry = doc.get("widget").and_then(ConfigValue::as_table).unwrap();
        assert_eq!(entry.get("speed"), Some(&ConfigValue::Float(1.0)));
        assert_eq!(entry.get("enabled"), Some(&ConfigValue::Bool(true)));
    }

    #[test]
    fn test_second_attach_is_idempotent() {
        // Attaching twice in sequence with no mutation in between must
        // restore every eligible attribute and default none.
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.attach(&mut Widget::new()).unwrap();

        let outcome = store.attach(&mut Widget::new()).unwrap();

        assert_eq!(outcome, AttachOutcome { defaulted: 0, restored: 2 });
    }

    #[test]
    fn test_second_attach_does_not_rewrite_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.attach(&mut Widget::new()).unwrap();
        let before = std::fs::metadata(store.path()).unwrap().modified().unwrap();

        store.attach(&mut Widget::new()).unwrap();

        let after = std::fs::metadata(store.path()).unwrap().modified().unwrap();
        assert_eq!(before, after, "no new defaults means no save");
    }

    // ── Attach: restoring ─────────────────────────────────────────────────────

    #[test]
    fn test_attach_restores_stored_value_over_code_default() {
        // Arrange: a hand-edited document with use-config on and a stored
        // speed for section "s", component "widget"
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{ "use-config": true, "s": { "widget": { "speed": 2.5, "enabled": true } } }"#,
        )
        .unwrap();
        let mut store = ConfigStore::load(&path).unwrap();
        let mut widget = Widget::in_section("s");

        // Act
        let outcome = store.attach(&mut widget).unwrap();

        // Assert: stored value wins over the 1.0 code default
        assert_eq!(outcome, AttachOutcome { defaulted: 0, restored: 2 });
        assert_eq!(widget.attrs.float("speed"), Some(2.5));
    }

    #[test]
    fn test_attach_ignores_disk_values_when_use_config_is_false() {
        // Arrange: values on disk, but the switch is off
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{ "use-config": false, "widget": { "speed": 2.5, "enabled": false } }"#,
        )
        .unwrap();
        let mut store = ConfigStore::load(&path).unwrap();
        let mut widget = Widget::new();

        // Act
        let outcome = store.attach(&mut widget).unwrap();

        // Assert: the defaulted branch is taken for every attribute and the
        // component keeps its code defaults
        assert_eq!(outcome, AttachOutcome { defaulted: 2, restored: 0 });
        assert_eq!(widget.attrs.float("speed"), Some(1.0));
        assert_eq!(widget.attrs.bool("enabled"), Some(true));
    }

    #[test]
    fn test_attach_fills_gaps_without_touching_stored_values() {
        // Schema accretion: a new attribute appears in code after the
        // document already holds edited values.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, r#"{ "use-config": true, "widget": { "speed": 2.5 } }"#).unwrap();
        let mut store = ConfigStore::load(&path).unwrap();
        let mut widget = Widget::new(); // declares speed AND enabled

        let outcome = store.attach(&mut widget).unwrap();

        assert_eq!(outcome, AttachOutcome { defaulted: 1, restored: 1 });
        assert_eq!(widget.attrs.float("speed"), Some(2.5), "stored value kept");
        // The save triggered by the new default must preserve the edit.
        let raw = std::fs::read_to_string(store.path()).unwrap();
        let doc: ConfigTable = serde_json::from_str(&raw).unwrap();
        let entry = doc.get("widget").and_then(ConfigValue::as_table).unwrap();
        assert_eq!(entry.get("speed"), Some(&ConfigValue::Float(2.5)));
        assert_eq!(entry.get("enabled"), Some(&ConfigValue::Bool(true)));
    }

    #[test]
    fn test_attach_restores_declared_tuple_from_stored_array() {
        // Arrange: the document holds a plain JSON array; the component
        // declares the attribute as a fixed-size tuple.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{ "use-config": true, "probe": { "window": [3, 9] } }"#,
        )
        .unwrap();
        let mut store = ConfigStore::load(&path).unwrap();

        struct Probe {
            attrs: AttributeSet,
        }
        impl Attachable for Probe {
            fn attributes(&self) -> &AttributeSet {
                &self.attrs
            }
            fn attributes_mut(&mut self) -> &mut AttributeSet {
                &mut self.attrs
            }
        }
        let mut attrs = AttributeSet::new();
        attrs.declare(
            "window",
            ConfigValue::tuple(vec![ConfigValue::Int(1), ConfigValue::Int(2)]),
        );
        let mut probe = Probe { attrs };

        // Act
        let outcome = store.attach(&mut probe).unwrap();

        // Assert: restored with the Tuple tag, not as a Seq
        assert_eq!(outcome, AttachOutcome { defaulted: 0, restored: 1 });
        assert_eq!(
            probe.attrs.get("window"),
            Some(&ConfigValue::Tuple(vec![
                ConfigValue::Int(3),
                ConfigValue::Int(9)
            ]))
        );
    }

    // ── Attach: eligibility and namespacing ───────────────────────────────────

    #[test]
    fn test_attach_skips_private_and_ineligible_attributes() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        let mut widget = Widget::new();
        widget.attrs.declare("_scratch", 99); // private marker
        widget
            .attrs
            .declare("history", vec![ConfigValue::Int(1)]); // Seq: ineligible

        // Act
        let outcome = store.attach(&mut widget).unwrap();

        // Assert: only speed and enabled participate
        assert_eq!(outcome, AttachOutcome { defaulted: 2, restored: 0 });
        let entry = store
            .document()
            .get("widget")
            .and_then(ConfigValue::as_table)
            .unwrap();
        assert!(entry.get("_scratch").is_none());
        assert!(entry.get("history").is_none());
    }

    #[test]
    fn test_default_identity_is_lowercased_type_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.attach(&mut Widget::new()).unwrap();

        assert!(store.document().contains_key("widget"));
    }

    #[test]
    fn test_identity_overrides_claim_independent_slots() {
        // Two instances of the same type with distinct display strings must
        // persist to two entries, never merging values.
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        let mut a = Widget::named("motor-a");
        let mut b = Widget::named("motor-b");
        a.attrs.set("speed", 0.25);
        store.attach(&mut a).unwrap();
        store.attach(&mut b).unwrap();

        let slot_a = store
            .document()
            .get("motor-a")
            .and_then(ConfigValue::as_table)
            .unwrap();
        let slot_b = store
            .document()
            .get("motor-b")
            .and_then(ConfigValue::as_table)
            .unwrap();
        assert_eq!(slot_a.get("speed"), Some(&ConfigValue::Float(0.25)));
        assert_eq!(slot_b.get("speed"), Some(&ConfigValue::Float(1.0)));
        assert!(store.document().get("widget").is_none());
    }

    #[test]
    fn test_empty_section_nests_directly_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.attach(&mut Widget::new()).unwrap();
        store.attach(&mut Widget::in_section("monitors")).unwrap();

        assert!(store.document().contains_key("widget"));
        let section = store
            .document()
            .get("monitors")
            .and_then(ConfigValue::as_table)
            .unwrap();
        assert!(section.contains_key("widget"));
    }

    #[test]
    fn test_attach_over_non_table_entry_is_an_error() {
        // Arrange: the slot this component would claim holds a scalar the
        // user put there.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, r#"{ "use-config": true, "widget": 5 }"#).unwrap();
        let mut store = ConfigStore::load(&path).unwrap();

        // Act
        let result = store.attach(&mut Widget::new());

        // Assert
        assert!(matches!(
            result,
            Err(ConfigError::EntryNotATable { .. })
        ));
    }
}
