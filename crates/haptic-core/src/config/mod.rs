//! Configuration attachment and persistence.
//!
//! Independent components declare named, typed attributes that are persisted
//! in one shared JSON document. On first use an attribute's code default is
//! written into the document; on every later run (with `use-config` enabled)
//! the stored value wins and is written back onto the component. Adding a new
//! attribute to a component in code makes it appear in the document on the
//! next run without clobbering values the user already edited — schema
//! evolution by accretion, no migration step.

pub mod attach;
pub mod document;
pub mod store;

pub use attach::{AttachOutcome, Attachable, AttributeSet};
pub use document::{
    default_document, ConfigTable, ConfigValue, ValueKind, PRIVATE_PREFIX, USE_CONFIG_COMMENT_KEY,
    USE_CONFIG_KEY,
};
pub use store::{ConfigError, ConfigStore, DEFAULT_CONFIG_FILE};
