//! Settings storage backends.
//!
//! Trait-based abstraction over the store of named server settings (the
//! ban list, the filter mode flag), allowing different backends to be used
//! interchangeably.
//!
//! # Built-in Implementations
//!
//! - [`FileSettings`] - YAML file persisted on every write
//! - [`MemorySettings`] - in-memory only (for testing and ephemeral servers)
//!
//! The trait is synchronous: the admission check reads the mode flag on
//! every call and must never suspend, so backends use interior locking and
//! plain blocking I/O.

mod file;
mod memory;

pub use file::FileSettings;
pub use memory::MemorySettings;

use std::sync::Arc;
use thiserror::Error;

/// Settings storage error.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to load settings from the backend.
    #[error("failed to load settings: {0}")]
    LoadFailed(String),

    /// Failed to persist settings to the backend.
    #[error("failed to save settings: {0}")]
    SaveFailed(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Named-settings storage backend.
///
/// Implement this trait to add custom backends (e.g. a database or a
/// remote store). Implementations must be internally synchronized; readers
/// and writers may live on different threads in a multi-threaded host.
pub trait SettingsStore: Send + Sync {
    /// Read a setting value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a setting value, persisting if the backend supports it.
    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Whether writes to this backend survive a restart.
    fn supports_save(&self) -> bool {
        true
    }

    /// Read a boolean setting, with `default` when unset or unparseable.
    ///
    /// Accepts `1`/`0` alongside `true`/`false`; the console historically
    /// toggles flags with numeric values.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(value) => match value.trim() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => default,
            },
            None => default,
        }
    }
}

/// A shared, boxed settings store.
pub type SharedSettings = Arc<dyn SettingsStore>;
