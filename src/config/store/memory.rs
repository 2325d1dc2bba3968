//! In-memory settings store.
//!
//! Useful for testing and for servers that do not persist bans across
//! restarts.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{SettingsError, SettingsStore};

/// In-memory settings store.
///
/// Values live only for the process lifetime.
///
/// # Example
///
/// ```
/// use rcond::config::store::{MemorySettings, SettingsStore};
///
/// let store = MemorySettings::new();
/// store.set("deny_mode", "1").unwrap();
/// assert!(store.get_bool("deny_mode", false));
/// ```
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemorySettings {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with values.
    pub fn with_values(values: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            values: RwLock::new(values.into_iter().collect()),
        }
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }

    fn supports_save(&self) -> bool {
        false
    }
}
