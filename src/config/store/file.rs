//! File-based settings store.
//!
//! Persists the settings map as a YAML file, rewritten atomically on every
//! change so a crash mid-write never loses the previous ban list.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, info};

use super::{SettingsError, SettingsStore};

/// File-backed settings store.
///
/// The full map is loaded at construction and rewritten (temp file, then
/// rename) after each [`SettingsStore::set`].
///
/// # Example
///
/// ```ignore
/// use rcond::config::store::FileSettings;
///
/// let store = FileSettings::open("/var/lib/rcond/settings.yaml")?;
/// ```
#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileSettings {
    /// Open a settings file, creating an empty store if it does not exist.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, SettingsError> {
        let path = path.into();

        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_yaml::from_str(&contents)
                .map_err(|e| SettingsError::LoadFailed(format!("{}: {}", path.display(), e)))?
        } else {
            debug!(path = %path.display(), "settings file absent, starting empty");
            BTreeMap::new()
        };

        info!(
            path = %path.display(),
            entries = values.len(),
            "settings loaded"
        );

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// The backing file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        let contents = serde_yaml::to_string(values)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;

        // Write atomically (write to temp file, then rename)
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &contents)?;
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileSettings::open(dir.path().join("settings.yaml")).unwrap();
        assert_eq!(store.get("ban_list"), None);
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");

        let store = FileSettings::open(&path).unwrap();
        store.set("ban_list", "192.168.1.1 10.0.0.0").unwrap();
        store.set("deny_mode", "1").unwrap();
        drop(store);

        let reopened = FileSettings::open(&path).unwrap();
        assert_eq!(
            reopened.get("ban_list").as_deref(),
            Some("192.168.1.1 10.0.0.0")
        );
        assert!(reopened.get_bool("deny_mode", false));
    }

    #[test]
    fn test_file_store_overwrites_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");

        let store = FileSettings::open(&path).unwrap();
        store.set("ban_list", "1.2.3.4").unwrap();
        store.set("ban_list", "").unwrap();

        let reopened = FileSettings::open(&path).unwrap();
        assert_eq!(reopened.get("ban_list").as_deref(), Some(""));
    }

    #[test]
    fn test_file_store_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "- not\n- a\n- map\n").unwrap();

        let result = FileSettings::open(&path);
        assert!(matches!(result, Err(SettingsError::LoadFailed(_))));
    }

    #[test]
    fn test_file_store_name() {
        let dir = TempDir::new().unwrap();
        let store = FileSettings::open(dir.path().join("s.yaml")).unwrap();
        assert_eq!(store.name(), "file");
        assert!(store.supports_save());
    }
}
