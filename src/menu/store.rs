use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::BackdropError;

/// Key-value persistence for user preferences.
pub trait PreferenceStore {
    /// The stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Persist `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::Storage`] (or [`BackdropError::Io`]) when
    /// the backing store rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), BackdropError>;
}

/// Process-lifetime store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Store preloaded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        let _ = store.values.insert(key.to_owned(), value.to_owned());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackdropError> {
        let _ = self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Preferences kept as a flat TOML table on disk, rewritten on every set.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open `path`, starting empty when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::Io`] if the file exists but cannot be read,
    /// or [`BackdropError::Storage`] if it is not a string table.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, BackdropError> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content).map_err(|e| {
                BackdropError::Storage(format!("{}: {e}", path.display()))
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    /// [`open`](Self::open), starting empty (with a warning) when the
    /// existing file cannot be used. The next write replaces it.
    #[must_use]
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::open(path.clone()).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable preferences: {e}");
            Self {
                path,
                values: BTreeMap::new(),
            }
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackdropError> {
        let _ = self.values.insert(key.to_owned(), value.to_owned());
        let content = toml::to_string(&self.values)
            .map_err(|e| BackdropError::Storage(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryStore::with_entry("selectedPalette", "palette2");
        assert_eq!(store.get("selectedPalette").as_deref(), Some("palette2"));
        store.set("selectedPalette", "palette5").unwrap();
        assert_eq!(store.get("selectedPalette").as_deref(), Some("palette5"));
        assert_eq!(store.get("other"), None);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = std::env::temp_dir()
            .join(format!("backdrop-store-{}", std::process::id()));
        let path = dir.join("prefs.toml");
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("selectedPalette"), None);
        store.set("selectedPalette", "palette3").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("selectedPalette").as_deref(),
            Some("palette3")
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_store_rejects_non_string_tables() {
        let dir = std::env::temp_dir()
            .join(format!("backdrop-store-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prefs.toml");
        std::fs::write(&path, "[nested]\nx = 1\n").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, BackdropError::Storage(_)));
        let empty = FileStore::open_or_empty(&path);
        assert_eq!(empty.get("nested"), None);
        assert_eq!(empty.path(), path.as_path());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
