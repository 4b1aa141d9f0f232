//! Key-value preference persistence.
//!
//! The store only ever holds the chosen language, but the interface is a plain
//! string map so the key stays configurable.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Preference storage is unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to access preference file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preference file '{}' is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistent string preferences.
pub trait PreferenceStore {
    /// # Errors
    /// Returns error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    /// Returns error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Preferences kept in memory for the lifetime of the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    /// Stored values.
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `(key, value)` pairs.
    #[must_use]
    pub fn with_values<K: Into<String>, V: Into<String>>(
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self { values: values.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences stored as a flat JSON object in a file.
///
/// Every call reads the file again, so several stores may share one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    /// Location of the JSON object.
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`; the file is created on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole map; a missing file is an empty map.
    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(source) => return Err(StorageError::Io { path: self.path.clone(), source }),
        };

        serde_json::from_str(&content)
            .map_err(|source| StorageError::Corrupt { path: self.path.clone(), source })
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        let content = serde_json::to_string_pretty(&values)
            .map_err(|source| StorageError::Corrupt { path: self.path.clone(), source })?;

        std::fs::write(&self.path, content)
            .map_err(|source| StorageError::Io { path: self.path.clone(), source })
    }
}
