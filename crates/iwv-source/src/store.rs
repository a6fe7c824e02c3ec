//! Persistent key/value storage backed by a single JSON file.
//!
//! Holds the product cache and the theme preference. Each call reads the
//! whole file and writes it back, which is fine for the handful of keys kept
//! here.

use std::fs;
use std::path::{Path, PathBuf};

use iwv_core::theme::{Theme, THEME_KEY};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads `key`. A missing file or key reads as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or parsed,
    /// or the stored value does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut entries = self.read_all()?;
        match entries.remove(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| StoreError::Value {
                    key: key.to_owned(),
                    source: e,
                }),
        }
    }

    /// Writes `value` under `key`, creating the file and its parent
    /// directories if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on I/O failure or if `value` cannot be encoded.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let encoded = serde_json::to_value(value).map_err(|e| StoreError::Value {
            key: key.to_owned(),
            source: e,
        })?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_owned(), encoded);
        self.write_all(&entries)
    }

    /// Deletes `key`. Returns `true` if it was present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on I/O failure.
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.write_all(&entries)?;
        Ok(true)
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    fn write_all(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let body = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })?;
        fs::write(&self.path, body).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Reads the persisted theme, falling back to light when unset or unreadable.
#[must_use]
pub fn load_theme(store: &LocalStore) -> Theme {
    match store.get::<String>(THEME_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring stored theme");
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read theme preference");
            Theme::default()
        }
    }
}

/// Persists the theme as `"dark"` or `"light"`.
///
/// # Errors
///
/// Returns [`StoreError`] if the store cannot be written.
pub fn save_theme(store: &LocalStore, theme: Theme) -> Result<(), StoreError> {
    store.set(THEME_KEY, &theme.to_string())
}
