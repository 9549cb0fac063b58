//! File-backed key/value storage
//!
//! Stores all entries as one flat JSON object:
//! ```json
//! { "token": "eyJhbGciOi...", "user": "{\"id\":1,\"name\":\"Ana\",\"email\":\"ana@example.com\"}" }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStorage;

/// File name used for the session inside the data directory
pub const SESSION_FILE: &str = "session.json";

/// JSON file storage
///
/// Every call reads the file afresh, so a value written by another process
/// is visible on the next read.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at `<data_dir>/session.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            Error::storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn discard(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            return self.discard();
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    /// Removing from an unreadable file discards the file, so a corrupt
    /// session can always be cleared.
    fn remove_item(&self, key: &str) -> Result<()> {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(Error::Storage(_)) => return self.discard(),
            Err(e) => return Err(e),
        };
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
