//! JSON-file backed store
//!
//! Layout on disk is a single flat object, e.g. `{"theme":"light"}`.
//! Every write re-reads the file so entries written by other keys survive.
//! A file that no longer parses is an error on read but is replaced on write.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::DurableStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/theme-sync/storage.json`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::storage::FILENAME);
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store from {:?}", self.path))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse store JSON from {:?}", self.path))
    }

    /// Entries to write back over: unparseable contents start from empty
    fn entries_for_write(&self) -> Result<BTreeMap<String, String>> {
        match self.read_entries() {
            Ok(entries) => Ok(entries),
            Err(e) if self.path.exists() && e.downcast_ref::<serde_json::Error>().is_some() => {
                warn!(path = %self.path.display(), error = %e, "Store file is corrupt, rewriting it");
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&entries).context("Failed to serialize store")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write store to {:?}", self.path))?;

        debug!(path = %self.path.display(), key, value, "Wrote store entry");
        Ok(())
    }
}
