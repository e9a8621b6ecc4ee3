//! In-memory key-value storage, the stand-in for browser local storage.

use log::debug;
use std::collections::HashMap;

use super::traits::{PersistenceAdapter, PersistenceError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a blob, e.g. a snapshot left behind by an earlier session
    pub fn with_entry(mut self, key: impl Into<String>, blob: impl Into<String>) -> Self {
        self.entries.insert(key.into(), blob.into());
        self
    }

    /// Raw blob currently stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of successful writes since creation
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl PersistenceAdapter for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), blob.to_string());
        self.writes += 1;
        debug!("Stored {} bytes under key '{}'", blob.len(), key);
        Ok(())
    }
}
