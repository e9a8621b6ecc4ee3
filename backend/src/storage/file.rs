//! # File Storage
//!
//! Desktop persistence backend: each key maps to one JSON file in the data
//! directory.
//!
//! ```text
//! data/
//! ├── config.yaml
//! └── bucket-list-goals.json    ← one file per storage key
//! ```
//!
//! Writes go to a temp file first and are then renamed over the target, so a
//! crash mid-write leaves the previous snapshot intact.

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::traits::{PersistenceAdapter, PersistenceError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_directory: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self, PersistenceError> {
        let base_directory = base_directory.as_ref().to_path_buf();
        if !base_directory.exists() {
            fs::create_dir_all(&base_directory)?;
            info!("Created data directory: {}", base_directory.display());
        }
        Ok(Self { base_directory })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the file backing `key`
    pub fn file_path(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }
        Ok(self.base_directory.join(format!("{}.json", key)))
    }
}

impl PersistenceAdapter for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.file_path(key)?;
        if !path.exists() {
            debug!("No snapshot at {:?}", path);
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| PersistenceError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        let path = self.file_path(key)?;
        let temp_path = path.with_extension("json.tmp");
        let write_error = |e: std::io::Error| PersistenceError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        };

        fs::write(&temp_path, blob).map_err(write_error)?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_error(e));
        }

        debug!("Wrote {} bytes to {:?}", blob.len(), path);
        Ok(())
    }
}
