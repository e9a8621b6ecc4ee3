/// Test utilities: RAII temp directories and test doubles for the store's
/// two collaborators.
///
/// The temp directory is removed when the environment is dropped, even if the
/// test panics.
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use crate::domain::observability::{GoalEvent, ObservabilitySink};
use crate::storage::{FileStorage, MemoryStorage, PersistenceAdapter, PersistenceError};

pub struct TestEnvironment {
    /// Kept alive until drop so the directory is not removed early
    _temp_dir: TempDir,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::with_prefix("bucket-list-test")?;
        let base_path = temp_dir.path().to_path_buf();
        Ok(Self {
            _temp_dir: temp_dir,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.base_path).expect("Failed to open file storage")
    }
}

/// Captures every event it is given
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<GoalEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<GoalEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(GoalEvent::action).collect()
    }
}

impl ObservabilitySink for RecordingSink {
    fn record(&self, event: &GoalEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Memory storage that can be told to fail reads or writes
#[derive(Default)]
pub struct FlakyStorage {
    pub inner: MemoryStorage,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl PersistenceAdapter for FlakyStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if self.fail_reads {
            return Err(PersistenceError::Read {
                key: key.to_string(),
                reason: "storage unavailable".to_string(),
            });
        }
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Write {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.inner.write(key, blob)
    }
}
