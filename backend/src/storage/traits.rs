//! # Storage Traits
//!
//! The persistence contract the goal store depends on. A backend only has to
//! read and write one whole blob per key; the store never issues partial or
//! delta writes.

use thiserror::Error;

/// Errors raised while reading, writing or decoding a persisted snapshot
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to read snapshot '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to write snapshot '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("Snapshot data is malformed: {0}")]
    Malformed(String),

    #[error("Snapshot contains duplicate goal id: {0}")]
    DuplicateId(String),

    #[error("Goal {0} was updated before it was created")]
    InvalidTimestamps(String),

    #[error("Goal {id} is invalid: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Failed to encode snapshot: {0}")]
    Encode(String),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key-value blob store holding the serialized goal collection
///
/// Writes are all-or-nothing: after a failed `write` the previously stored
/// blob must still be readable unchanged.
pub trait PersistenceAdapter {
    /// Read the blob stored under `key`, `None` if nothing was ever written
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the blob stored under `key`
    fn write(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError>;
}
