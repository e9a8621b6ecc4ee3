//! # Storage Module
//!
//! Persistence for the goal collection. The store only needs a key-value
//! blob backend, so implementations stay thin:
//!
//! - **memory**: `HashMap`-backed storage, the local-storage analog used by
//!   embedded frontends and tests
//! - **file**: one JSON file per key with atomic temp-file writes
//! - **snapshot**: encoding and validation of the serialized collection

pub mod file;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use traits::{PersistenceAdapter, PersistenceError};
