//! # Bucket List Backend
//!
//! Non-UI logic for the bucket list tracker: the goal store, its persistence
//! backends, configuration and logging.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (forms, goal list, dashboard)
//!     ↓
//! Domain Layer (GoalStore, statistics, observability sink)
//!     ↓
//! Storage Layer (PersistenceAdapter: memory, file)
//! ```
//!
//! The store is constructed once per session with its persistence adapter and
//! observability sink injected; there is no global state.

pub mod config;
pub mod domain;
pub mod logging;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{initialize_store, AppConfig, ObservabilityKind};
pub use domain::*;
pub use logging::init_logging;
pub use storage::*;
