//! # Domain Module
//!
//! Business logic for the bucket list tracker, independent of any UI
//! framework or storage backend.
//!
//! ## Module Organization
//!
//! - **goal_store**: the goal collection, its mutations and persistence sync
//! - **statistics**: totals, completion, overdue and average progress
//! - **observability**: the event sink the store reports user actions to
//! - **models**: validation rules and error types
//!
//! ## Core Concepts
//!
//! - **Goal record**: one bucket-list entry
//! - **Snapshot**: the full serialized collection as persisted
//! - **Overdue**: a goal whose deadline has passed while still incomplete

pub mod goal_store;
pub mod models;
pub mod observability;
pub mod statistics;

pub use goal_store::{GoalStore, DEFAULT_STORAGE_KEY};
pub use models::{GoalStoreError, GoalValidationError};
pub use observability::{GoalEvent, LogSink, NoopSink, ObservabilitySink, TracingSink};
pub use statistics::compute_statistics;
