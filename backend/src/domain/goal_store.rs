//! Goal store domain logic for the bucket list tracker.
//!
//! The store owns the authoritative in-memory goal collection and keeps the
//! persisted snapshot consistent with it.
//!
//! ## Key Responsibilities
//!
//! - **Goal CRUD**: adding, updating, deleting and completing goals
//! - **Persistence**: writing the full collection after every mutation
//! - **Statistics**: totals, completion and overdue counts, average progress
//! - **Filtering**: category projections that keep insertion order
//!
//! ## Business Rules
//!
//! - Titles are required, trimmed, at most 256 characters
//! - Progress is clamped to 0-100 and snapped to steps of 5
//! - `completed` is an independent flag. It defaults to `progress == 100` on
//!   create; updates apply it only when the caller supplies it
//! - Toggling to complete forces progress to 100; toggling back leaves
//!   progress where it was
//! - A mutation only becomes visible once its snapshot was written

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::models::goal::{normalize_description, validate_title, GoalStoreError};
use crate::domain::observability::{GoalEvent, NoopSink, ObservabilitySink};
use crate::domain::statistics::compute_statistics;
use crate::storage::{snapshot, PersistenceAdapter, PersistenceError};
use shared::{CategoryFilter, GoalDraft, GoalPatch, GoalRecord, GoalStatistics, Progress};

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "bucket-list-goals";

pub type Result<T> = std::result::Result<T, GoalStoreError>;

/// Owner of the goal collection for one session
pub struct GoalStore<P: PersistenceAdapter> {
    adapter: P,
    storage_key: String,
    goals: Vec<GoalRecord>,
    sink: Box<dyn ObservabilitySink>,
}

impl<P: PersistenceAdapter> GoalStore<P> {
    /// Create an empty store using the default storage key.
    /// Call [`GoalStore::load`] to pick up a previous session.
    pub fn new(adapter: P) -> Self {
        Self::with_key(adapter, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(adapter: P, storage_key: impl Into<String>) -> Self {
        Self {
            adapter,
            storage_key: storage_key.into(),
            goals: Vec::new(),
            sink: Box::new(NoopSink),
        }
    }

    /// Replace the observability sink
    pub fn with_sink(mut self, sink: Box<dyn ObservabilitySink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn adapter(&self) -> &P {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut P {
        &mut self.adapter
    }

    /// Current collection in insertion order
    pub fn goals(&self) -> &[GoalRecord] {
        &self.goals
    }

    pub fn get(&self, id: &str) -> Option<&GoalRecord> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Replace the collection with the persisted snapshot.
    ///
    /// A missing snapshot yields an empty collection. An unreadable or
    /// malformed one also leaves the collection empty, and the error is
    /// returned so the caller can show a warning; the store stays usable.
    pub fn load(&mut self) -> Result<usize> {
        match self.read_snapshot() {
            Ok(goals) => {
                let count = goals.len();
                self.goals = goals;
                info!("Loaded {} goals from '{}'", count, self.storage_key);
                self.sink.record(&GoalEvent::Loaded { count });
                Ok(count)
            }
            Err(e) => {
                self.goals.clear();
                warn!("Could not load goals from '{}': {}. Starting empty.", self.storage_key, e);
                self.sink.record(&GoalEvent::LoadFailed {
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Create a goal and persist it.
    ///
    /// If the snapshot write fails the goal is not kept: the collection stays
    /// as it was and `GoalStoreError::Persistence` is returned.
    pub fn add(&mut self, draft: GoalDraft) -> Result<GoalRecord> {
        debug!("Adding goal: {:?}", draft);

        let title = validate_title(&draft.title)?;
        let progress = Progress::clamped(draft.progress);
        let now = Utc::now();

        let goal = GoalRecord {
            id: self.generate_id(),
            title,
            description: normalize_description(draft.description),
            category: draft.category,
            deadline: draft.deadline,
            progress,
            completed: draft.completed.unwrap_or_else(|| progress.is_complete()),
            created_at: now,
            updated_at: now,
        };

        let mut staged = self.goals.clone();
        staged.push(goal.clone());
        self.commit("add", staged)?;

        info!("Created goal {} ({})", goal.id, goal.category);
        self.sink.record(&GoalEvent::GoalAdded {
            id: goal.id.clone(),
            category: goal.category,
        });
        Ok(goal)
    }

    /// Merge `patch` into an existing goal.
    ///
    /// `patch.completed` is applied as given. It is never recomputed from
    /// progress here; the form boundary does that before calling.
    pub fn update(&mut self, id: &str, patch: GoalPatch) -> Result<GoalRecord> {
        debug!("Updating goal {}: {:?}", id, patch);

        let index = self.position(id)?;
        let mut goal = self.goals[index].clone();

        if let Some(title) = patch.title {
            goal.title = validate_title(&title)?;
        }
        if let Some(description) = patch.description {
            goal.description = normalize_description(description);
        }
        if let Some(category) = patch.category {
            goal.category = category;
        }
        if let Some(deadline) = patch.deadline {
            goal.deadline = deadline;
        }
        if let Some(progress) = patch.progress {
            goal.progress = Progress::clamped(progress);
        }
        if let Some(completed) = patch.completed {
            goal.completed = completed;
        }
        goal.updated_at = touch(goal.created_at);

        let mut staged = self.goals.clone();
        staged[index] = goal.clone();
        self.commit("update", staged)?;

        info!("Updated goal {}", goal.id);
        self.sink.record(&GoalEvent::GoalUpdated {
            id: goal.id.clone(),
            category: goal.category,
        });
        Ok(goal)
    }

    /// Remove a goal, returning what was removed
    pub fn delete(&mut self, id: &str) -> Result<GoalRecord> {
        let index = self.position(id)?;

        let mut staged = self.goals.clone();
        let removed = staged.remove(index);
        self.commit("delete", staged)?;

        info!("Deleted goal {}", removed.id);
        self.sink.record(&GoalEvent::GoalDeleted {
            id: removed.id.clone(),
        });
        Ok(removed)
    }

    /// Flip the completion flag.
    ///
    /// Marking complete forces progress to 100. Marking incomplete keeps the
    /// current progress, so a goal can end up incomplete at 100%.
    pub fn toggle_complete(&mut self, id: &str) -> Result<GoalRecord> {
        let index = self.position(id)?;
        let mut goal = self.goals[index].clone();

        goal.completed = !goal.completed;
        if goal.completed {
            goal.progress = Progress::COMPLETE;
        }
        goal.updated_at = touch(goal.created_at);

        let mut staged = self.goals.clone();
        staged[index] = goal.clone();
        self.commit("toggle_complete", staged)?;

        info!("Goal {} marked {}", goal.id, if goal.completed { "complete" } else { "incomplete" });
        self.sink.record(&GoalEvent::CompletionToggled {
            id: goal.id.clone(),
            completed: goal.completed,
            progress: goal.progress.value(),
        });
        Ok(goal)
    }

    pub fn statistics(&self) -> GoalStatistics {
        self.statistics_at(Utc::now())
    }

    /// Statistics with an explicit notion of "now" for the overdue count
    pub fn statistics_at(&self, now: DateTime<Utc>) -> GoalStatistics {
        compute_statistics(&self.goals, now)
    }

    /// Goals in the selected category, in insertion order
    pub fn filter_by_category(&self, filter: CategoryFilter) -> Vec<&GoalRecord> {
        let matched: Vec<&GoalRecord> = self
            .goals
            .iter()
            .filter(|g| filter.matches(g.category))
            .collect();

        self.sink.record(&GoalEvent::Filtered {
            filter,
            matched: matched.len(),
        });
        matched
    }

    /// The collection encoded exactly as it is persisted
    pub fn export_snapshot(&self) -> Result<String> {
        Ok(snapshot::encode(&self.goals)?)
    }

    /// Replace the whole collection with a previously exported snapshot.
    ///
    /// The blob is validated before anything changes; on any failure the
    /// current collection is kept.
    pub fn import_snapshot(&mut self, blob: &str) -> Result<usize> {
        let goals = snapshot::decode(blob)?;
        let count = goals.len();
        self.commit("import", goals)?;

        info!("Imported {} goals", count);
        self.sink.record(&GoalEvent::SnapshotImported { count });
        Ok(count)
    }

    fn read_snapshot(&self) -> std::result::Result<Vec<GoalRecord>, PersistenceError> {
        match self.adapter.read(&self.storage_key)? {
            Some(blob) => snapshot::decode(&blob),
            None => Ok(Vec::new()),
        }
    }

    /// Persist `staged` and make it the live collection only if the write
    /// succeeded
    fn commit(&mut self, action: &'static str, staged: Vec<GoalRecord>) -> Result<()> {
        match self.write_snapshot(&staged) {
            Ok(()) => {
                self.goals = staged;
                Ok(())
            }
            Err(e) => {
                error!("Failed to persist goals during {}: {}", action, e);
                self.sink.record(&GoalEvent::PersistFailed {
                    action,
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    fn write_snapshot(&mut self, goals: &[GoalRecord]) -> std::result::Result<(), PersistenceError> {
        let blob = snapshot::encode(goals)?;
        self.adapter.write(&self.storage_key, &blob)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| GoalStoreError::NotFound(id.to_string()))
    }

    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

// updatedAt never moves before createdAt, even if the clock stepped back
fn touch(created_at: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(created_at)
}
