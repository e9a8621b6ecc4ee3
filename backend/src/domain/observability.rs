//! # Observability
//!
//! The single seam through which the goal store reports user actions. A sink
//! receives discrete events and may forward them anywhere (log lines,
//! structured tracing, a remote collector). Sinks return nothing, so store
//! behavior never depends on whether an event was delivered.
//!
//! ## Available sinks
//!
//! - [`NoopSink`]: drops every event
//! - [`LogSink`]: plain log lines through the `log` facade
//! - [`TracingSink`]: structured events inside a `goal_action` span

use shared::{Category, CategoryFilter};
use std::sync::Arc;

/// Something the store did on behalf of the user
#[derive(Debug, Clone, PartialEq)]
pub enum GoalEvent {
    Loaded { count: usize },
    LoadFailed { reason: String },
    GoalAdded { id: String, category: Category },
    GoalUpdated { id: String, category: Category },
    GoalDeleted { id: String },
    CompletionToggled { id: String, completed: bool, progress: u8 },
    Filtered { filter: CategoryFilter, matched: usize },
    PersistFailed { action: &'static str, reason: String },
    SnapshotImported { count: usize },
}

impl GoalEvent {
    /// Short action name used as the event key
    pub fn action(&self) -> &'static str {
        match self {
            GoalEvent::Loaded { .. } => "load",
            GoalEvent::LoadFailed { .. } => "load_failed",
            GoalEvent::GoalAdded { .. } => "add",
            GoalEvent::GoalUpdated { .. } => "update",
            GoalEvent::GoalDeleted { .. } => "delete",
            GoalEvent::CompletionToggled { .. } => "toggle_complete",
            GoalEvent::Filtered { .. } => "filter",
            GoalEvent::PersistFailed { .. } => "persist_failed",
            GoalEvent::SnapshotImported { .. } => "import",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, GoalEvent::LoadFailed { .. } | GoalEvent::PersistFailed { .. })
    }
}

pub trait ObservabilitySink: Send + Sync {
    fn record(&self, event: &GoalEvent);
}

impl<S: ObservabilitySink + ?Sized> ObservabilitySink for Arc<S> {
    fn record(&self, event: &GoalEvent) {
        (**self).record(event)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ObservabilitySink for NoopSink {
    fn record(&self, _event: &GoalEvent) {}
}

/// Plain `[goals] action key=value` log lines
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ObservabilitySink for LogSink {
    fn record(&self, event: &GoalEvent) {
        let line = describe(event);
        if event.is_failure() {
            log::warn!(target: "goals", "[goals] {}", line);
        } else {
            log::info!(target: "goals", "[goals] {}", line);
        }
    }
}

fn describe(event: &GoalEvent) -> String {
    let action = event.action();
    match event {
        GoalEvent::Loaded { count } | GoalEvent::SnapshotImported { count } => {
            format!("{} count={}", action, count)
        }
        GoalEvent::LoadFailed { reason } => format!("{} reason=\"{}\"", action, reason),
        GoalEvent::GoalAdded { id, category } | GoalEvent::GoalUpdated { id, category } => {
            format!("{} id={} category={}", action, id, category)
        }
        GoalEvent::GoalDeleted { id } => format!("{} id={}", action, id),
        GoalEvent::CompletionToggled { id, completed, progress } => format!(
            "{} id={} completed={} progress={}",
            action, id, completed, progress
        ),
        GoalEvent::Filtered { filter, matched } => {
            format!("{} category={} matched={}", action, filter, matched)
        }
        GoalEvent::PersistFailed { action: failed, reason } => {
            format!("{} during={} reason=\"{}\"", action, failed, reason)
        }
    }
}

/// Structured events, one `goal_action` span per event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ObservabilitySink for TracingSink {
    fn record(&self, event: &GoalEvent) {
        let span = tracing::info_span!("goal_action", action = event.action());
        let _entered = span.enter();

        match event {
            GoalEvent::Loaded { count } => tracing::info!(count, "goals loaded"),
            GoalEvent::LoadFailed { reason } => {
                tracing::warn!(reason = %reason, "goal snapshot unreadable, starting empty")
            }
            GoalEvent::GoalAdded { id, category } => {
                tracing::info!(goal.id = %id, goal.category = %category, "goal added")
            }
            GoalEvent::GoalUpdated { id, category } => {
                tracing::info!(goal.id = %id, goal.category = %category, "goal updated")
            }
            GoalEvent::GoalDeleted { id } => tracing::info!(goal.id = %id, "goal deleted"),
            GoalEvent::CompletionToggled { id, completed, progress } => tracing::info!(
                goal.id = %id,
                goal.completed = *completed,
                goal.progress = *progress,
                "goal completion toggled"
            ),
            GoalEvent::Filtered { filter, matched } => {
                tracing::debug!(filter = %filter, matched = *matched, "goal list filtered")
            }
            GoalEvent::PersistFailed { action, reason } => {
                tracing::error!(during = *action, reason = %reason, "goal snapshot write failed")
            }
            GoalEvent::SnapshotImported { count } => {
                tracing::info!(count = *count, "goal snapshot imported")
            }
        }
    }
}
