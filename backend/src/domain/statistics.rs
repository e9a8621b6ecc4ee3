//! Dashboard aggregates derived from the live goal collection.

use chrono::{DateTime, Utc};
use shared::{Category, CategoryCount, GoalRecord, GoalStatistics};

/// Recompute every aggregate from scratch; nothing here is cached
pub fn compute_statistics(goals: &[GoalRecord], now: DateTime<Utc>) -> GoalStatistics {
    let total = goals.len();
    let completed = goals.iter().filter(|g| g.completed).count();
    let overdue = goals.iter().filter(|g| g.is_overdue_at(now)).count();

    let average_progress = if total == 0 {
        0.0
    } else {
        let sum: u32 = goals.iter().map(|g| u32::from(g.progress.value())).sum();
        f64::from(sum) / total as f64
    };

    let by_category = Category::ALL
        .iter()
        .map(|&category| CategoryCount {
            category,
            count: goals.iter().filter(|g| g.category == category).count(),
        })
        .collect();

    GoalStatistics {
        total,
        completed,
        overdue,
        average_progress,
        by_category,
    }
}
