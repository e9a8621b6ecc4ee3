//! Snapshot codec: the full goal collection as a JSON array.
//!
//! ```json
//! [
//!   {
//!     "id": "7f0c2a3e-...",
//!     "title": "Walk the Camino",
//!     "description": null,
//!     "category": "adventure",
//!     "deadline": "2027-09-01",
//!     "progress": 35,
//!     "completed": false,
//!     "createdAt": "2026-10-01T08:15:00Z",
//!     "updatedAt": "2026-10-12T19:02:11Z"
//!   }
//! ]
//! ```

use shared::GoalRecord;
use std::collections::HashSet;

use super::traits::PersistenceError;
use crate::domain::models::goal::validate_title;

pub fn encode(goals: &[GoalRecord]) -> Result<String, PersistenceError> {
    serde_json::to_string(goals).map_err(|e| PersistenceError::Encode(e.to_string()))
}

/// Decode and validate a snapshot. Record order is preserved.
pub fn decode(blob: &str) -> Result<Vec<GoalRecord>, PersistenceError> {
    let goals: Vec<GoalRecord> =
        serde_json::from_str(blob).map_err(|e| PersistenceError::Malformed(e.to_string()))?;

    let mut seen = HashSet::with_capacity(goals.len());
    for goal in &goals {
        if !seen.insert(goal.id.as_str()) {
            return Err(PersistenceError::DuplicateId(goal.id.clone()));
        }
        if goal.updated_at < goal.created_at {
            return Err(PersistenceError::InvalidTimestamps(goal.id.clone()));
        }
        if let Err(e) = validate_title(&goal.title) {
            return Err(PersistenceError::InvalidRecord {
                id: goal.id.clone(),
                reason: e.to_string(),
            });
        }
    }

    Ok(goals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use shared::{Category, Progress};

    fn goal(id: &str, category: Category) -> GoalRecord {
        let created = Utc.with_ymd_and_hms(2026, 10, 1, 8, 15, 0).unwrap();
        GoalRecord {
            id: id.to_string(),
            title: format!("Goal {}", id),
            description: None,
            category,
            deadline: NaiveDate::from_ymd_opt(2027, 9, 1),
            progress: Progress::new(35).unwrap(),
            completed: false,
            created_at: created,
            updated_at: created + Duration::days(11),
        }
    }

    #[test]
    fn test_decode_preserves_order_and_fields() {
        let goals = vec![goal("b", Category::Adventure), goal("a", Category::Family)];
        let decoded = decode(&encode(&goals).unwrap()).unwrap();
        assert_eq!(decoded, goals);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(decode("{not json"), Err(PersistenceError::Malformed(_))));
        assert!(matches!(decode("{\"id\":1}"), Err(PersistenceError::Malformed(_))));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let blob = encode(&[goal("a", Category::Travel)])
            .unwrap()
            .replace("\"travel\"", "\"gardening\"");
        assert!(matches!(decode(&blob), Err(PersistenceError::Malformed(_))));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let blob = encode(&[goal("a", Category::Travel), goal("a", Category::Career)]).unwrap();
        match decode(&blob) {
            Err(PersistenceError::DuplicateId(id)) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_blank_title() {
        let mut blank = goal("a", Category::Personal);
        blank.title = "   ".to_string();
        let blob = encode(&[goal("b", Category::Travel), blank]).unwrap();
        match decode(&blob) {
            Err(PersistenceError::InvalidRecord { id, .. }) => assert_eq!(id, "a"),
            other => panic!("expected invalid record error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_overlong_title() {
        let mut long = goal("a", Category::Personal);
        long.title = "x".repeat(300);
        let blob = encode(&[long]).unwrap();
        assert!(matches!(decode(&blob), Err(PersistenceError::InvalidRecord { .. })));
    }

    #[test]
    fn test_rejects_updated_before_created() {
        let mut broken = goal("a", Category::Learning);
        broken.updated_at = broken.created_at - Duration::seconds(1);
        let blob = encode(&[broken]).unwrap();
        assert!(matches!(decode(&blob), Err(PersistenceError::InvalidTimestamps(_))));
    }
}
