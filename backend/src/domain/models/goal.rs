use thiserror::Error;

use crate::storage::PersistenceError;

pub const MAX_TITLE_LENGTH: usize = 256;

#[derive(Debug, Error, PartialEq)]
pub enum GoalValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Title cannot exceed 256 characters")]
    TitleTooLong,
}

/// Outcome of a failed store operation; none of these are fatal
#[derive(Debug, Error)]
pub enum GoalStoreError {
    #[error("Invalid goal: {0}")]
    Validation(#[from] GoalValidationError),

    #[error("Goal not found: {0}")]
    NotFound(String),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Trimmed title, or the reason it is unusable
pub fn validate_title(title: &str) -> Result<String, GoalValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(GoalValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(GoalValidationError::TitleTooLong);
    }
    Ok(title.to_string())
}

/// Blank descriptions are stored as absent
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
