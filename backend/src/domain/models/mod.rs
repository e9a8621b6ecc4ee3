pub mod goal;

pub use goal::{GoalStoreError, GoalValidationError, MAX_TITLE_LENGTH};
