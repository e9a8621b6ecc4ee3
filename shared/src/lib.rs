use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of goal categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Travel,
    Career,
    Fitness,
    #[default]
    Personal,
    Family,
    Learning,
    Creative,
    Adventure,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 8] = [
        Category::Travel,
        Category::Career,
        Category::Fitness,
        Category::Personal,
        Category::Family,
        Category::Learning,
        Category::Creative,
        Category::Adventure,
    ];

    /// Tag used in snapshots and filter strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Travel => "travel",
            Category::Career => "career",
            Category::Fitness => "fitness",
            Category::Personal => "personal",
            Category::Family => "family",
            Category::Learning => "learning",
            Category::Creative => "creative",
            Category::Adventure => "adventure",
        }
    }

    /// Human-readable name for badges and dropdowns
    pub fn label(&self) -> &'static str {
        match self {
            Category::Travel => "Travel",
            Category::Career => "Career",
            Category::Fitness => "Health & Fitness",
            Category::Personal => "Personal Growth",
            Category::Family => "Family & Relationships",
            Category::Learning => "Learning",
            Category::Creative => "Creative",
            Category::Adventure => "Adventure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == tag)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown goal category: {}", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

/// Goal progress percentage: 0..=100 in steps of 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "i64", into = "u8")]
pub struct Progress(u8);

impl Progress {
    pub const STEP: u8 = 5;
    pub const COMPLETE: Progress = Progress(100);

    /// Strict constructor used when reading stored data
    pub fn new(value: i64) -> Result<Self, ProgressError> {
        if !(0..=100).contains(&value) {
            return Err(ProgressError::OutOfRange(value));
        }
        if value % i64::from(Self::STEP) != 0 {
            return Err(ProgressError::NotOnStep(value));
        }
        Ok(Progress(value as u8))
    }

    /// Clamp raw input into range and snap it to the nearest step
    pub fn clamped(value: i64) -> Self {
        let step = i64::from(Self::STEP);
        let bounded = value.clamp(0, 100);
        let snapped = (bounded + step / 2) / step * step;
        Progress(snapped.min(100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_complete(self) -> bool {
        self.0 == 100
    }
}

impl TryFrom<i64> for Progress {
    type Error = ProgressError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Progress::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressError {
    OutOfRange(i64),
    NotOnStep(i64),
}

impl fmt::Display for ProgressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressError::OutOfRange(v) => write!(f, "Progress {} is outside 0-100", v),
            ProgressError::NotOnStep(v) => {
                write!(f, "Progress {} is not a multiple of {}", v, Progress::STEP)
            }
        }
    }
}

impl std::error::Error for ProgressError {}

/// One bucket-list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: Category,
    /// Target date, if any (YYYY-MM-DD)
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    pub progress: Progress,
    /// Independent flag; only defaulted from progress at the form boundary
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GoalRecord {
    /// True when the deadline has passed and the goal is still incomplete.
    ///
    /// A deadline date counts as passed once `now` is past midnight UTC at
    /// the start of that date.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        if self.completed {
            return false;
        }
        match self.deadline {
            Some(deadline) => deadline.and_time(NaiveTime::MIN).and_utc() < now,
            None => false,
        }
    }
}

/// Input for creating a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// Raw percentage; clamped and snapped by the store
    #[serde(default)]
    pub progress: i64,
    /// Explicit completion flag; defaults to `progress == 100` when absent
    #[serde(default)]
    pub completed: Option<bool>,
}

impl GoalDraft {
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            category,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_progress(mut self, progress: i64) -> Self {
        self.progress = progress;
        self
    }
}

/// Partial update for an existing goal. `None` leaves a field untouched.
///
/// `description` and `deadline` are doubly optional so a caller can clear
/// them: `Some(None)` removes the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present_field", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "present_field", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl GoalPatch {
    pub fn is_empty(&self) -> bool {
        *self == GoalPatch::default()
    }
}

// A field that is present (even as null) becomes Some(..)
fn present_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Raw values as submitted by the add/edit goal form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalForm {
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Date input text, `YYYY-MM-DD` or blank
    pub deadline: String,
    pub progress: i64,
}

impl GoalForm {
    /// Build a create request; completion follows the progress slider
    pub fn into_draft(self) -> Result<GoalDraft, DeadlineParseError> {
        let deadline = parse_deadline(&self.deadline)?;
        let completed = Progress::clamped(self.progress).is_complete();
        Ok(GoalDraft {
            title: self.title,
            description: non_blank(self.description),
            category: self.category,
            deadline,
            progress: self.progress,
            completed: Some(completed),
        })
    }

    /// Build an edit request carrying every form field, including the
    /// completion flag computed from the progress slider
    pub fn into_patch(self) -> Result<GoalPatch, DeadlineParseError> {
        let deadline = parse_deadline(&self.deadline)?;
        let completed = Progress::clamped(self.progress).is_complete();
        Ok(GoalPatch {
            title: Some(self.title),
            description: Some(non_blank(self.description)),
            category: Some(self.category),
            deadline: Some(deadline),
            progress: Some(self.progress),
            completed: Some(completed),
        })
    }

    /// Pre-fill the edit form from a stored goal
    pub fn from_record(record: &GoalRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone().unwrap_or_default(),
            category: record.category,
            deadline: record
                .deadline
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            progress: i64::from(record.progress.value()),
        }
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn parse_deadline(text: &str) -> Result<Option<NaiveDate>, DeadlineParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DeadlineParseError(text.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineParseError(pub String);

impl fmt::Display for DeadlineParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid deadline '{}', expected YYYY-MM-DD", self.0)
    }
}

impl std::error::Error for DeadlineParseError {}

/// Category selection for the goal list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

/// Number of goals in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Aggregates shown in the dashboard header, recomputed on every read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatistics {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
    /// Mean progress over all goals (0 when there are none)
    pub average_progress: f64,
    pub by_category: Vec<CategoryCount>,
}

impl GoalStatistics {
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}
