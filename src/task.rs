//! Task record and field types.
//!
//! A task is a titled, described, dated, prioritized unit of work. Tasks have
//! no identifier of their own; they are referenced by 1-based display index
//! within the [`TaskStore`](crate::store::TaskStore).
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use taskdeck::task::{Priority, Task};
//!
//! let task = Task::new(
//!     "Buy milk",
//!     "2 liters",
//!     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     Priority::Low,
//! );
//! assert_eq!(
//!     task.to_string(),
//!     "Title: Buy milk, Description: 2 liters, Due Date: 1/1/2025, Priority: Low"
//! );
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task priority level.
///
/// The textual form is case-sensitive: only "Low", "Medium", and "High"
/// parse, and the persisted file stores exactly those strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Can wait
    Low,
    /// Normal urgency
    Medium,
    /// Needs attention soon
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// Error returned when parsing an invalid priority string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePriorityError {
    input: String,
}

impl fmt::Display for ParsePriorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "priority must be 'Low', 'Medium' or 'High', got: '{}'",
            self.input
        )
    }
}

impl std::error::Error for ParsePriorityError {}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    // Case-sensitive on purpose: the stored form and the accepted input are
    // the same three strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            _ => Err(ParsePriorityError {
                input: s.to_string(),
            }),
        }
    }
}

/// A tracked unit of work.
///
/// Serializes to the persisted-file object form: `title`, `description`,
/// `dueDate` (ISO-8601 date string), `priority`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Short name shown in listings; never empty
    pub title: String,
    /// Free-form detail; never empty
    pub description: String,
    /// Calendar date the task is due
    pub due_date: NaiveDate,
    /// Priority level
    pub priority: Priority,
}

impl Task {
    /// Create a new task.
    ///
    /// The shell validates non-emptiness of `title` and `description` before
    /// constructing a task; the store trusts its inputs.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date,
            priority,
        }
    }

    /// Apply a partial update, leaving unset fields untouched.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Description: {}, Due Date: {}, Priority: {}",
            self.title,
            self.description,
            // Short-date form without zero padding, e.g. 1/1/2025
            self.due_date.format("%-m/%-d/%Y"),
            self.priority
        )
    }
}

/// Partial update for a task.
///
/// `None` means "keep the current value", the blank-input convention of the
/// edit flow. An empty patch is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

impl TaskPatch {
    /// Create an empty patch (keeps every field).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
    }

    /// Set a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a new due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set a new priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task::new(
            "Buy milk",
            "2 liters",
            NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            Priority::Low,
        )
    }

    #[test]
    fn test_priority_parse_exact_strings() {
        assert_eq!("Low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
    }

    #[test]
    fn test_priority_parse_is_case_sensitive() {
        assert!("low".parse::<Priority>().is_err());
        assert!("LOW".parse::<Priority>().is_err());
        assert!("medium".parse::<Priority>().is_err());
        assert!("hIgh".parse::<Priority>().is_err());
        assert!("".parse::<Priority>().is_err());
        assert!("Urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_parse_error_message() {
        let err = "low".parse::<Priority>().unwrap_err();
        assert!(err.to_string().contains("'low'"));
        assert!(err.to_string().contains("'Low', 'Medium' or 'High'"));
    }

    #[test]
    fn test_priority_display_roundtrips_through_parse() {
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(priority.to_string().parse::<Priority>().unwrap(), priority);
        }
    }

    #[test]
    fn test_task_display_format() {
        assert_eq!(
            sample_task().to_string(),
            "Title: Buy milk, Description: 2 liters, Due Date: 1/1/2025, Priority: Low"
        );
    }

    #[test]
    fn test_task_display_drops_leading_zeros_in_date() {
        let task = Task::new(
            "Review budget",
            "Q4 numbers",
            NaiveDate::from_ymd_opt(2025, 11, 23).expect("valid date"),
            Priority::High,
        );
        assert!(task.to_string().contains("Due Date: 11/23/2025"));
    }

    #[test]
    fn test_task_serializes_with_camel_case_keys_and_iso_date() {
        let json = serde_json::to_string(&sample_task()).expect("serialize");
        assert!(json.contains("\"title\":\"Buy milk\""));
        assert!(json.contains("\"description\":\"2 liters\""));
        assert!(json.contains("\"dueDate\":\"2025-01-01\""));
        assert!(json.contains("\"priority\":\"Low\""));
    }

    #[test]
    fn test_task_deserializes_from_persisted_form() {
        let json = r#"{
            "title": "Buy milk",
            "description": "2 liters",
            "dueDate": "2025-01-01",
            "priority": "Low"
        }"#;
        let task: Task = serde_json::from_str(json).expect("deserialize");
        assert_eq!(task, sample_task());
    }

    #[test]
    fn test_task_rejects_unknown_priority_string() {
        let json = r#"{
            "title": "Buy milk",
            "description": "2 liters",
            "dueDate": "2025-01-01",
            "priority": "urgent"
        }"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_patch_apply_empty_keeps_all_fields() {
        let mut task = sample_task();
        task.apply(TaskPatch::new());
        assert_eq!(task, sample_task());
    }

    #[test]
    fn test_patch_apply_title_only() {
        let mut task = sample_task();
        task.apply(TaskPatch::new().with_title("New Title"));
        assert_eq!(task.title, "New Title");
        assert_eq!(task.description, "2 liters");
        assert_eq!(
            task.due_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
        );
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn test_patch_apply_all_fields() {
        let mut task = sample_task();
        let due = NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date");
        task.apply(
            TaskPatch::new()
                .with_title("Buy oat milk")
                .with_description("1 liter")
                .with_due_date(due)
                .with_priority(Priority::High),
        );
        assert_eq!(task, Task::new("Buy oat milk", "1 liter", due, Priority::High));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TaskPatch::new().is_empty());
        assert!(!TaskPatch::new().with_priority(Priority::Medium).is_empty());
    }
}
