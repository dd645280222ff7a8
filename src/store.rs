//! In-memory task collection.
//!
//! The store is an ordered sequence addressed by 1-based display index, the
//! same ordinal the shell shows the user. Indices are ephemeral: removing a
//! task shifts every later task down by one.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use taskdeck::store::TaskStore;
//! use taskdeck::task::{Priority, Task, TaskPatch};
//!
//! let mut store = TaskStore::new();
//! store.add(Task::new(
//!     "Buy milk",
//!     "2 liters",
//!     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     Priority::Low,
//! ));
//! assert_eq!(store.len(), 1);
//!
//! store.update(1, TaskPatch::new().with_title("Buy oat milk")).unwrap();
//! assert_eq!(store.get(1).unwrap().title, "Buy oat milk");
//!
//! store.remove(1).unwrap();
//! assert!(store.is_empty());
//! ```

use crate::error::{Result, TaskdeckError};
use crate::task::{Task, TaskPatch};

/// Ordered in-memory collection of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an existing sequence (the startup load path).
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Number of tasks in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The full ordered sequence, for display and persistence.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a task at the end of the sequence. Always succeeds.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Get the task at the given 1-based display index.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::IndexOutOfRange`] if `index` is 0 or greater
    /// than the current count.
    pub fn get(&self, index: usize) -> Result<&Task> {
        let slot = self.check_index(index)?;
        Ok(&self.tasks[slot])
    }

    /// Apply a partial update to the task at the given 1-based index.
    ///
    /// Fields the patch leaves unset keep their prior value. Returns a
    /// reference to the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::IndexOutOfRange`] on an invalid index; the
    /// patch is not applied in that case.
    pub fn update(&mut self, index: usize, patch: TaskPatch) -> Result<&Task> {
        let slot = self.check_index(index)?;
        self.tasks[slot].apply(patch);
        Ok(&self.tasks[slot])
    }

    /// Remove and return the task at the given 1-based index.
    ///
    /// Every task after the removed one shifts down by one display position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::IndexOutOfRange`] on an invalid index.
    pub fn remove(&mut self, index: usize) -> Result<Task> {
        let slot = self.check_index(index)?;
        Ok(self.tasks.remove(slot))
    }

    // Maps a 1-based display index to a vector slot.
    fn check_index(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.tasks.len() {
            return Err(TaskdeckError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::NaiveDate;

    fn task(title: &str) -> Task {
        Task::new(
            title,
            "details",
            NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            Priority::Medium,
        )
    }

    fn store_with(titles: &[&str]) -> TaskStore {
        TaskStore::from_tasks(titles.iter().map(|t| task(t)).collect())
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = TaskStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_add_appends_at_end_and_grows_by_one() {
        let mut store = store_with(&["first", "second"]);
        store.add(task("third"));

        assert_eq!(store.len(), 3);
        assert_eq!(store.tasks()[2].title, "third");
    }

    #[test]
    fn test_get_uses_display_index() {
        let store = store_with(&["first", "second", "third"]);
        assert_eq!(store.get(1).unwrap().title, "first");
        assert_eq!(store.get(3).unwrap().title, "third");
    }

    #[test]
    fn test_get_rejects_zero_and_past_end() {
        let store = store_with(&["only"]);

        let err = store.get(0).unwrap_err();
        assert!(matches!(
            err,
            TaskdeckError::IndexOutOfRange { index: 0, len: 1 }
        ));

        let err = store.get(2).unwrap_err();
        assert!(matches!(
            err,
            TaskdeckError::IndexOutOfRange { index: 2, len: 1 }
        ));
    }

    #[test]
    fn test_get_on_empty_store_fails() {
        let store = TaskStore::new();
        assert!(store.get(1).is_err());
    }

    #[test]
    fn test_update_applies_patch_in_place() {
        let mut store = store_with(&["first", "second"]);
        let updated = store
            .update(2, TaskPatch::new().with_title("renamed"))
            .unwrap();

        assert_eq!(updated.title, "renamed");
        assert_eq!(store.get(1).unwrap().title, "first");
        assert_eq!(store.get(2).unwrap().title, "renamed");
        assert_eq!(store.get(2).unwrap().description, "details");
    }

    #[test]
    fn test_update_empty_patch_changes_nothing() {
        let mut store = store_with(&["first"]);
        let before = store.get(1).unwrap().clone();

        store.update(1, TaskPatch::new()).unwrap();
        assert_eq!(store.get(1).unwrap(), &before);
    }

    #[test]
    fn test_update_invalid_index_fails_without_side_effects() {
        let mut store = store_with(&["first"]);
        let err = store
            .update(5, TaskPatch::new().with_title("lost"))
            .unwrap_err();

        assert!(matches!(
            err,
            TaskdeckError::IndexOutOfRange { index: 5, len: 1 }
        ));
        assert_eq!(store.get(1).unwrap().title, "first");
    }

    #[test]
    fn test_remove_shifts_later_tasks_down() {
        let mut store = store_with(&["first", "second", "third"]);
        let removed = store.remove(2).unwrap();

        assert_eq!(removed.title, "second");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().title, "first");
        assert_eq!(store.get(2).unwrap().title, "third");
    }

    #[test]
    fn test_remove_last_task_empties_store() {
        let mut store = store_with(&["only"]);
        store.remove(1).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_invalid_index_fails() {
        let mut store = store_with(&["only"]);
        assert!(store.remove(0).is_err());
        assert!(store.remove(2).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_from_tasks_preserves_order() {
        let store = store_with(&["a", "b", "c"]);
        let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }
}
