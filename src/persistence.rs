//! Task file persistence layer.
//!
//! The persisted file is a pretty-printed JSON array of task objects,
//! overwritten in place on save. Writes are best-effort: there is no
//! temp-file rename or locking, so a crash mid-write can corrupt the file.
//! Load failures never take the application down; the caller reports them
//! and falls back to an empty store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, TaskdeckError};
use crate::task::Task;

/// Default persisted file name, relative to the working directory.
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// File-backed storage for the task sequence.
#[derive(Debug, Clone)]
pub struct TaskPersistence {
    path: PathBuf,
}

impl TaskPersistence {
    /// Create a persistence handle for the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the persisted file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks if the persisted file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the task sequence from the persisted file.
    ///
    /// A missing file is not an error: it yields an empty sequence, the
    /// normal first-run state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Parse`] on malformed JSON,
    /// [`TaskdeckError::Access`] on permission failure, and
    /// [`TaskdeckError::Io`] on other read failures.
    pub fn load(&self) -> Result<Vec<Task>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No task file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(TaskdeckError::from_io(&self.path, e)),
        };

        let tasks: Vec<Task> = serde_json::from_str(&contents)
            .map_err(|e| TaskdeckError::parse(&self.path, e))?;

        debug!("Loaded {} task(s) from {}", tasks.len(), self.path.display());
        Ok(tasks)
    }

    /// Save the task sequence, overwriting the persisted file.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Access`] or [`TaskdeckError::Io`] on write
    /// failure. Callers treat this as non-fatal: the process keeps running,
    /// at the cost of possibly losing the latest edits.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)
            .map_err(|e| TaskdeckError::parse(&self.path, e))?;

        fs::write(&self.path, json).map_err(|e| TaskdeckError::from_io(&self.path, e))?;

        debug!("Saved {} task(s) to {}", tasks.len(), self.path.display());
        Ok(())
    }

    /// Load, reporting any failure through tracing and degrading to empty.
    ///
    /// This is the startup path: storage errors are warnings, not exits.
    /// Returns the loaded tasks and the error that was swallowed, if any,
    /// so the caller can also surface it on the console.
    pub fn load_or_empty(&self) -> (Vec<Task>, Option<TaskdeckError>) {
        match self.load() {
            Ok(tasks) => (tasks, None),
            Err(e) => {
                warn!("Failed to load tasks: {e}");
                (Vec::new(), Some(e))
            }
        }
    }
}
