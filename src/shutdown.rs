//! Exit-path persistence.
//!
//! Two cooperating pieces guarantee a best-effort save on every way out of
//! the process:
//!
//! - [`SaveGuard`] - a scoped resource whose `Drop` saves the store. Owned
//!   by `main`, it covers normal returns and error returns alike.
//! - [`SignalHandler`] - listens for SIGTERM/SIGINT (Ctrl+C on Windows) and
//!   saves before the process exits, covering the paths destructors cannot.
//!
//! Saving is never re-entrant (each exit path runs at most one save) and
//! never panics: a failed save is logged and reported, not fatal.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{error, info};

use crate::error::Result;
use crate::persistence::TaskPersistence;
use crate::store::TaskStore;

/// Result of a shutdown save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownResult {
    /// Tasks were saved successfully.
    Saved,
    /// Save failed but was logged (no panic).
    SaveFailed(String),
}

// Shared save path for the guard and the signal handler. Recovers a
// poisoned lock so a panic elsewhere cannot block the final save.
fn save_tasks(persistence: &TaskPersistence, store: &Mutex<TaskStore>) -> ShutdownResult {
    let tasks = store
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .tasks()
        .to_vec();

    match persistence.save(&tasks) {
        Ok(()) => {
            info!(
                "Saved {} task(s) to {}",
                tasks.len(),
                persistence.path().display()
            );
            ShutdownResult::Saved
        }
        Err(e) => {
            error!("Failed to save tasks on shutdown: {e}");
            ShutdownResult::SaveFailed(e.to_string())
        }
    }
}

/// Scoped-resource save: persists the store when dropped.
///
/// # Example
///
/// ```rust,ignore
/// let _guard = SaveGuard::new(Arc::clone(&persistence), Arc::clone(&store));
/// run_shell()?; // guard saves on return, including the `?` path
/// ```
#[derive(Debug)]
pub struct SaveGuard {
    persistence: Arc<TaskPersistence>,
    store: Arc<Mutex<TaskStore>>,
}

impl SaveGuard {
    /// Create a guard over the given persistence handle and store.
    #[must_use]
    pub fn new(persistence: Arc<TaskPersistence>, store: Arc<Mutex<TaskStore>>) -> Self {
        Self { persistence, store }
    }

    /// Save immediately without consuming the guard.
    pub fn save_now(&self) -> ShutdownResult {
        save_tasks(&self.persistence, &self.store)
    }
}

impl Drop for SaveGuard {
    fn drop(&mut self) {
        // May run during unwind; must not panic.
        let _ = self.save_now();
    }
}

/// Signal listener that saves the store before process exit.
#[derive(Debug)]
pub struct SignalHandler {
    persistence: Arc<TaskPersistence>,
    store: Arc<Mutex<TaskStore>>,
}

impl SignalHandler {
    /// Create a handler over the given persistence handle and store.
    #[must_use]
    pub fn new(persistence: Arc<TaskPersistence>, store: Arc<Mutex<TaskStore>>) -> Self {
        Self { persistence, store }
    }

    /// Perform the shutdown save. Never panics.
    pub fn shutdown(&self) -> ShutdownResult {
        save_tasks(&self.persistence, &self.store)
    }

    /// Wait for a termination signal, then save.
    ///
    /// On Unix this listens for SIGTERM and SIGINT; on Windows for Ctrl+C.
    /// Resolves once the save attempt has completed.
    ///
    /// # Errors
    ///
    /// Returns an error if signal handler registration fails.
    pub async fn wait_for_shutdown(&self) -> Result<ShutdownResult> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate())?;
            let mut sigint = signal(SignalKind::interrupt())?;

            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, saving before exit");
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, saving before exit");
                }
            }
        }

        #[cfg(windows)]
        {
            tokio::signal::ctrl_c().await?;
            info!("Received Ctrl+C, saving before exit");
        }

        Ok(self.shutdown())
    }
}
