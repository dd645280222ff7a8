//! taskdeck - interactive command-line task tracker
//!
//! Tasks are created, listed, edited, and deleted through a menu-driven
//! shell and persisted to a local JSON file between sessions.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`task`] - The task record and its field types
//! - [`store`] - In-memory ordered task collection
//! - [`persistence`] - JSON file load/save at the process boundary
//! - [`shell`] - Menu-driven interactive state machine
//! - [`shutdown`] - Save-on-drop guard and signal handling
//! - [`config`] - Optional `taskdeck.toml` settings
//! - [`error`] - Custom error types and handling
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use taskdeck::store::TaskStore;
//! use taskdeck::task::{Priority, Task};
//!
//! let mut store = TaskStore::new();
//! store.add(Task::new(
//!     "Buy milk",
//!     "2 liters",
//!     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     Priority::Low,
//! ));
//! assert_eq!(store.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod shell;
pub mod shutdown;
pub mod store;
pub mod task;

// Re-export commonly used types
pub use error::{Result, TaskdeckError};

pub use config::AppConfig;
pub use persistence::{TaskPersistence, DEFAULT_TASKS_FILE};
pub use shell::{Shell, ShellState};
pub use shutdown::{SaveGuard, ShutdownResult, SignalHandler};
pub use store::TaskStore;
pub use task::{ParsePriorityError, Priority, Task, TaskPatch};
