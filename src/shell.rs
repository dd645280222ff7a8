//! Interactive menu shell.
//!
//! The shell is a small state machine driven by line-oriented input:
//!
//! ```text
//! MainMenu ──1──> Adding ────┐
//!    │ ────2──> Viewing ─────┤
//!    │ ────3──> Editing ─────┼──> MainMenu
//!    │ ────4──> Deleting ────┘
//!    │ ────5──> Exiting (terminal; final save runs in the shutdown layer)
//!    └── other input: warn, stay in MainMenu
//! ```
//!
//! Field prompts re-ask until the input validates; there is no retry cap.
//! End-of-input on stdin is treated as choosing Exit so a piped session
//! still unwinds through the save path.
//!
//! The shell is generic over its input and output streams so tests can run
//! scripted sessions against in-memory buffers.

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use colored::Colorize;
use tracing::debug;

use crate::error::Result;
use crate::store::TaskStore;
use crate::task::{Priority, Task, TaskPatch};

/// Date format accepted by the due-date prompts.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// States of the interactive shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    /// Showing the menu and waiting for a choice
    MainMenu,
    /// Collecting fields for a new task
    Adding,
    /// Listing all tasks
    Viewing,
    /// Partial update of an existing task
    Editing,
    /// Removing a task by number
    Deleting,
    /// Terminal state; the run loop ends
    Exiting,
}

/// Outcome of an optional (blank-to-keep) field prompt.
enum FieldInput<T> {
    /// A validated new value
    Value(T),
    /// Blank input: keep the current value
    Keep,
    /// Input stream ended
    Eof,
}

/// Menu-driven interactive shell over a shared task store.
pub struct Shell<R, W> {
    input: R,
    output: W,
    store: Arc<Mutex<TaskStore>>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a shell reading from `input` and writing to `output`.
    pub fn new(input: R, output: W, store: Arc<Mutex<TaskStore>>) -> Self {
        Self {
            input,
            output,
            store,
        }
    }

    /// Run the shell until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Only console I/O failures propagate; store and validation issues are
    /// handled inside the loop.
    pub fn run(&mut self) -> Result<()> {
        let mut state = ShellState::MainMenu;
        loop {
            state = match state {
                ShellState::MainMenu => self.main_menu()?,
                ShellState::Adding => self.add_task()?,
                ShellState::Viewing => self.view_tasks()?,
                ShellState::Editing => self.edit_task()?,
                ShellState::Deleting => self.delete_task()?,
                ShellState::Exiting => break,
            };
        }
        Ok(())
    }

    // Lock the store, recovering from poisoning so a panic elsewhere never
    // blocks the save path.
    fn lock(&self) -> MutexGuard<'_, TaskStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // States
    // =========================================================================

    fn main_menu(&mut self) -> Result<ShellState> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "Task Management".bold())?;
        writeln!(self.output, "1. Add Task")?;
        writeln!(self.output, "2. View Tasks")?;
        writeln!(self.output, "3. Edit Task")?;
        writeln!(self.output, "4. Delete Task")?;
        writeln!(self.output, "5. Exit")?;

        let Some(choice) = self.prompt("Choose an option: ")? else {
            return Ok(ShellState::Exiting);
        };

        let next = match choice.trim() {
            "1" => ShellState::Adding,
            "2" => ShellState::Viewing,
            "3" => ShellState::Editing,
            "4" => ShellState::Deleting,
            "5" => ShellState::Exiting,
            other => {
                debug!("Unrecognized menu choice: {other:?}");
                writeln!(
                    self.output,
                    "{} Invalid option. Please try again.",
                    "Warning:".yellow()
                )?;
                ShellState::MainMenu
            }
        };
        Ok(next)
    }

    fn add_task(&mut self) -> Result<ShellState> {
        let Some(title) =
            self.prompt_nonempty("Enter task title: ", "Title cannot be empty.")?
        else {
            return Ok(ShellState::Exiting);
        };
        let Some(description) =
            self.prompt_nonempty("Enter task description: ", "Description cannot be empty.")?
        else {
            return Ok(ShellState::Exiting);
        };
        let Some(due_date) = self.prompt_date("Enter task due date (yyyy-mm-dd): ")? else {
            return Ok(ShellState::Exiting);
        };
        let Some(priority) = self.prompt_priority("Enter task priority (Low, Medium, High): ")?
        else {
            return Ok(ShellState::Exiting);
        };

        self.lock()
            .add(Task::new(title, description, due_date, priority));
        writeln!(self.output, "Task added successfully.")?;
        Ok(ShellState::MainMenu)
    }

    fn view_tasks(&mut self) -> Result<ShellState> {
        let tasks = self.lock().tasks().to_vec();
        if tasks.is_empty() {
            writeln!(self.output, "No tasks available.")?;
            return Ok(ShellState::MainMenu);
        }

        writeln!(self.output)?;
        writeln!(self.output, "Tasks:")?;
        for (i, task) in tasks.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, task)?;
        }
        Ok(ShellState::MainMenu)
    }

    fn edit_task(&mut self) -> Result<ShellState> {
        let len = self.lock().len();
        if len == 0 {
            writeln!(self.output, "No tasks available to edit.")?;
            return Ok(ShellState::MainMenu);
        }

        let Some(index) = self.prompt_index("Enter task number to edit: ", len)? else {
            return Ok(ShellState::Exiting);
        };

        let mut patch = TaskPatch::new();

        match self.prompt_optional_text("Enter new title (leave blank to keep current): ")? {
            FieldInput::Eof => return Ok(ShellState::Exiting),
            FieldInput::Keep => {}
            FieldInput::Value(title) => patch.title = Some(title),
        }
        match self.prompt_optional_text("Enter new description (leave blank to keep current): ")? {
            FieldInput::Eof => return Ok(ShellState::Exiting),
            FieldInput::Keep => {}
            FieldInput::Value(description) => patch.description = Some(description),
        }
        match self.prompt_optional_date("Enter new due date (leave blank to keep current): ")? {
            FieldInput::Eof => return Ok(ShellState::Exiting),
            FieldInput::Keep => {}
            FieldInput::Value(due_date) => patch.due_date = Some(due_date),
        }
        match self.prompt_optional_priority("Enter new priority (leave blank to keep current): ")? {
            FieldInput::Eof => return Ok(ShellState::Exiting),
            FieldInput::Keep => {}
            FieldInput::Value(priority) => patch.priority = Some(priority),
        }

        // Index was validated against the current count above.
        self.lock().update(index, patch)?;
        writeln!(self.output, "Task updated successfully.")?;
        Ok(ShellState::MainMenu)
    }

    fn delete_task(&mut self) -> Result<ShellState> {
        let len = self.lock().len();
        if len == 0 {
            writeln!(self.output, "No tasks available to delete.")?;
            return Ok(ShellState::MainMenu);
        }

        let Some(index) = self.prompt_index("Enter task number to delete: ", len)? else {
            return Ok(ShellState::Exiting);
        };

        self.lock().remove(index)?;
        writeln!(self.output, "Task deleted successfully.")?;
        Ok(ShellState::MainMenu)
    }

    // =========================================================================
    // Prompt helpers
    // =========================================================================

    /// Print a prompt and read one line. `None` means end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Re-prompt until a non-empty line arrives.
    fn prompt_nonempty(&mut self, text: &str, empty_msg: &str) -> Result<Option<String>> {
        loop {
            match self.prompt(text)? {
                None => return Ok(None),
                Some(line) if line.is_empty() => writeln!(self.output, "{empty_msg}")?,
                Some(line) => return Ok(Some(line)),
            }
        }
    }

    /// Re-prompt until a valid `yyyy-mm-dd` date arrives.
    fn prompt_date(&mut self, text: &str) -> Result<Option<NaiveDate>> {
        loop {
            match self.prompt(text)? {
                None => return Ok(None),
                Some(line) => match NaiveDate::parse_from_str(line.trim(), DATE_FORMAT) {
                    Ok(date) => return Ok(Some(date)),
                    Err(_) => writeln!(
                        self.output,
                        "Invalid date format. Please enter a valid date (yyyy-mm-dd)."
                    )?,
                },
            }
        }
    }

    /// Re-prompt until one of the three exact priority strings arrives.
    fn prompt_priority(&mut self, text: &str) -> Result<Option<Priority>> {
        loop {
            match self.prompt(text)? {
                None => return Ok(None),
                Some(line) => match line.parse::<Priority>() {
                    Ok(priority) => return Ok(Some(priority)),
                    Err(_) => writeln!(
                        self.output,
                        "Priority must be 'Low', 'Medium' or 'High'."
                    )?,
                },
            }
        }
    }

    /// Re-prompt until an integer in `[1, len]` arrives.
    fn prompt_index(&mut self, text: &str, len: usize) -> Result<Option<usize>> {
        loop {
            match self.prompt(text)? {
                None => return Ok(None),
                Some(line) => match line.trim().parse::<usize>() {
                    Ok(index) if (1..=len).contains(&index) => return Ok(Some(index)),
                    _ => writeln!(
                        self.output,
                        "Invalid input. Please enter a valid task number."
                    )?,
                },
            }
        }
    }

    /// Optional text field: blank keeps the current value.
    fn prompt_optional_text(&mut self, text: &str) -> Result<FieldInput<String>> {
        Ok(match self.prompt(text)? {
            None => FieldInput::Eof,
            Some(line) if line.is_empty() => FieldInput::Keep,
            Some(line) => FieldInput::Value(line),
        })
    }

    /// Optional date field: blank keeps, anything else must validate.
    fn prompt_optional_date(&mut self, text: &str) -> Result<FieldInput<NaiveDate>> {
        loop {
            match self.prompt(text)? {
                None => return Ok(FieldInput::Eof),
                Some(line) if line.is_empty() => return Ok(FieldInput::Keep),
                Some(line) => match NaiveDate::parse_from_str(line.trim(), DATE_FORMAT) {
                    Ok(date) => return Ok(FieldInput::Value(date)),
                    Err(_) => writeln!(
                        self.output,
                        "Invalid date format. Please enter a valid date (yyyy-mm-dd)."
                    )?,
                },
            }
        }
    }

    /// Optional priority field: blank keeps, anything else must validate.
    fn prompt_optional_priority(&mut self, text: &str) -> Result<FieldInput<Priority>> {
        loop {
            match self.prompt(text)? {
                None => return Ok(FieldInput::Eof),
                Some(line) if line.is_empty() => return Ok(FieldInput::Keep),
                Some(line) => match line.parse::<Priority>() {
                    Ok(priority) => return Ok(FieldInput::Value(priority)),
                    Err(_) => writeln!(
                        self.output,
                        "Priority must be 'Low', 'Medium' or 'High'."
                    )?,
                },
            }
        }
    }
}
