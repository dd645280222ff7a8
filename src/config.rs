//! Application configuration.
//!
//! Settings come from an optional `taskdeck.toml` in the working directory.
//! A missing file means defaults; a malformed file is reported and also
//! falls back to defaults, matching the non-fatal posture of the storage
//! layer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskdeckError};
use crate::persistence::DEFAULT_TASKS_FILE;

/// Config file name, relative to the working directory.
pub const CONFIG_FILE: &str = "taskdeck.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Path of the persisted task file
    pub tasks_file: PathBuf,

    /// Whether to colorize console output
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from(DEFAULT_TASKS_FILE),
            color: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a directory, defaulting when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file exists but cannot be read, or
    /// [`TaskdeckError::InvalidConfig`] if it exists but does not parse or
    /// fails validation.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| TaskdeckError::from_io(&config_path, e))?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| TaskdeckError::invalid_config(CONFIG_FILE, e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::InvalidConfig`] when a value is unusable.
    pub fn validate(&self) -> Result<()> {
        if self.tasks_file.as_os_str().is_empty() {
            return Err(TaskdeckError::invalid_config(
                "tasks_file",
                "path must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tasks_file, PathBuf::from("tasks.json"));
        assert!(config.color);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().expect("temp dir");
        let config = AppConfig::load(temp_dir.path()).expect("load");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_parses_overrides() {
        let temp_dir = TempDir::new().expect("temp dir");
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE),
            "tasks_file = \"work/tasks.json\"\ncolor = false\n",
        )
        .expect("write config");

        let config = AppConfig::load(temp_dir.path()).expect("load");
        assert_eq!(config.tasks_file, PathBuf::from("work/tasks.json"));
        assert!(!config.color);
    }

    #[test]
    fn test_load_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().expect("temp dir");
        std::fs::write(temp_dir.path().join(CONFIG_FILE), "color = false\n")
            .expect("write config");

        let config = AppConfig::load(temp_dir.path()).expect("load");
        assert_eq!(config.tasks_file, PathBuf::from("tasks.json"));
        assert!(!config.color);
    }

    #[test]
    fn test_load_malformed_file_is_invalid_config() {
        let temp_dir = TempDir::new().expect("temp dir");
        std::fs::write(temp_dir.path().join(CONFIG_FILE), "tasks_file = [not toml")
            .expect("write config");

        let err = AppConfig::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, TaskdeckError::InvalidConfig { .. }));
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let temp_dir = TempDir::new().expect("temp dir");
        std::fs::write(temp_dir.path().join(CONFIG_FILE), "task_file = \"oops.json\"\n")
            .expect("write config");

        assert!(AppConfig::load(temp_dir.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_tasks_file() {
        let config = AppConfig {
            tasks_file: PathBuf::new(),
            color: true,
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, TaskdeckError::InvalidConfig { .. }));
    }
}
