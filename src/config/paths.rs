//! Path management for teamfin
//!
//! ## Path Resolution Order
//!
//! 1. `TEAMFIN_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/teamfin` on Linux, `%APPDATA%\teamfin` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::TeamFinError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "TEAMFIN_DATA_DIR";

/// Manages all paths used by teamfin
#[derive(Debug, Clone)]
pub struct TeamFinPaths {
    base_dir: PathBuf,
}

impl TeamFinPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, TeamFinError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths under a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the JSON repositories
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn envelopes_file(&self) -> PathBuf {
        self.data_dir().join("envelopes.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn investments_file(&self) -> PathBuf {
        self.data_dir().join("investments.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), TeamFinError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TeamFinError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| TeamFinError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if teamfin has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, TeamFinError> {
    ProjectDirs::from("", "", "teamfin")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| TeamFinError::Config("Could not determine a home directory".into()))
}
