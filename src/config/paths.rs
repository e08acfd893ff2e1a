//! Path management for Runora
//!
//! ## Path Resolution Order
//!
//! 1. `RUNORA_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/runora` on Linux)

use std::path::PathBuf;

use directories::{ProjectDirs, UserDirs};

use crate::error::RunoraError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "RUNORA_DATA_DIR";

/// Manages all paths used by Runora
#[derive(Debug, Clone)]
pub struct RunoraPaths {
    /// Base directory for all Runora data
    base_dir: PathBuf,
}

impl RunoraPaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, RunoraError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create RunoraPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Fallback export directory (<base>/exports/)
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// The persisted budget document
    pub fn document_file(&self) -> PathBuf {
        self.data_dir().join("budget.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), RunoraError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| RunoraError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| RunoraError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if a document has been written yet
    pub fn is_initialized(&self) -> bool {
        self.document_file().exists()
    }
}

/// Resolve the default base directory for this platform
fn resolve_default_path() -> Result<PathBuf, RunoraError> {
    ProjectDirs::from("com", "runora", "runora")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| RunoraError::Config("Could not determine a home directory".into()))
}

/// The user's Downloads directory, if the platform has one
pub fn user_download_dir() -> Option<PathBuf> {
    UserDirs::new().and_then(|dirs| dirs.download_dir().map(|d| d.to_path_buf()))
}
