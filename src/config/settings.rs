//! User settings for Runora
//!
//! Application preferences that live outside the budget document: where
//! exports go, how the monthly rollover treats an existing budget, and how
//! often the background hook may write.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::{user_download_dir, RunoraPaths};
use crate::error::RunoraError;

/// How the monthly rollover combines the recurring budget with an explicit one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RolloverPolicy {
    /// Add the recurring budget on top of any explicit budget for the month
    #[default]
    TopUp,
    /// Overwrite the month's budget with the recurring budget
    Replace,
}

/// User settings for Runora
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Where exports are written (defaults to the Downloads directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Rollover behaviour
    #[serde(default)]
    pub rollover_policy: RolloverPolicy,

    /// Minimum interval between background persists
    #[serde(default = "default_persist_throttle_ms")]
    pub persist_throttle_ms: u64,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

/// Settings schema this build reads and writes
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SETTINGS_SCHEMA_VERSION
}

fn default_persist_throttle_ms() -> u64 {
    2000
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            export_dir: None,
            rollover_policy: RolloverPolicy::default(),
            persist_throttle_ms: default_persist_throttle_ms(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &RunoraPaths) -> Result<Self, RunoraError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| RunoraError::Io(format!("Failed to read settings file: {}", e)))?;

            let mut settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                RunoraError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if settings.schema_version > SETTINGS_SCHEMA_VERSION {
                return Err(RunoraError::Config(format!(
                    "Settings file uses schema version {}, this build supports up to {}",
                    settings.schema_version, SETTINGS_SCHEMA_VERSION
                )));
            }
            // Older files only lack fields, which serde defaults fill in
            settings.schema_version = SETTINGS_SCHEMA_VERSION;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RunoraPaths) -> Result<(), RunoraError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| RunoraError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| RunoraError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve the export directory
    pub fn resolve_export_dir(&self, paths: &RunoraPaths) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(user_download_dir)
            .unwrap_or_else(|| paths.exports_dir())
    }

    pub fn persist_throttle(&self) -> Duration {
        Duration::from_millis(self.persist_throttle_ms)
    }
}
