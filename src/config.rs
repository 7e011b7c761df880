//! Configuration management and validation.
//!
//! Provides the settings for where records are persisted and which uploads
//! are accepted. Values are layered: defaults, then environment variables,
//! then command-line overrides applied by the CLI.

use crate::constants::{
    APP_DIR_NAME, DEFAULT_DATABASE_FILENAME, DEFAULT_LOG_LEVEL, DEFAULT_TABLE_NAME,
    ENV_DATABASE_PATH, ENV_TABLE_NAME, REQUIRED_EXTENSION,
};
use crate::app::services::record_store::sqlite::is_valid_table_name;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Global configuration for CSV ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database receiving ingested records
    pub database_path: PathBuf,

    /// Table receiving ingested records
    pub table_name: String,

    /// Extension an upload filename must end with (case-insensitive)
    pub required_extension: String,

    /// Validate and parse only, keeping records in memory
    pub dry_run: bool,

    /// Log level used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: Self::default_database_path(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            required_extension: REQUIRED_EXTENSION.to_string(),
            dry_run: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Default database location under the user data directory
    ///
    /// Falls back to the working directory when no data directory exists.
    pub fn default_database_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_DATABASE_FILENAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILENAME))
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATABASE_PATH).filter(|v| !v.trim().is_empty()) {
            debug!("Database path from {}: {}", ENV_DATABASE_PATH, path);
            self.database_path = PathBuf::from(path);
        }

        if let Some(table) = lookup(ENV_TABLE_NAME).filter(|v| !v.trim().is_empty()) {
            debug!("Table name from {}: {}", ENV_TABLE_NAME, table);
            self.table_name = table;
        }

        self
    }

    /// Use a different database file
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Use a different table
    pub fn with_table_name(mut self, table: impl Into<String>) -> Self {
        self.table_name = table.into();
        self
    }

    /// Accept a different upload extension
    pub fn with_required_extension(mut self, extension: impl Into<String>) -> Self {
        self.required_extension = extension.into();
        self
    }

    /// Enable dry-run mode
    pub fn with_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !is_valid_table_name(&self.table_name) {
            return Err(Error::configuration(format!(
                "Invalid table name '{}': use letters, digits and underscores",
                self.table_name
            )));
        }

        if self.required_extension.len() < 2 || !self.required_extension.starts_with('.') {
            return Err(Error::configuration(format!(
                "Required extension must start with '.', got '{}'",
                self.required_extension
            )));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(Error::configuration("Database path cannot be empty"));
        }

        Ok(())
    }
}
