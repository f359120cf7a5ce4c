//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `QUICK_BILL_DATA_DIR` - Directory holding the database (default: `.quick-bill`)
//! - `QUICK_BILL_DB_FILE` - Database file name (default: `quick_bill.db`)
//! - `QUICK_BILL_LOG` - Log filter used when `RUST_LOG` is unset (default: `quick_bill=info`)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".quick-bill";
const DEFAULT_DB_FILE: &str = "quick_bill.db";
const DEFAULT_LOG_FILTER: &str = "quick_bill=info,quick_bill_lib=info";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the database file
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`
    pub db_file: String,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let db_file = get("QUICK_BILL_DB_FILE", DEFAULT_DB_FILE);
        if db_file.contains(['/', '\\']) {
            return Err(ConfigError::InvalidEnvVar(
                "QUICK_BILL_DB_FILE".to_string(),
                "must be a file name, not a path".to_string(),
            ));
        }

        Ok(Self {
            data_dir: PathBuf::from(get("QUICK_BILL_DATA_DIR", DEFAULT_DATA_DIR)),
            db_file,
            log_filter: get("QUICK_BILL_LOG", DEFAULT_LOG_FILTER),
        })
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }
}
