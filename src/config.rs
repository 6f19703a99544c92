//! Configuration management for the contacts XML server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is loaded if present, without printing to stdout (which MCP uses).

use crate::domain::name::DEFAULT_NAME_LETTERS;
use crate::domain::NamePolicy;
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Default store directory, relative to the working directory.
pub const DEFAULT_STORAGE_DIR: &str = "media/uploads";

/// Default upload size ceiling (1 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Configuration for the contacts XML server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the stored XML documents
    pub storage_dir: PathBuf,

    /// Letters allowed in first and last names
    pub name_policy: NamePolicy,

    /// Largest accepted upload in bytes (default: 1 MiB)
    pub max_upload_bytes: usize,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CONTACTS_STORAGE_DIR`: store directory (default: `media/uploads`)
    /// - `CONTACTS_NAME_LETTERS`: regex letter class for names (default: Cyrillic)
    /// - `CONTACTS_MAX_UPLOAD_BYTES`: upload size ceiling (default: 1048576)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let storage_dir = env::var("CONTACTS_STORAGE_DIR")
            .unwrap_or_else(|_| DEFAULT_STORAGE_DIR.to_string());
        if storage_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CONTACTS_STORAGE_DIR".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let name_letters = env::var("CONTACTS_NAME_LETTERS")
            .unwrap_or_else(|_| DEFAULT_NAME_LETTERS.to_string());
        let name_policy =
            NamePolicy::new(&name_letters).map_err(|e| ConfigError::InvalidValue {
                var: "CONTACTS_NAME_LETTERS".to_string(),
                reason: format!("Not a valid regex character class: {}", e),
            })?;

        let max_upload_bytes =
            Self::parse_env_usize("CONTACTS_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;
        if max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CONTACTS_MAX_UPLOAD_BYTES".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            storage_dir: PathBuf::from(storage_dir),
            name_policy,
            max_upload_bytes,
            log_level,
        })
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            name_policy: NamePolicy::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_level: "error".to_string(),
        }
    }
}
