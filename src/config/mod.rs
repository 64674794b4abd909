//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Configuration validation
//! - Default value handling
//!
//! # Example
//!
//! ```
//! use disk_placement::config::{validate_config, Config};
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     database_path: "./data/placement.db".to_string(),
//!     log_level: "info".to_string(),
//!     max_connections: 5,
//!     busy_timeout_ms: 5000,
//! };
//!
//! assert!(validate_config(&config).is_ok());
//! ```

mod validation;

pub use validation::{validate_config, MAX_BUSY_TIMEOUT_MS, MAX_CONNECTIONS};

use std::time::Duration;

use crate::error::ConfigError;

/// Default database path.
pub const DEFAULT_DATABASE_PATH: &str = "./data/placement.db";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default connection pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time a writer waits on a locked database, in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Database path.
    pub database_path: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
    /// How long a connection waits for a lock held by another writer.
    pub busy_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `DATABASE_PATH`: Path to `SQLite` database (default: `./data/placement.db`)
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `MAX_CONNECTIONS`: Pool size (default: `5`)
    /// - `BUSY_TIMEOUT_MS`: Lock wait in milliseconds (default: `5000`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse or any
    /// value fails validation (see [`validate_config`]).
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

        let max_connections = parse_env_u32("MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let busy_timeout_ms = parse_env_u64("BUSY_TIMEOUT_MS", DEFAULT_BUSY_TIMEOUT_MS)?;

        let config = Self {
            database_path,
            log_level,
            max_connections,
            busy_timeout_ms,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Busy timeout as a [`Duration`].
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

/// Parse an environment variable as u64, using a default if not set.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a non-negative integer".into(),
        })
    })
}

/// Parse an environment variable as u32, using a default if not set.
fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}
