//! Core `SQLite` storage implementation.
//!
//! This module provides the main [`SqliteStorage`] struct and core database operations.

#![allow(clippy::missing_errors_doc)]

use crate::config::Config;
use crate::error::StorageError;
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// `SQLite` storage backend.
///
/// Provides persistent storage for files, disks, RAM modules and the two
/// membership relations between them.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pub(crate) pool: SqlitePool,
}

/// Constraint class of a failed write, as reported by `SQLite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    Unique,
    ForeignKey,
    Check,
    NotNull,
}

impl SqliteStorage {
    /// Get a clone of the connection pool.
    #[must_use]
    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Create a new `SQLite` storage instance with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn new(database_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let defaults = Config::default();
        Self::open(database_path.as_ref(), defaults.max_connections, defaults.busy_timeout()).await
    }

    /// Create a storage instance from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn connect(config: &Config) -> Result<Self, StorageError> {
        Self::open(
            Path::new(&config.database_path),
            config.max_connections,
            config.busy_timeout(),
        )
        .await
    }

    async fn open(
        path: &Path,
        max_connections: u32,
        busy_timeout: Duration,
    ) -> Result<Self, StorageError> {
        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create database directory: {e}"),
            })?;
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path.display()))
                .map_err(|e| StorageError::ConnectionFailed {
                    message: format!("Invalid database path: {e}"),
                })?
                .journal_mode(SqliteJournalMode::Wal)
                .foreign_keys(true)
                .busy_timeout(busy_timeout)
                .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to connect to database: {e}"),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        tracing::debug!(path = %path.display(), max_connections, "database opened");
        Ok(storage)
    }

    /// Create a new in-memory `SQLite` storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn new_in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Invalid memory database options: {e}"),
            })?
            .foreign_keys(true);

        // One connection: every pooled connection would otherwise get its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create in-memory database: {e}"),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Run database migrations.
    ///
    /// Each migration is idempotent (uses IF NOT EXISTS).
    pub(crate) async fn run_migrations(&self) -> Result<(), StorageError> {
        let schema_001 = include_str!("../../migrations/001_initial_schema.sql");
        sqlx::query(schema_001)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationFailed {
                version: "001".to_string(),
                message: format!("Failed to run migration 001: {e}"),
            })?;

        Ok(())
    }

    /// Start a transaction on the pool.
    pub(crate) async fn begin(&self) -> Result<Transaction<'static, Sqlite>, StorageError> {
        self.pool
            .begin()
            .await
            .map_err(|e| Self::query_error("BEGIN", format!("{e}")))
    }

    /// Commit a transaction.
    pub(crate) async fn commit(tx: Transaction<'static, Sqlite>) -> Result<(), StorageError> {
        tx.commit()
            .await
            .map_err(|e| Self::query_error("COMMIT", format!("{e}")))
    }

    /// Create a query error with the given query name and message.
    pub(crate) fn query_error(query: &str, message: String) -> StorageError {
        StorageError::QueryFailed {
            query: query.to_string(),
            message,
        }
    }

    /// Classify a failed write by the constraint it violated.
    ///
    /// Returns `None` for failures that are not constraint violations.
    pub(crate) fn violation(error: &sqlx::Error) -> Option<Violation> {
        let sqlx::Error::Database(db) = error else {
            return None;
        };
        match db.kind() {
            ErrorKind::UniqueViolation => Some(Violation::Unique),
            ErrorKind::ForeignKeyViolation => Some(Violation::ForeignKey),
            ErrorKind::CheckViolation => Some(Violation::Check),
            ErrorKind::NotNullViolation => Some(Violation::NotNull),
            _ => None,
        }
    }
}
