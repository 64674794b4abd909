//! Error types for disk placement analytics.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`PlacementError`]: Typed outcomes of repository mutations
//! - [`StorageError`]: Database operation errors
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// Top-level application error.
///
/// This is the error type returned by the report binary.
/// It wraps all subsystem errors for unified error handling.
#[derive(Debug, Error)]
pub enum AppError {
    /// Placement operation error.
    #[error("Placement error: {0}")]
    Placement(#[from] PlacementError),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Report serialization error.
    #[error("Report serialization failed: {message}")]
    Report {
        /// Description of the serialization failure.
        message: String,
    },
}

/// Placement errors.
///
/// Returned by operations that insert, delete or link entities. Each
/// constraint the repository enforces maps to exactly one variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Referenced entity or relation is absent.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity ("file", "disk", "ram", or a relation name).
        entity: String,
        /// The ID that was looked up.
        id: i64,
    },

    /// An entity with this ID already exists.
    #[error("{entity} already exists: {id}")]
    AlreadyExists {
        /// Kind of entity.
        entity: String,
        /// The duplicate ID.
        id: i64,
    },

    /// The membership pair already exists.
    #[error("{relation} already linked: ({left}, {right})")]
    AlreadyLinked {
        /// Relation name ("file_on_disk" or "ram_on_disk").
        relation: String,
        /// File or RAM ID.
        left: i64,
        /// Disk ID.
        right: i64,
    },

    /// Attaching would drive the disk's free space below zero.
    #[error("Insufficient space on disk {disk_id}: need {required}, have {available}")]
    InsufficientSpace {
        /// The disk that is too full.
        disk_id: i64,
        /// Size the file needs.
        required: i64,
        /// Free space left on the disk.
        available: i64,
    },

    /// A field violates its range (non-positive ID, negative size, ...).
    #[error("Invalid value for {field}: {reason}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },

    /// Underlying storage failure, propagated unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PlacementError {
    /// Shorthand for [`PlacementError::NotFound`].
    #[must_use]
    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id,
        }
    }

    /// Shorthand for [`PlacementError::InvalidInput`].
    #[must_use]
    pub fn invalid(field: &str, reason: &str) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if the failure came from the storage layer rather than
    /// from a constraint of the placement model.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Storage errors.
///
/// These errors represent failures in database operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Failed to connect to the database.
    #[error("Database connection failed: {message}")]
    ConnectionFailed {
        /// Description of the connection failure.
        message: String,
    },

    /// A database query failed.
    #[error("Query failed: {query} - {message}")]
    QueryFailed {
        /// The query that failed (may be truncated).
        query: String,
        /// Description of the failure.
        message: String,
    },

    /// Database migration failed.
    #[error("Migration failed: {version} - {message}")]
    MigrationFailed {
        /// The migration version that failed.
        version: String,
        /// Description of the failure.
        message: String,
    },
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
