//! Trait definitions for mockable dependencies.
//!
//! This module defines [`PlacementStore`], the repository abstraction the
//! placement service is built on. [`SqliteStorage`](crate::storage::SqliteStorage)
//! is the production implementation.
//!
//! # Mocking
//!
//! The trait is annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates a mock implementation automatically for testing.

use async_trait::async_trait;

use crate::error::{PlacementError, StorageError};
use crate::storage::{Disk, File, Ram, Snapshot};

/// Repository of files, disks, RAM modules and their memberships.
///
/// Implementations enforce positive IDs, non-negative sizes, uniqueness and
/// referential integrity, and run every method atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacementStore: Send + Sync {
    /// Insert a file.
    ///
    /// # Errors
    ///
    /// [`PlacementError::InvalidInput`] or [`PlacementError::AlreadyExists`].
    async fn add_file(&self, file: &File) -> Result<(), PlacementError>;

    /// Get a file by ID. Returns `None` if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Storage`] if the database operation fails.
    async fn get_file(&self, id: i64) -> Result<Option<File>, PlacementError>;

    /// Delete a file, returning its space to every disk that held it.
    ///
    /// # Errors
    ///
    /// [`PlacementError::NotFound`] if the file doesn't exist.
    async fn delete_file(&self, id: i64) -> Result<(), PlacementError>;

    /// Insert a disk.
    ///
    /// # Errors
    ///
    /// [`PlacementError::InvalidInput`] or [`PlacementError::AlreadyExists`].
    async fn add_disk(&self, disk: &Disk) -> Result<(), PlacementError>;

    /// Get a disk by ID. Returns `None` if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Storage`] if the database operation fails.
    async fn get_disk(&self, id: i64) -> Result<Option<Disk>, PlacementError>;

    /// Delete a disk.
    ///
    /// # Errors
    ///
    /// [`PlacementError::NotFound`] if the disk doesn't exist.
    async fn delete_disk(&self, id: i64) -> Result<(), PlacementError>;

    /// Insert a RAM module.
    ///
    /// # Errors
    ///
    /// [`PlacementError::InvalidInput`] or [`PlacementError::AlreadyExists`].
    async fn add_ram(&self, ram: &Ram) -> Result<(), PlacementError>;

    /// Get a RAM module by ID. Returns `None` if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Storage`] if the database operation fails.
    async fn get_ram(&self, id: i64) -> Result<Option<Ram>, PlacementError>;

    /// Delete a RAM module.
    ///
    /// # Errors
    ///
    /// [`PlacementError::NotFound`] if the module doesn't exist.
    async fn delete_ram(&self, id: i64) -> Result<(), PlacementError>;

    /// Insert a disk and a file atomically.
    ///
    /// # Errors
    ///
    /// As [`add_disk`](Self::add_disk) and [`add_file`](Self::add_file);
    /// on any error neither row is stored.
    async fn add_disk_and_file(&self, disk: &Disk, file: &File) -> Result<(), PlacementError>;

    /// Place a file on a disk.
    ///
    /// # Errors
    ///
    /// [`PlacementError::NotFound`], [`PlacementError::AlreadyLinked`] or
    /// [`PlacementError::InsufficientSpace`]; no state changes on error.
    async fn attach_file(&self, file_id: i64, disk_id: i64) -> Result<(), PlacementError>;

    /// Remove a file from a disk.
    ///
    /// # Errors
    ///
    /// [`PlacementError::NotFound`] if the pair doesn't exist.
    async fn detach_file(&self, file_id: i64, disk_id: i64) -> Result<(), PlacementError>;

    /// Install a RAM module in a disk.
    ///
    /// # Errors
    ///
    /// [`PlacementError::NotFound`] or [`PlacementError::AlreadyLinked`].
    async fn attach_ram(&self, ram_id: i64, disk_id: i64) -> Result<(), PlacementError>;

    /// Remove a RAM module from a disk.
    ///
    /// # Errors
    ///
    /// [`PlacementError::NotFound`] if the pair doesn't exist.
    async fn detach_ram(&self, ram_id: i64, disk_id: i64) -> Result<(), PlacementError>;

    /// Read all tables as one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn snapshot(&self) -> Result<Snapshot, StorageError>;
}
