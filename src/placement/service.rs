//! Placement service: the caller-facing facade over a [`PlacementStore`].
//!
//! Mutations are forwarded to the store and logged. Every derivation query
//! reads one fresh snapshot and evaluates a pure function over it; nothing
//! is cached between calls.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{PlacementError, StorageError};
use crate::storage::{Disk, File, Ram, Snapshot};
use crate::traits::PlacementStore;

use super::availability::{self, DiskAvailability};
use super::capacity;
use super::closeness::{self, CloseRelation};
use super::conflicts;
use super::exclusivity;
use super::membership::MembershipIndex;
use super::stats;

/// Per-disk section of a [`PlacementReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskReport {
    /// Disk ID.
    pub disk_id: i64,
    /// Remaining free space.
    pub free_space: i64,
    /// Sum of installed RAM sizes.
    pub total_ram_size: i64,
    /// Files fitting the free space, ID descending.
    pub candidate_files: Vec<i64>,
    /// Files fitting free space and RAM, ID ascending.
    pub candidate_files_with_ram: Vec<i64>,
    /// Whether all installed RAM shares the disk's company.
    pub company_exclusive: bool,
    /// Mean size of the files on the disk.
    pub average_file_size: f64,
}

/// Every derivation evaluated against one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Disks sharing a file with another disk.
    pub conflicting_disks: Vec<i64>,
    /// Top disks by candidate count.
    pub most_available_disks: Vec<DiskAvailability>,
    /// One entry per disk, ascending by ID.
    pub disks: Vec<DiskReport>,
}

/// Placement analytics over a repository handle.
#[derive(Debug)]
pub struct PlacementService<S> {
    store: Arc<S>,
}

impl<S> Clone for PlacementService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: PlacementStore> PlacementService<S> {
    /// Create a service over a store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn with_index<T>(
        &self,
        query: &'static str,
        derive: impl FnOnce(&MembershipIndex<'_>) -> T,
    ) -> Result<T, StorageError> {
        let snapshot: Snapshot = self.store.snapshot().await?;
        let index = MembershipIndex::new(&snapshot);
        let result = derive(&index);
        debug!(
            query,
            files = snapshot.files.len(),
            disks = snapshot.disks.len(),
            "derived from snapshot"
        );
        Ok(result)
    }

    // ========== Entities ==========

    /// Insert a file.
    ///
    /// # Errors
    ///
    /// See [`PlacementStore::add_file`].
    pub async fn add_file(&self, file: &File) -> Result<(), PlacementError> {
        log_outcome("add_file", file.id, self.store.add_file(file).await)
    }

    /// Get a file.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Storage`] if the database operation fails.
    pub async fn get_file(&self, id: i64) -> Result<Option<File>, PlacementError> {
        self.store.get_file(id).await
    }

    /// Delete a file and give its space back to the disks holding it.
    ///
    /// # Errors
    ///
    /// See [`PlacementStore::delete_file`].
    pub async fn delete_file(&self, id: i64) -> Result<(), PlacementError> {
        log_outcome("delete_file", id, self.store.delete_file(id).await)
    }

    /// Insert a disk.
    ///
    /// # Errors
    ///
    /// See [`PlacementStore::add_disk`].
    pub async fn add_disk(&self, disk: &Disk) -> Result<(), PlacementError> {
        log_outcome("add_disk", disk.id, self.store.add_disk(disk).await)
    }

    /// Get a disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Storage`] if the database operation fails.
    pub async fn get_disk(&self, id: i64) -> Result<Option<Disk>, PlacementError> {
        self.store.get_disk(id).await
    }

    /// Delete a disk.
    ///
    /// # Errors
    ///
    /// See [`PlacementStore::delete_disk`].
    pub async fn delete_disk(&self, id: i64) -> Result<(), PlacementError> {
        log_outcome("delete_disk", id, self.store.delete_disk(id).await)
    }

    /// Insert a RAM module.
    ///
    /// # Errors
    ///
    /// See [`PlacementStore::add_ram`].
    pub async fn add_ram(&self, ram: &Ram) -> Result<(), PlacementError> {
        log_outcome("add_ram", ram.id, self.store.add_ram(ram).await)
    }

    /// Get a RAM module.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Storage`] if the database operation fails.
    pub async fn get_ram(&self, id: i64) -> Result<Option<Ram>, PlacementError> {
        self.store.get_ram(id).await
    }

    /// Delete a RAM module.
    ///
    /// # Errors
    ///
    /// See [`PlacementStore::delete_ram`].
    pub async fn delete_ram(&self, id: i64) -> Result<(), PlacementError> {
        log_outcome("delete_ram", id, self.store.delete_ram(id).await)
    }

    /// Insert a disk and a file atomically.
    ///
    /// # Errors
    ///
    /// See [`PlacementStore::add_disk_and_file`].
    pub async fn add_disk_and_file(&self, disk: &Disk, file: &File) -> Result<(), PlacementError> {
        log_outcome(
            "add_disk_and_file",
            disk.id,
            self.store.add_disk_and_file(disk, file).await,
        )
    }

    // ========== Membership ==========

    /// Place a file on a disk.
    ///
    /// # Errors
    ///
    /// See [`PlacementStore::attach_file`].
    pub async fn attach(&self, file_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        let result = self.store.attach_file(file_id, disk_id).await;
        match &result {
            Ok(()) => info!(file_id, disk_id, "file attached"),
            Err(e) => warn!(file_id, disk_id, error = %e, "attach rejected"),
        }
        result
    }

    /// Remove a file from a disk.
    ///
    /// # Errors
    ///
    /// See [`PlacementStore::detach_file`].
    pub async fn detach(&self, file_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        let result = self.store.detach_file(file_id, disk_id).await;
        match &result {
            Ok(()) => info!(file_id, disk_id, "file detached"),
            Err(e) => warn!(file_id, disk_id, error = %e, "detach rejected"),
        }
        result
    }

    /// Install a RAM module in a disk.
    ///
    /// # Errors
    ///
    /// See [`PlacementStore::attach_ram`].
    pub async fn attach_ram(&self, ram_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        log_outcome("attach_ram", ram_id, self.store.attach_ram(ram_id, disk_id).await)
    }

    /// Remove a RAM module from a disk.
    ///
    /// # Errors
    ///
    /// See [`PlacementStore::detach_ram`].
    pub async fn detach_ram(&self, ram_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        log_outcome("detach_ram", ram_id, self.store.detach_ram(ram_id, disk_id).await)
    }

    /// Sum of RAM sizes installed in a disk; `0` if none.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn total_ram_size(&self, disk_id: i64) -> Result<i64, StorageError> {
        self.with_index("total_ram_size", |index| index.total_ram_size(disk_id))
            .await
    }

    /// Files residing on a disk, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn files_of(&self, disk_id: i64) -> Result<Vec<i64>, StorageError> {
        self.with_index("files_of", |index| {
            index.files_of(disk_id).iter().copied().collect()
        })
        .await
    }

    /// Disks holding a file, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn disks_of(&self, file_id: i64) -> Result<Vec<i64>, StorageError> {
        self.with_index("disks_of", |index| {
            index.disks_of(file_id).iter().copied().collect()
        })
        .await
    }

    // ========== Derivations ==========

    /// Up to five files fitting the disk's free space, ID descending.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn candidate_files(&self, disk_id: i64) -> Result<Vec<i64>, StorageError> {
        self.with_index("candidate_files", |index| {
            capacity::candidate_files(index, disk_id)
        })
        .await
    }

    /// Up to five files fitting free space and installed RAM, ID ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn candidate_files_with_ram(&self, disk_id: i64) -> Result<Vec<i64>, StorageError> {
        self.with_index("candidate_files_with_ram", |index| {
            capacity::candidate_files_with_ram(index, disk_id)
        })
        .await
    }

    /// Whether `other_file_id` is close to `file_id`.
    ///
    /// False when either file is unknown or both IDs are the same.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn is_close(&self, file_id: i64, other_file_id: i64) -> Result<bool, StorageError> {
        self.with_index("is_close", |index| {
            let files = &index.snapshot().files;
            file_id != other_file_id
                && files.contains_key(&file_id)
                && files.contains_key(&other_file_id)
                && closeness::is_close(index, file_id, other_file_id)
        })
        .await
    }

    /// Up to ten files close to `file_id`, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn close_files_of(&self, file_id: i64) -> Result<Vec<i64>, StorageError> {
        self.with_index("close_files_of", |index| {
            closeness::close_files_of(index, file_id)
        })
        .await
    }

    /// The complete directed closeness relation.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn close_relation(&self) -> Result<Vec<CloseRelation>, StorageError> {
        self.with_index("close_relation", closeness::close_relation)
            .await
    }

    /// Disks sharing a file with another disk, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn conflicting_disks(&self) -> Result<Vec<i64>, StorageError> {
        self.with_index("conflicting_disks", conflicts::conflicting_disks)
            .await
    }

    /// Top five disks by candidate count, speed, then ID.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn most_available_disks(&self) -> Result<Vec<i64>, StorageError> {
        self.with_index("most_available_disks", availability::most_available_disks)
            .await
    }

    /// Whether all RAM in a disk shares its company; false for an unknown disk.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn is_company_exclusive(&self, disk_id: i64) -> Result<bool, StorageError> {
        self.with_index("is_company_exclusive", |index| {
            exclusivity::is_company_exclusive(index, disk_id)
        })
        .await
    }

    /// Mean size of files on a disk; `0.0` if none.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn average_file_size_on_disk(&self, disk_id: i64) -> Result<f64, StorageError> {
        self.with_index("average_file_size_on_disk", |index| {
            stats::average_file_size_on_disk(index, disk_id)
        })
        .await
    }

    /// Total storage cost of a file type.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn cost_for_type(&self, file_type: &str) -> Result<i64, StorageError> {
        self.with_index("cost_for_type", |index| {
            stats::cost_for_type(index, file_type)
        })
        .await
    }

    /// Evaluate every report-style derivation against a single snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be read.
    pub async fn report(&self) -> Result<PlacementReport, StorageError> {
        self.with_index("report", |index| {
            let disks = index
                .snapshot()
                .disks
                .values()
                .map(|disk| DiskReport {
                    disk_id: disk.id,
                    free_space: disk.free_space,
                    total_ram_size: index.total_ram_size(disk.id),
                    candidate_files: capacity::candidate_files(index, disk.id),
                    candidate_files_with_ram: capacity::candidate_files_with_ram(index, disk.id),
                    company_exclusive: exclusivity::is_company_exclusive(index, disk.id),
                    average_file_size: stats::average_file_size_on_disk(index, disk.id),
                })
                .collect();

            PlacementReport {
                conflicting_disks: conflicts::conflicting_disks(index),
                most_available_disks: availability::availability(index)
                    .into_iter()
                    .take(super::RANKING_LIMIT)
                    .collect(),
                disks,
            }
        })
        .await
    }
}

fn log_outcome(
    operation: &'static str,
    id: i64,
    result: Result<(), PlacementError>,
) -> Result<(), PlacementError> {
    match &result {
        Ok(()) => info!(operation, id, "applied"),
        Err(e) if e.is_storage() => warn!(operation, id, error = %e, "storage failure"),
        Err(e) => warn!(operation, id, error = %e, "rejected"),
    }
    result
}
