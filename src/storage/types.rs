//! Storage types for database operations.
//!
//! This module defines the rows stored in the database:
//! - [`File`]: A file and the space it needs
//! - [`Disk`]: A disk with its remaining free space
//! - [`Ram`]: A RAM module
//! - [`Snapshot`]: All entity and membership rows read together

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// File stored in database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Unique positive identifier.
    pub id: i64,
    /// Free-form file type ("jpg", "log", ...).
    pub file_type: String,
    /// Space the file occupies on each disk holding it.
    pub size_needed: i64,
}

impl File {
    /// Create a new file.
    #[must_use]
    pub fn new(id: i64, file_type: impl Into<String>, size_needed: i64) -> Self {
        Self {
            id,
            file_type: file_type.into(),
            size_needed,
        }
    }
}

/// Disk stored in database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    /// Unique positive identifier.
    pub id: i64,
    /// Manufacturing company.
    pub company: String,
    /// Speed rating, used to break availability ties.
    pub speed: i64,
    /// Remaining free space.
    pub free_space: i64,
    /// Cost per unit of stored size.
    pub cost: i64,
}

impl Disk {
    /// Create a new disk.
    #[must_use]
    pub fn new(id: i64, company: impl Into<String>, speed: i64, free_space: i64, cost: i64) -> Self {
        Self {
            id,
            company: company.into(),
            speed,
            free_space,
            cost,
        }
    }
}

/// RAM module stored in database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ram {
    /// Unique positive identifier.
    pub id: i64,
    /// Manufacturing company.
    pub company: String,
    /// Module size.
    pub size: i64,
}

impl Ram {
    /// Create a new RAM module.
    #[must_use]
    pub fn new(id: i64, company: impl Into<String>, size: i64) -> Self {
        Self {
            id,
            company: company.into(),
            size,
        }
    }
}

/// A consistent copy of every table.
///
/// Produced by one read transaction; derivations are pure functions of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Files keyed by ID.
    pub files: BTreeMap<i64, File>,
    /// Disks keyed by ID.
    pub disks: BTreeMap<i64, Disk>,
    /// RAM modules keyed by ID.
    pub rams: BTreeMap<i64, Ram>,
    /// `(file_id, disk_id)` pairs.
    pub file_on_disk: BTreeSet<(i64, i64)>,
    /// `(ram_id, disk_id)` pairs.
    pub ram_on_disk: BTreeSet<(i64, i64)>,
}

impl Snapshot {
    /// Add a file.
    #[must_use]
    pub fn with_file(mut self, file: File) -> Self {
        self.files.insert(file.id, file);
        self
    }

    /// Add a disk.
    #[must_use]
    pub fn with_disk(mut self, disk: Disk) -> Self {
        self.disks.insert(disk.id, disk);
        self
    }

    /// Add a RAM module.
    #[must_use]
    pub fn with_ram(mut self, ram: Ram) -> Self {
        self.rams.insert(ram.id, ram);
        self
    }

    /// Place a file on a disk.
    ///
    /// Only records the pair; free space is left as given, since a snapshot
    /// already reflects every attach that produced it.
    #[must_use]
    pub fn with_file_on_disk(mut self, file_id: i64, disk_id: i64) -> Self {
        self.file_on_disk.insert((file_id, disk_id));
        self
    }

    /// Install a RAM module in a disk.
    #[must_use]
    pub fn with_ram_on_disk(mut self, ram_id: i64, disk_id: i64) -> Self {
        self.ram_on_disk.insert((ram_id, disk_id));
        self
    }

    /// Returns true if no table has rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
            && self.disks.is_empty()
            && self.rams.is_empty()
            && self.file_on_disk.is_empty()
            && self.ram_on_disk.is_empty()
    }
}
