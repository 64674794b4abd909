//! Membership index over a snapshot.
//!
//! Groups the two membership relations by either side so the derivations can
//! look up "disks holding this file" and "files on this disk" in `O(log n)`.

use std::collections::{BTreeMap, BTreeSet};

use crate::storage::Snapshot;

use super::saturate;

static EMPTY: BTreeSet<i64> = BTreeSet::new();

/// File↔Disk and RAM↔Disk relations of one snapshot.
#[derive(Debug, Clone)]
pub struct MembershipIndex<'a> {
    snapshot: &'a Snapshot,
    disks_by_file: BTreeMap<i64, BTreeSet<i64>>,
    files_by_disk: BTreeMap<i64, BTreeSet<i64>>,
    rams_by_disk: BTreeMap<i64, BTreeSet<i64>>,
}

impl<'a> MembershipIndex<'a> {
    /// Index the membership rows of a snapshot.
    #[must_use]
    pub fn new(snapshot: &'a Snapshot) -> Self {
        let mut disks_by_file: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
        let mut files_by_disk: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
        for &(file_id, disk_id) in &snapshot.file_on_disk {
            disks_by_file.entry(file_id).or_default().insert(disk_id);
            files_by_disk.entry(disk_id).or_default().insert(file_id);
        }

        let mut rams_by_disk: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
        for &(ram_id, disk_id) in &snapshot.ram_on_disk {
            rams_by_disk.entry(disk_id).or_default().insert(ram_id);
        }

        Self {
            snapshot,
            disks_by_file,
            files_by_disk,
            rams_by_disk,
        }
    }

    /// The indexed snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    /// Disks holding a file; empty for an unknown or unplaced file.
    #[must_use]
    pub fn disks_of(&self, file_id: i64) -> &BTreeSet<i64> {
        self.disks_by_file.get(&file_id).unwrap_or(&EMPTY)
    }

    /// Files residing on a disk; empty for an unknown disk.
    #[must_use]
    pub fn files_of(&self, disk_id: i64) -> &BTreeSet<i64> {
        self.files_by_disk.get(&disk_id).unwrap_or(&EMPTY)
    }

    /// RAM modules installed in a disk.
    #[must_use]
    pub fn rams_of(&self, disk_id: i64) -> &BTreeSet<i64> {
        self.rams_by_disk.get(&disk_id).unwrap_or(&EMPTY)
    }

    /// Sum of installed RAM sizes; `0` if none or the disk is unknown.
    ///
    /// Saturates at `i64::MAX`.
    #[must_use]
    pub fn total_ram_size(&self, disk_id: i64) -> i64 {
        saturate(
            self.rams_of(disk_id)
                .iter()
                .filter_map(|ram_id| self.snapshot.rams.get(ram_id))
                .map(|ram| i128::from(ram.size))
                .sum(),
        )
    }
}
