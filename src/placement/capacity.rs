//! Capacity matching: which files would fit on a disk.
//!
//! The two listings order their results differently (free space only:
//! descending IDs; free space and RAM: ascending IDs). Each ordering is its
//! own contract and they do not share a sort.

use crate::storage::{Disk, File};

use super::membership::MembershipIndex;
use super::CANDIDATE_LIMIT;

/// Returns true if the file fits into the disk's free space.
#[must_use]
pub const fn fits(file: &File, disk: &Disk) -> bool {
    file.size_needed <= disk.free_space
}

/// Every file fitting the disk's free space, ascending by ID.
///
/// Files already on the disk are included; residency is not a filter.
pub fn fitting_files<'s>(
    index: &MembershipIndex<'s>,
    disk_id: i64,
) -> impl Iterator<Item = &'s File> + 's {
    let snapshot = index.snapshot();
    let disk = snapshot.disks.get(&disk_id);
    snapshot
        .files
        .values()
        .filter(move |file| disk.is_some_and(|disk| fits(file, disk)))
}

/// Up to five files fitting the disk's free space, by file ID descending.
///
/// Empty if the disk is unknown.
#[must_use]
pub fn candidate_files(index: &MembershipIndex<'_>, disk_id: i64) -> Vec<i64> {
    let mut ids: Vec<i64> = fitting_files(index, disk_id).map(|file| file.id).collect();
    ids.reverse();
    ids.truncate(CANDIDATE_LIMIT);
    ids
}

/// Up to five files fitting both the disk's free space and its total
/// installed RAM, by file ID ascending.
///
/// A disk without RAM has a RAM total of zero, so only zero-sized files can
/// qualify; such a disk is not skipped outright the way a join against
/// per-disk RAM totals would skip it. Empty if the disk is unknown.
#[must_use]
pub fn candidate_files_with_ram(index: &MembershipIndex<'_>, disk_id: i64) -> Vec<i64> {
    let ram_total = index.total_ram_size(disk_id);
    fitting_files(index, disk_id)
        .filter(|file| file.size_needed <= ram_total)
        .map(|file| file.id)
        .take(CANDIDATE_LIMIT)
        .collect()
}
