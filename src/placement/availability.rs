//! Availability ranking: which disks could take the most files.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::capacity::fitting_files;
use super::membership::MembershipIndex;
use super::RANKING_LIMIT;

/// A disk and how many files would fit into its free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskAvailability {
    /// Disk ID.
    pub disk_id: i64,
    /// Number of distinct files fitting the disk's free space.
    pub candidate_count: usize,
    /// Disk speed, the first tie-breaker.
    pub speed: i64,
}

/// Every disk with at least one candidate file, best first.
///
/// Ordered by candidate count descending, then speed descending, then disk
/// ID ascending. Disks with no candidates are left out.
#[must_use]
pub fn availability(index: &MembershipIndex<'_>) -> Vec<DiskAvailability> {
    let mut ranking: Vec<DiskAvailability> = index
        .snapshot()
        .disks
        .values()
        .map(|disk| DiskAvailability {
            disk_id: disk.id,
            candidate_count: fitting_files(index, disk.id).count(),
            speed: disk.speed,
        })
        .filter(|entry| entry.candidate_count > 0)
        .collect();

    ranking.sort_by_key(|entry| {
        (
            Reverse(entry.candidate_count),
            Reverse(entry.speed),
            entry.disk_id,
        )
    });
    ranking
}

/// The top five disks of [`availability`].
#[must_use]
pub fn most_available_disks(index: &MembershipIndex<'_>) -> Vec<i64> {
    availability(index)
        .into_iter()
        .take(RANKING_LIMIT)
        .map(|entry| entry.disk_id)
        .collect()
}
