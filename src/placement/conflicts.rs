//! Conflict detection: disks that share a file with another disk.

use std::collections::BTreeSet;

use super::membership::MembershipIndex;

/// Disks holding at least one file that also resides on a different disk,
/// ascending and deduplicated.
#[must_use]
pub fn conflicting_disks(index: &MembershipIndex<'_>) -> Vec<i64> {
    let mut conflicting = BTreeSet::new();
    for &(file_id, _) in &index.snapshot().file_on_disk {
        let disks = index.disks_of(file_id);
        if disks.len() > 1 {
            conflicting.extend(disks.iter().copied());
        }
    }
    conflicting.into_iter().collect()
}
