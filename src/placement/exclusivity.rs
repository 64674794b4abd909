//! Company exclusivity of a disk's installed RAM.

use super::membership::MembershipIndex;

/// True iff every RAM module in the disk is made by the disk's company.
///
/// An unknown disk is never exclusive. A disk without RAM is.
#[must_use]
pub fn is_company_exclusive(index: &MembershipIndex<'_>, disk_id: i64) -> bool {
    let snapshot = index.snapshot();
    let Some(disk) = snapshot.disks.get(&disk_id) else {
        return false;
    };
    index
        .rams_of(disk_id)
        .iter()
        .filter_map(|ram_id| snapshot.rams.get(ram_id))
        .all(|ram| ram.company == disk.company)
}
