//! Usage statistics over placements.

use super::membership::MembershipIndex;
use super::saturate;

/// Mean size of the files on a disk; `0.0` for an empty or unknown disk.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_file_size_on_disk(index: &MembershipIndex<'_>, disk_id: i64) -> f64 {
    let sizes: Vec<i128> = index
        .files_of(disk_id)
        .iter()
        .filter_map(|file_id| index.snapshot().files.get(file_id))
        .map(|file| i128::from(file.size_needed))
        .collect();
    if sizes.is_empty() {
        return 0.0;
    }
    sizes.iter().sum::<i128>() as f64 / sizes.len() as f64
}

/// Total storage cost of one file type: `Σ disk.cost × file.size_needed`
/// over every placement of a file of that type.
///
/// Each product is taken in `i128` and the total saturates at `i64::MAX`.
#[must_use]
pub fn cost_for_type(index: &MembershipIndex<'_>, file_type: &str) -> i64 {
    let snapshot = index.snapshot();
    let total = snapshot
        .file_on_disk
        .iter()
        .filter_map(|(file_id, disk_id)| {
            let file = snapshot.files.get(file_id)?;
            let disk = snapshot.disks.get(disk_id)?;
            (file.file_type == file_type)
                .then(|| i128::from(disk.cost) * i128::from(file.size_needed))
        })
        .fold(0_i128, i128::saturating_add);
    saturate(total)
}
