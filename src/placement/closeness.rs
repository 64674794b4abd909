//! Closeness between files.
//!
//! File `A` is close to file `B` when `B` shares at least half of `A`'s
//! disks: `2 × |disks(A) ∩ disks(B)| >= |disks(A)|`. The ratio is taken
//! against `A`'s disk count only, so the relation is directed and
//! `close(A, B)` may differ from `close(B, A)`.
//!
//! A file on no disk is close to every other file.

use serde::{Deserialize, Serialize};

use super::membership::MembershipIndex;
use super::CLOSE_FILES_LIMIT;

/// One directed edge of the closeness relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseRelation {
    /// The file whose disks are the reference set.
    pub file_id: i64,
    /// The file compared against it.
    pub other_file_id: i64,
    /// Whether `other_file_id` is close to `file_id`.
    pub is_close: bool,
}

/// Evaluate `close(a, b)` for two distinct files.
///
/// Existence is not checked here; callers iterate known files.
#[must_use]
pub fn is_close(index: &MembershipIndex<'_>, a: i64, b: i64) -> bool {
    let disks_a = index.disks_of(a);
    if disks_a.is_empty() {
        return true;
    }
    let disks_b = index.disks_of(b);
    let shared = disks_a.intersection(disks_b).count();
    2 * shared >= disks_a.len()
}

/// The full directed relation over every ordered pair of distinct files,
/// ordered by `(file_id, other_file_id)`.
#[must_use]
pub fn close_relation(index: &MembershipIndex<'_>) -> Vec<CloseRelation> {
    let files = &index.snapshot().files;
    files
        .keys()
        .flat_map(|&a| {
            files.keys().filter(move |&&b| b != a).map(move |&b| CloseRelation {
                file_id: a,
                other_file_id: b,
                is_close: is_close(index, a, b),
            })
        })
        .collect()
}

/// Up to ten files close to `file_id`, ascending; empty if the file is unknown.
#[must_use]
pub fn close_files_of(index: &MembershipIndex<'_>, file_id: i64) -> Vec<i64> {
    let files = &index.snapshot().files;
    if !files.contains_key(&file_id) {
        return Vec::new();
    }
    files
        .keys()
        .copied()
        .filter(|&other| other != file_id && is_close(index, file_id, other))
        .take(CLOSE_FILES_LIMIT)
        .collect()
}
