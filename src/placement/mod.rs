//! Placement derivations.
//!
//! Everything here is a pure function of a [`Snapshot`](crate::storage::Snapshot):
//! - `membership`: File↔Disk and RAM↔Disk lookups, RAM totals
//! - `capacity`: Candidate files for a disk
//! - `closeness`: Directed closeness between files
//! - `conflicts`: Disks sharing a file
//! - `availability`: Disks ranked by candidate count
//! - `exclusivity`: Single-company RAM check
//! - `stats`: Average file size and cost per type
//!
//! [`PlacementService`] wires them to a [`PlacementStore`](crate::traits::PlacementStore),
//! reading one snapshot per query.
//!
//! # Example
//!
//! ```
//! use disk_placement::placement::{closeness, MembershipIndex};
//! use disk_placement::storage::{Disk, File, Snapshot};
//!
//! let snapshot = Snapshot::default()
//!     .with_file(File::new(4, "txt", 1))
//!     .with_file(File::new(5, "txt", 1))
//!     .with_disk(Disk::new(10, "HP", 1, 100, 1))
//!     .with_disk(Disk::new(20, "HP", 1, 100, 1))
//!     .with_file_on_disk(4, 10)
//!     .with_file_on_disk(4, 20)
//!     .with_file_on_disk(5, 10);
//! let index = MembershipIndex::new(&snapshot);
//!
//! assert!(closeness::is_close(&index, 4, 5));
//! assert!(closeness::is_close(&index, 5, 4));
//! ```

pub mod availability;
pub mod capacity;
pub mod closeness;
pub mod conflicts;
pub mod exclusivity;
pub mod membership;
mod service;
pub mod stats;

pub use availability::DiskAvailability;
pub use closeness::CloseRelation;
pub use membership::MembershipIndex;
pub use service::{DiskReport, PlacementReport, PlacementService};

/// Maximum number of candidate files returned for a disk.
pub const CANDIDATE_LIMIT: usize = 5;

/// Maximum number of close files returned for a file.
pub const CLOSE_FILES_LIMIT: usize = 10;

/// Maximum number of disks in the availability ranking.
pub const RANKING_LIMIT: usize = 5;

/// Clamp a wide aggregate into `i64`, saturating at the bounds.
pub(crate) fn saturate(total: i128) -> i64 {
    i64::try_from(total).unwrap_or(if total < 0 { i64::MIN } else { i64::MAX })
}
