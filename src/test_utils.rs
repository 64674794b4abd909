//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - Mock stores serving a fixed snapshot or failing
//! - A small snapshot fixture exercising every derivation
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::error::StorageError;
use crate::storage::{Disk, File, Ram, Snapshot};
use crate::traits::MockPlacementStore;

/// Files 1, 2, 3 (sizes 1, 2, 3); disks 10 (fast) and 20 (slow).
///
/// - File 1 sits on disks 10 and 20, file 2 on disk 10, file 3 nowhere.
/// - Disk 10 holds one HP module (8); disk 20 holds HP (4) and DELL (8).
#[must_use]
pub fn sample_snapshot() -> Snapshot {
    Snapshot::default()
        .with_file(File::new(1, "jpg", 1))
        .with_file(File::new(2, "jpg", 2))
        .with_file(File::new(3, "log", 3))
        .with_disk(Disk::new(10, "HP", 5, 100, 1))
        .with_disk(Disk::new(20, "HP", 1, 50, 2))
        .with_ram(Ram::new(100, "HP", 8))
        .with_ram(Ram::new(200, "HP", 4))
        .with_ram(Ram::new(201, "DELL", 8))
        .with_file_on_disk(1, 10)
        .with_file_on_disk(1, 20)
        .with_file_on_disk(2, 10)
        .with_ram_on_disk(100, 10)
        .with_ram_on_disk(200, 20)
        .with_ram_on_disk(201, 20)
}

/// Create a mock store whose snapshot is always `snapshot`.
///
/// # Example
///
/// ```ignore
/// let store = mock_store_with_snapshot(sample_snapshot());
/// let service = PlacementService::new(Arc::new(store));
/// ```
#[must_use]
pub fn mock_store_with_snapshot(snapshot: Snapshot) -> MockPlacementStore {
    let mut mock = MockPlacementStore::new();
    mock.expect_snapshot()
        .returning(move || Ok(snapshot.clone()));
    mock
}

/// Create a mock store whose snapshot read always fails.
#[must_use]
pub fn mock_store_error() -> MockPlacementStore {
    let mut mock = MockPlacementStore::new();
    mock.expect_snapshot().returning(|| {
        Err(StorageError::ConnectionFailed {
            message: "database unavailable".to_string(),
        })
    });
    mock
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_snapshot_shape() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.files.len(), 3);
        assert_eq!(snapshot.disks.len(), 2);
        assert_eq!(snapshot.file_on_disk.len(), 3);
    }

    #[tokio::test]
    async fn test_mock_store_with_snapshot() {
        use crate::traits::PlacementStore;
        let mock = mock_store_with_snapshot(sample_snapshot());
        let snapshot = mock.snapshot().await.unwrap();
        assert_eq!(snapshot, sample_snapshot());
    }
}
