//! Concurrent writer tests.
//!
//! Two attaches that each fit alone but not together must not both land.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use disk_placement::config::Config;
use disk_placement::error::PlacementError;
use disk_placement::placement::PlacementService;
use disk_placement::storage::{Disk, File, SqliteStorage};
use serial_test::serial;
use tempfile::TempDir;

/// Open a file-backed pool with several connections.
async fn create_pooled_storage() -> (Arc<SqliteStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        database_path: temp_dir
            .path()
            .join("concurrent.db")
            .to_string_lossy()
            .into_owned(),
        max_connections: 4,
        ..Config::default()
    };
    let storage = SqliteStorage::connect(&config)
        .await
        .expect("Failed to create storage");
    (Arc::new(storage), temp_dir)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn test_competing_attaches_do_not_overcommit() {
    let (storage, _temp_dir) = create_pooled_storage().await;
    storage.add_disk(&Disk::new(10, "HP", 1, 30, 1)).await.unwrap();
    storage.add_file(&File::new(1, "bin", 20)).await.unwrap();
    storage.add_file(&File::new(2, "bin", 20)).await.unwrap();

    let first = {
        let storage = Arc::clone(&storage);
        tokio::spawn(async move { storage.attach_file(1, 10).await })
    };
    let second = {
        let storage = Arc::clone(&storage);
        tokio::spawn(async move { storage.attach_file(2, 10).await })
    };
    let results = [first.await.unwrap(), second.await.unwrap()];

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(PlacementError::InsufficientSpace { disk_id: 10, .. })
    )));

    let disk = storage.get_disk(10).await.unwrap().unwrap();
    assert_eq!(disk.free_space, 10);
    assert_eq!(storage.snapshot().await.unwrap().file_on_disk.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn test_many_small_attaches_fill_exactly() {
    let (storage, _temp_dir) = create_pooled_storage().await;
    storage.add_disk(&Disk::new(10, "HP", 1, 50, 1)).await.unwrap();
    for id in 1..=8 {
        storage.add_file(&File::new(id, "bin", 10)).await.unwrap();
    }

    let handles: Vec<_> = (1..=8)
        .map(|id| {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move { storage.attach_file(id, 10).await })
        })
        .collect();
    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            succeeded += 1;
        }
    }

    assert_eq!(succeeded, 5);
    let disk = storage.get_disk(10).await.unwrap().unwrap();
    assert_eq!(disk.free_space, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn test_reads_during_writes_see_consistent_state() {
    let (storage, _temp_dir) = create_pooled_storage().await;
    storage.add_disk(&Disk::new(10, "HP", 1, 1000, 1)).await.unwrap();
    for id in 1..=20 {
        storage.add_file(&File::new(id, "bin", 7)).await.unwrap();
    }
    let service = PlacementService::new(Arc::clone(&storage));

    let writer = {
        let storage = Arc::clone(&storage);
        tokio::spawn(async move {
            for id in 1..=20 {
                storage.attach_file(id, 10).await.unwrap();
            }
        })
    };

    for _ in 0..20 {
        let snapshot = service.store().snapshot().await.unwrap();
        let attached = i64::try_from(snapshot.file_on_disk.len()).unwrap();
        assert_eq!(snapshot.disks[&10].free_space, 1000 - 7 * attached);
    }
    writer.await.unwrap();
}
