//! Error recovery and edge case tests.
//!
//! Rejected mutations must leave every table as it was.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use disk_placement::error::PlacementError;
use disk_placement::storage::{Disk, File, Ram, SqliteStorage};
use serial_test::serial;
use tempfile::TempDir;

/// Create a test database in a temporary directory.
async fn create_test_storage() -> (SqliteStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let storage = SqliteStorage::new(db_path.to_str().expect("Invalid path"))
        .await
        .expect("Failed to create storage");
    (storage, temp_dir)
}

#[tokio::test]
#[serial]
async fn test_get_nonexistent_entities() {
    let (storage, _temp_dir) = create_test_storage().await;

    assert!(storage.get_file(1).await.unwrap().is_none());
    assert!(storage.get_disk(1).await.unwrap().is_none());
    assert!(storage.get_ram(1).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_invalid_input_rejected() {
    let (storage, _temp_dir) = create_test_storage().await;

    assert!(matches!(
        storage.add_file(&File::new(0, "txt", 1)).await,
        Err(PlacementError::InvalidInput { .. })
    ));
    assert!(matches!(
        storage.add_file(&File::new(1, "txt", -1)).await,
        Err(PlacementError::InvalidInput { .. })
    ));
    assert!(matches!(
        storage.add_disk(&Disk::new(-3, "HP", 1, 1, 1)).await,
        Err(PlacementError::InvalidInput { .. })
    ));
    assert!(storage.snapshot().await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_duplicate_ids_rejected() {
    let (storage, _temp_dir) = create_test_storage().await;
    storage.add_file(&File::new(1, "txt", 1)).await.unwrap();
    storage.add_ram(&Ram::new(5, "HP", 4)).await.unwrap();

    assert_eq!(
        storage.add_file(&File::new(1, "log", 9)).await,
        Err(PlacementError::AlreadyExists {
            entity: "file".to_string(),
            id: 1
        })
    );
    assert!(matches!(
        storage.add_ram(&Ram::new(5, "DELL", 8)).await,
        Err(PlacementError::AlreadyExists { .. })
    ));
    assert_eq!(storage.get_file(1).await.unwrap().unwrap().file_type, "txt");
}

#[tokio::test]
#[serial]
async fn test_failed_disk_and_file_rolls_back_disk() {
    let (storage, _temp_dir) = create_test_storage().await;
    storage.add_file(&File::new(1, "txt", 1)).await.unwrap();

    let result = storage
        .add_disk_and_file(&Disk::new(10, "HP", 1, 10, 1), &File::new(1, "txt", 1))
        .await;

    assert!(matches!(result, Err(PlacementError::AlreadyExists { .. })));
    assert!(storage.get_disk(10).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_attach_error_kinds() {
    let (storage, _temp_dir) = create_test_storage().await;
    storage.add_disk(&Disk::new(10, "HP", 1, 10, 1)).await.unwrap();
    storage.add_file(&File::new(1, "txt", 4)).await.unwrap();

    assert_eq!(
        storage.attach_file(99, 10).await,
        Err(PlacementError::not_found("file", 99))
    );
    assert_eq!(
        storage.attach_file(1, 99).await,
        Err(PlacementError::not_found("disk", 99))
    );

    storage.attach_file(1, 10).await.unwrap();
    assert!(matches!(
        storage.attach_file(1, 10).await,
        Err(PlacementError::AlreadyLinked { left: 1, right: 10, .. })
    ));
    assert_eq!(storage.get_disk(10).await.unwrap().unwrap().free_space, 6);
}

#[tokio::test]
#[serial]
async fn test_detach_missing_pair() {
    let (storage, _temp_dir) = create_test_storage().await;
    storage.add_disk(&Disk::new(10, "HP", 1, 10, 1)).await.unwrap();
    storage.add_file(&File::new(1, "txt", 4)).await.unwrap();

    assert!(matches!(
        storage.detach_file(1, 10).await,
        Err(PlacementError::NotFound { .. })
    ));
    assert_eq!(storage.get_disk(10).await.unwrap().unwrap().free_space, 10);
}

#[tokio::test]
#[serial]
async fn test_delete_missing_entities() {
    let (storage, _temp_dir) = create_test_storage().await;

    assert_eq!(
        storage.delete_file(7).await,
        Err(PlacementError::not_found("file", 7))
    );
    assert!(matches!(
        storage.delete_disk(7).await,
        Err(PlacementError::NotFound { .. })
    ));
    assert!(matches!(
        storage.delete_ram(7).await,
        Err(PlacementError::NotFound { .. })
    ));
}

#[tokio::test]
#[serial]
async fn test_ram_link_errors() {
    let (storage, _temp_dir) = create_test_storage().await;
    storage.add_disk(&Disk::new(10, "HP", 1, 10, 1)).await.unwrap();
    storage.add_ram(&Ram::new(100, "HP", 8)).await.unwrap();

    assert!(matches!(
        storage.attach_ram(404, 10).await,
        Err(PlacementError::NotFound { .. })
    ));
    storage.attach_ram(100, 10).await.unwrap();
    assert!(matches!(
        storage.attach_ram(100, 10).await,
        Err(PlacementError::AlreadyLinked { .. })
    ));
    storage.detach_ram(100, 10).await.unwrap();
    assert!(matches!(
        storage.detach_ram(100, 10).await,
        Err(PlacementError::NotFound { .. })
    ));
}
