//! Placement lifecycle tests through the service facade.
//!
//! Tests the flow: add entities → attach → derive → mutate → derive again.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use disk_placement::placement::PlacementService;
use disk_placement::storage::{Disk, File, Ram, SqliteStorage};
use pretty_assertions::assert_eq;
use serial_test::serial;
use tempfile::TempDir;

async fn create_test_service() -> (PlacementService<SqliteStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("workflow.db");
    let storage = SqliteStorage::new(db_path.to_str().expect("Invalid path"))
        .await
        .expect("Failed to create storage");
    (PlacementService::new(Arc::new(storage)), temp_dir)
}

/// Disks 1 (HP, fast, 100 free) and 2 (DELL, slow, 12 free); files 1..=7
/// of size `id * 2`.
async fn seed(service: &PlacementService<SqliteStorage>) {
    service.add_disk(&Disk::new(1, "HP", 9, 100, 2)).await.unwrap();
    service.add_disk(&Disk::new(2, "DELL", 3, 12, 5)).await.unwrap();
    for id in 1..=7 {
        let kind = if id % 2 == 0 { "jpg" } else { "log" };
        service.add_file(&File::new(id, kind, id * 2)).await.unwrap();
    }
}

#[tokio::test]
#[serial]
async fn test_candidate_orderings() {
    let (service, _temp_dir) = create_test_service().await;
    seed(&service).await;
    service.add_ram(&Ram::new(10, "DELL", 4)).await.unwrap();
    service.add_ram(&Ram::new(11, "DELL", 4)).await.unwrap();
    service.attach_ram(10, 2).await.unwrap();
    service.attach_ram(11, 2).await.unwrap();

    // Disk 1 fits everything, newest IDs first.
    assert_eq!(service.candidate_files(1).await.unwrap(), vec![7, 6, 5, 4, 3]);
    // Disk 2 fits sizes up to 12: files 1..=6.
    assert_eq!(service.candidate_files(2).await.unwrap(), vec![6, 5, 4, 3, 2]);
    // RAM total 8 on disk 2: files 1..=4, ascending.
    assert_eq!(
        service.candidate_files_with_ram(2).await.unwrap(),
        vec![1, 2, 3, 4]
    );
    // Disk 1 has no RAM.
    assert!(service.candidate_files_with_ram(1).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_candidates_shrink_as_space_is_used() {
    let (service, _temp_dir) = create_test_service().await;
    seed(&service).await;

    service.attach(4, 2).await.unwrap();

    // 12 - 8 leaves 4: files 1 and 2 still fit.
    assert_eq!(service.candidate_files(2).await.unwrap(), vec![2, 1]);
    assert_eq!(service.most_available_disks().await.unwrap(), vec![1, 2]);

    service.detach(4, 2).await.unwrap();
    assert_eq!(service.candidate_files(2).await.unwrap(), vec![6, 5, 4, 3, 2]);
}

#[tokio::test]
#[serial]
async fn test_conflicts_follow_shared_files() {
    let (service, _temp_dir) = create_test_service().await;
    seed(&service).await;
    service.attach(1, 1).await.unwrap();
    service.attach(2, 2).await.unwrap();
    assert!(service.conflicting_disks().await.unwrap().is_empty());

    service.attach(1, 2).await.unwrap();
    assert_eq!(service.conflicting_disks().await.unwrap(), vec![1, 2]);

    service.detach(1, 1).await.unwrap();
    assert!(service.conflicting_disks().await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_company_exclusivity_changes_with_ram() {
    let (service, _temp_dir) = create_test_service().await;
    seed(&service).await;
    service.add_ram(&Ram::new(10, "HP", 8)).await.unwrap();
    service.add_ram(&Ram::new(11, "DELL", 8)).await.unwrap();

    assert!(service.is_company_exclusive(1).await.unwrap());
    service.attach_ram(10, 1).await.unwrap();
    assert!(service.is_company_exclusive(1).await.unwrap());
    service.attach_ram(11, 1).await.unwrap();
    assert!(!service.is_company_exclusive(1).await.unwrap());
    assert_eq!(service.total_ram_size(1).await.unwrap(), 16);

    service.delete_ram(11).await.unwrap();
    assert!(service.is_company_exclusive(1).await.unwrap());
    assert!(!service.is_company_exclusive(404).await.unwrap());
}

#[tokio::test]
#[serial]
async fn test_usage_statistics() {
    let (service, _temp_dir) = create_test_service().await;
    seed(&service).await;
    service.attach(2, 1).await.unwrap();
    service.attach(4, 1).await.unwrap();
    service.attach(2, 2).await.unwrap();

    let average = service.average_file_size_on_disk(1).await.unwrap();
    assert!((average - 6.0).abs() < f64::EPSILON);
    // jpg: 4*2 + 8*2 + 4*5
    assert_eq!(service.cost_for_type("jpg").await.unwrap(), 44);
    assert_eq!(service.cost_for_type("log").await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_close_relation_covers_ordered_pairs() {
    let (service, _temp_dir) = create_test_service().await;
    service.add_disk(&Disk::new(1, "HP", 1, 100, 1)).await.unwrap();
    for id in 1..=3 {
        service.add_file(&File::new(id, "txt", 1)).await.unwrap();
    }
    service.attach(1, 1).await.unwrap();

    let relation = service.close_relation().await.unwrap();

    assert_eq!(relation.len(), 6);
    let close_to_1: Vec<i64> = relation
        .iter()
        .filter(|edge| edge.file_id == 1 && edge.is_close)
        .map(|edge| edge.other_file_id)
        .collect();
    assert!(close_to_1.is_empty());
    assert!(relation
        .iter()
        .filter(|edge| edge.file_id != 1)
        .all(|edge| edge.is_close));
}
