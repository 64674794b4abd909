//! `PlacementStore` implementation for `SqliteStorage`.

#![allow(clippy::missing_errors_doc)]

use async_trait::async_trait;

use crate::error::{PlacementError, StorageError};
use crate::traits::PlacementStore;

use super::core::SqliteStorage;
use super::types::{Disk, File, Ram, Snapshot};

#[async_trait]
impl PlacementStore for SqliteStorage {
    async fn add_file(&self, file: &File) -> Result<(), PlacementError> {
        Self::add_file(self, file).await
    }

    async fn get_file(&self, id: i64) -> Result<Option<File>, PlacementError> {
        Self::get_file(self, id).await
    }

    async fn delete_file(&self, id: i64) -> Result<(), PlacementError> {
        Self::delete_file(self, id).await
    }

    async fn add_disk(&self, disk: &Disk) -> Result<(), PlacementError> {
        Self::add_disk(self, disk).await
    }

    async fn get_disk(&self, id: i64) -> Result<Option<Disk>, PlacementError> {
        Self::get_disk(self, id).await
    }

    async fn delete_disk(&self, id: i64) -> Result<(), PlacementError> {
        Self::delete_disk(self, id).await
    }

    async fn add_ram(&self, ram: &Ram) -> Result<(), PlacementError> {
        Self::add_ram(self, ram).await
    }

    async fn get_ram(&self, id: i64) -> Result<Option<Ram>, PlacementError> {
        Self::get_ram(self, id).await
    }

    async fn delete_ram(&self, id: i64) -> Result<(), PlacementError> {
        Self::delete_ram(self, id).await
    }

    async fn add_disk_and_file(&self, disk: &Disk, file: &File) -> Result<(), PlacementError> {
        Self::add_disk_and_file(self, disk, file).await
    }

    async fn attach_file(&self, file_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        Self::attach_file(self, file_id, disk_id).await
    }

    async fn detach_file(&self, file_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        Self::detach_file(self, file_id, disk_id).await
    }

    async fn attach_ram(&self, ram_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        Self::attach_ram(self, ram_id, disk_id).await
    }

    async fn detach_ram(&self, ram_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        Self::detach_ram(self, ram_id, disk_id).await
    }

    async fn snapshot(&self) -> Result<Snapshot, StorageError> {
        Self::snapshot(self).await
    }
}
