//! Disk storage operations.

#![allow(clippy::missing_errors_doc)]

use crate::error::PlacementError;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::core::{SqliteStorage, Violation};
use super::types::Disk;

impl SqliteStorage {
    /// Reject disks the schema would refuse.
    pub(crate) fn validate_disk(disk: &Disk) -> Result<(), PlacementError> {
        if disk.id <= 0 {
            return Err(PlacementError::invalid("disk.id", "must be positive"));
        }
        if disk.speed <= 0 {
            return Err(PlacementError::invalid("disk.speed", "must be positive"));
        }
        if disk.free_space < 0 {
            return Err(PlacementError::invalid("disk.free_space", "must not be negative"));
        }
        if disk.cost <= 0 {
            return Err(PlacementError::invalid("disk.cost", "must be positive"));
        }
        Ok(())
    }

    /// Map a failed disk insert to its placement error.
    pub(crate) fn disk_insert_error(disk: &Disk, error: &sqlx::Error) -> PlacementError {
        match Self::violation(error) {
            Some(Violation::Unique) => PlacementError::AlreadyExists {
                entity: "disk".to_string(),
                id: disk.id,
            },
            Some(Violation::Check | Violation::NotNull) => {
                PlacementError::invalid("disk", &format!("{error}"))
            }
            _ => Self::query_error("INSERT disks", format!("{error}")).into(),
        }
    }

    /// Insert a disk.
    pub async fn add_disk(&self, disk: &Disk) -> Result<(), PlacementError> {
        Self::validate_disk(disk)?;

        sqlx::query(
            "INSERT INTO disks (id, company, speed, free_space, cost) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(disk.id)
        .bind(&disk.company)
        .bind(disk.speed)
        .bind(disk.free_space)
        .bind(disk.cost)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::disk_insert_error(disk, &e))?;

        Ok(())
    }

    /// Get a disk by ID.
    pub async fn get_disk(&self, id: i64) -> Result<Option<Disk>, PlacementError> {
        let row = sqlx::query("SELECT id, company, speed, free_space, cost FROM disks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::query_error("SELECT disks", format!("{e}")))?;

        Ok(row.map(|row| Self::row_to_disk(&row)))
    }

    pub(crate) fn row_to_disk(row: &SqliteRow) -> Disk {
        Disk {
            id: row.get("id"),
            company: row.get("company"),
            speed: row.get("speed"),
            free_space: row.get("free_space"),
            cost: row.get("cost"),
        }
    }

    /// Delete a disk. Its file and RAM memberships cascade.
    pub async fn delete_disk(&self, id: i64) -> Result<(), PlacementError> {
        let result = sqlx::query("DELETE FROM disks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::query_error("DELETE disks", format!("{e}")))?;

        if result.rows_affected() == 0 {
            return Err(PlacementError::not_found("disk", id));
        }

        Ok(())
    }
}
