//! File storage operations.

#![allow(clippy::missing_errors_doc)]

use crate::error::PlacementError;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::core::{SqliteStorage, Violation};
use super::types::{Disk, File};

impl SqliteStorage {
    /// Reject files the schema would refuse.
    pub(crate) fn validate_file(file: &File) -> Result<(), PlacementError> {
        if file.id <= 0 {
            return Err(PlacementError::invalid("file.id", "must be positive"));
        }
        if file.size_needed < 0 {
            return Err(PlacementError::invalid("file.size_needed", "must not be negative"));
        }
        Ok(())
    }

    /// Map a failed file insert to its placement error.
    pub(crate) fn file_insert_error(file: &File, error: &sqlx::Error) -> PlacementError {
        match Self::violation(error) {
            Some(Violation::Unique) => PlacementError::AlreadyExists {
                entity: "file".to_string(),
                id: file.id,
            },
            Some(Violation::Check | Violation::NotNull) => {
                PlacementError::invalid("file", &format!("{error}"))
            }
            _ => Self::query_error("INSERT files", format!("{error}")).into(),
        }
    }

    /// Insert a file.
    pub async fn add_file(&self, file: &File) -> Result<(), PlacementError> {
        Self::validate_file(file)?;

        sqlx::query("INSERT INTO files (id, file_type, size_needed) VALUES (?, ?, ?)")
            .bind(file.id)
            .bind(&file.file_type)
            .bind(file.size_needed)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::file_insert_error(file, &e))?;

        Ok(())
    }

    /// Insert a disk and a file together; either both land or neither does.
    pub async fn add_disk_and_file(&self, disk: &Disk, file: &File) -> Result<(), PlacementError> {
        Self::validate_disk(disk)?;
        Self::validate_file(file)?;

        let mut tx = self.begin().await?;

        sqlx::query("INSERT INTO files (id, file_type, size_needed) VALUES (?, ?, ?)")
            .bind(file.id)
            .bind(&file.file_type)
            .bind(file.size_needed)
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::file_insert_error(file, &e))?;

        sqlx::query("INSERT INTO disks (id, company, speed, free_space, cost) VALUES (?, ?, ?, ?, ?)")
            .bind(disk.id)
            .bind(&disk.company)
            .bind(disk.speed)
            .bind(disk.free_space)
            .bind(disk.cost)
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::disk_insert_error(disk, &e))?;

        Self::commit(tx).await?;
        Ok(())
    }

    /// Get a file by ID.
    pub async fn get_file(&self, id: i64) -> Result<Option<File>, PlacementError> {
        let row = sqlx::query("SELECT id, file_type, size_needed FROM files WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::query_error("SELECT files", format!("{e}")))?;

        Ok(row.map(|row| Self::row_to_file(&row)))
    }

    pub(crate) fn row_to_file(row: &SqliteRow) -> File {
        File {
            id: row.get("id"),
            file_type: row.get("file_type"),
            size_needed: row.get("size_needed"),
        }
    }

    /// Delete a file.
    ///
    /// Every disk holding the file gets its `size_needed` back before the
    /// membership rows cascade away.
    pub async fn delete_file(&self, id: i64) -> Result<(), PlacementError> {
        let mut tx = self.begin().await?;

        sqlx::query(
            "UPDATE disks
             SET free_space = free_space + (SELECT size_needed FROM files WHERE id = ?1)
             WHERE id IN (SELECT disk_id FROM file_on_disk WHERE file_id = ?1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::query_error("UPDATE disks", format!("{e}")))?;

        let result = sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::query_error("DELETE files", format!("{e}")))?;

        if result.rows_affected() == 0 {
            return Err(PlacementError::not_found("file", id));
        }

        Self::commit(tx).await?;
        Ok(())
    }
}
