//! Membership operations: files placed on disks, RAM installed in disks.
//!
//! Attaching a file charges its size against the disk's free space. The
//! capacity check and the charge are one conditional `UPDATE`, issued as the
//! first statement of the transaction so the write lock is taken before
//! anything is read. Two concurrent attaches to one disk are therefore
//! serialized by `SQLite` and the second one sees the first one's charge.

#![allow(clippy::missing_errors_doc)]

use crate::error::PlacementError;

use super::core::{SqliteStorage, Violation};

impl SqliteStorage {
    /// Place a file on a disk, charging its size to the disk's free space.
    pub async fn attach_file(&self, file_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        let mut tx = self.begin().await?;

        let charged = sqlx::query(
            "UPDATE disks
             SET free_space = free_space - (SELECT size_needed FROM files WHERE id = ?1)
             WHERE id = ?2
               AND EXISTS (SELECT 1 FROM files WHERE id = ?1)
               AND NOT EXISTS (SELECT 1 FROM file_on_disk WHERE file_id = ?1 AND disk_id = ?2)
               AND free_space >= (SELECT size_needed FROM files WHERE id = ?1)",
        )
        .bind(file_id)
        .bind(disk_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::query_error("UPDATE disks", format!("{e}")))?;

        if charged.rows_affected() == 0 {
            let required: Option<i64> =
                sqlx::query_scalar("SELECT size_needed FROM files WHERE id = ?")
                    .bind(file_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| Self::query_error("SELECT files", format!("{e}")))?;
            let Some(required) = required else {
                return Err(PlacementError::not_found("file", file_id));
            };

            let available: Option<i64> =
                sqlx::query_scalar("SELECT free_space FROM disks WHERE id = ?")
                    .bind(disk_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| Self::query_error("SELECT disks", format!("{e}")))?;
            let Some(available) = available else {
                return Err(PlacementError::not_found("disk", disk_id));
            };

            let linked: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM file_on_disk WHERE file_id = ? AND disk_id = ?",
            )
            .bind(file_id)
            .bind(disk_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| Self::query_error("SELECT file_on_disk", format!("{e}")))?;

            let error = if linked > 0 {
                PlacementError::AlreadyLinked {
                    relation: "file_on_disk".to_string(),
                    left: file_id,
                    right: disk_id,
                }
            } else {
                PlacementError::InsufficientSpace {
                    disk_id,
                    required,
                    available,
                }
            };
            tracing::debug!(file_id, disk_id, %error, "attach rejected");
            return Err(error);
        }

        sqlx::query("INSERT INTO file_on_disk (file_id, disk_id) VALUES (?, ?)")
            .bind(file_id)
            .bind(disk_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| match Self::violation(&e) {
                Some(Violation::Unique) => PlacementError::AlreadyLinked {
                    relation: "file_on_disk".to_string(),
                    left: file_id,
                    right: disk_id,
                },
                _ => Self::query_error("INSERT file_on_disk", format!("{e}")).into(),
            })?;

        Self::commit(tx).await?;
        Ok(())
    }

    /// Remove a file from a disk, returning its size to the disk.
    pub async fn detach_file(&self, file_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        let mut tx = self.begin().await?;

        let removed = sqlx::query("DELETE FROM file_on_disk WHERE file_id = ? AND disk_id = ?")
            .bind(file_id)
            .bind(disk_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::query_error("DELETE file_on_disk", format!("{e}")))?;

        if removed.rows_affected() == 0 {
            return Err(PlacementError::not_found("file_on_disk", file_id));
        }

        sqlx::query(
            "UPDATE disks
             SET free_space = free_space + (SELECT size_needed FROM files WHERE id = ?1)
             WHERE id = ?2",
        )
        .bind(file_id)
        .bind(disk_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::query_error("UPDATE disks", format!("{e}")))?;

        Self::commit(tx).await?;
        Ok(())
    }

    /// Install a RAM module in a disk.
    pub async fn attach_ram(&self, ram_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        let inserted = sqlx::query("INSERT INTO ram_on_disk (ram_id, disk_id) VALUES (?, ?)")
            .bind(ram_id)
            .bind(disk_id)
            .execute(&self.pool)
            .await;

        let Err(e) = inserted else {
            return Ok(());
        };

        match Self::violation(&e) {
            Some(Violation::Unique) => Err(PlacementError::AlreadyLinked {
                relation: "ram_on_disk".to_string(),
                left: ram_id,
                right: disk_id,
            }),
            Some(Violation::ForeignKey) => {
                if self.get_ram(ram_id).await?.is_none() {
                    Err(PlacementError::not_found("ram", ram_id))
                } else {
                    Err(PlacementError::not_found("disk", disk_id))
                }
            }
            _ => Err(Self::query_error("INSERT ram_on_disk", format!("{e}")).into()),
        }
    }

    /// Remove a RAM module from a disk.
    pub async fn detach_ram(&self, ram_id: i64, disk_id: i64) -> Result<(), PlacementError> {
        let removed = sqlx::query("DELETE FROM ram_on_disk WHERE ram_id = ? AND disk_id = ?")
            .bind(ram_id)
            .bind(disk_id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::query_error("DELETE ram_on_disk", format!("{e}")))?;

        if removed.rows_affected() == 0 {
            return Err(PlacementError::not_found("ram_on_disk", ram_id));
        }

        Ok(())
    }
}
