//! Consistent whole-database reads.

#![allow(clippy::missing_errors_doc)]

use crate::error::StorageError;
use sqlx::Row;

use super::core::SqliteStorage;
use super::types::Snapshot;

impl SqliteStorage {
    /// Read every table inside one transaction.
    ///
    /// Under WAL the transaction pins a single view of the database, so a
    /// concurrent attach is seen either completely or not at all.
    pub async fn snapshot(&self) -> Result<Snapshot, StorageError> {
        let mut tx = self.begin().await?;
        let mut snapshot = Snapshot::default();

        let rows = sqlx::query("SELECT id, file_type, size_needed FROM files")
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| Self::query_error("SELECT files", format!("{e}")))?;
        for row in &rows {
            let file = Self::row_to_file(row);
            snapshot.files.insert(file.id, file);
        }

        let rows = sqlx::query("SELECT id, company, speed, free_space, cost FROM disks")
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| Self::query_error("SELECT disks", format!("{e}")))?;
        for row in &rows {
            let disk = Self::row_to_disk(row);
            snapshot.disks.insert(disk.id, disk);
        }

        let rows = sqlx::query("SELECT id, company, size FROM rams")
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| Self::query_error("SELECT rams", format!("{e}")))?;
        for row in &rows {
            let ram = Self::row_to_ram(row);
            snapshot.rams.insert(ram.id, ram);
        }

        let rows = sqlx::query("SELECT file_id, disk_id FROM file_on_disk")
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| Self::query_error("SELECT file_on_disk", format!("{e}")))?;
        snapshot.file_on_disk = rows
            .iter()
            .map(|row| (row.get("file_id"), row.get("disk_id")))
            .collect();

        let rows = sqlx::query("SELECT ram_id, disk_id FROM ram_on_disk")
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| Self::query_error("SELECT ram_on_disk", format!("{e}")))?;
        snapshot.ram_on_disk = rows
            .iter()
            .map(|row| (row.get("ram_id"), row.get("disk_id")))
            .collect();

        Self::commit(tx).await?;
        Ok(snapshot)
    }

    /// Delete every row of every table.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let mut tx = self.begin().await?;

        for table in ["file_on_disk", "ram_on_disk", "files", "disks", "rams"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await
                .map_err(|e| Self::query_error(&format!("DELETE {table}"), format!("{e}")))?;
        }

        Self::commit(tx).await
    }
}
