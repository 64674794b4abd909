//! RAM storage operations.

#![allow(clippy::missing_errors_doc)]

use crate::error::PlacementError;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::core::{SqliteStorage, Violation};
use super::types::Ram;

impl SqliteStorage {
    /// Insert a RAM module.
    pub async fn add_ram(&self, ram: &Ram) -> Result<(), PlacementError> {
        if ram.id <= 0 {
            return Err(PlacementError::invalid("ram.id", "must be positive"));
        }
        if ram.size <= 0 {
            return Err(PlacementError::invalid("ram.size", "must be positive"));
        }

        sqlx::query("INSERT INTO rams (id, company, size) VALUES (?, ?, ?)")
            .bind(ram.id)
            .bind(&ram.company)
            .bind(ram.size)
            .execute(&self.pool)
            .await
            .map_err(|e| match Self::violation(&e) {
                Some(Violation::Unique) => PlacementError::AlreadyExists {
                    entity: "ram".to_string(),
                    id: ram.id,
                },
                Some(Violation::Check | Violation::NotNull) => {
                    PlacementError::invalid("ram", &format!("{e}"))
                }
                _ => Self::query_error("INSERT rams", format!("{e}")).into(),
            })?;

        Ok(())
    }

    /// Get a RAM module by ID.
    pub async fn get_ram(&self, id: i64) -> Result<Option<Ram>, PlacementError> {
        let row = sqlx::query("SELECT id, company, size FROM rams WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::query_error("SELECT rams", format!("{e}")))?;

        Ok(row.map(|row| Self::row_to_ram(&row)))
    }

    pub(crate) fn row_to_ram(row: &SqliteRow) -> Ram {
        Ram {
            id: row.get("id"),
            company: row.get("company"),
            size: row.get("size"),
        }
    }

    /// Delete a RAM module. Its disk memberships cascade.
    pub async fn delete_ram(&self, id: i64) -> Result<(), PlacementError> {
        let result = sqlx::query("DELETE FROM rams WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::query_error("DELETE rams", format!("{e}")))?;

        if result.rows_affected() == 0 {
            return Err(PlacementError::not_found("ram", id));
        }

        Ok(())
    }
}
