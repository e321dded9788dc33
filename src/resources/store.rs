//! Resource Storage
//! Mission: Parameterised CRUD statements for any `Resource` table

use super::{Record, Resource};
use crate::db::Database;
use anyhow::{Context, Result};
use rusqlite::{params, types::ToSql, OptionalExtension, Row};
use std::marker::PhantomData;

/// CRUD access to the table behind `R`.
/// Identifiers come from the `Resource` constants; values are always bound.
pub struct ResourceStore<R> {
    db: Database,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceStore<R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            _resource: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record<R>> {
        Ok(Record {
            id: row.get(0)?,
            fields: R::from_row(row, 1)?,
        })
    }

    /// Insert a row, returning its id
    pub async fn insert(&self, fields: &R) -> Result<i64> {
        let placeholders = (1..=R::COLUMNS.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders
        );

        self.db
            .call(|conn| {
                conn.execute(&sql, fields.to_params().as_slice())?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .with_context(|| format!("Failed to insert into {}", R::TABLE))
    }

    pub async fn find(&self, id: i64) -> Result<Option<Record<R>>> {
        let sql = format!("{} WHERE id = ?1", Self::select_sql());
        self.db
            .call(|conn| {
                conn.query_row(&sql, params![id], Self::record_from_row)
                    .optional()
            })
            .await
            .with_context(|| format!("Failed to read {} row {}", R::TABLE, id))
    }

    /// Every row, in the store's scan order
    pub async fn list(&self) -> Result<Vec<Record<R>>> {
        let sql = Self::select_sql();
        self.db
            .call(|conn| {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map([], Self::record_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await
            .with_context(|| format!("Failed to list {}", R::TABLE))
    }

    /// One page of rows ordered by id
    pub async fn page(&self, limit: i64, offset: i64) -> Result<Vec<Record<R>>> {
        let sql = format!("{} ORDER BY id LIMIT ?1 OFFSET ?2", Self::select_sql());
        self.db
            .call(|conn| {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(params![limit, offset], Self::record_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await
            .with_context(|| format!("Failed to page {}", R::TABLE))
    }

    pub async fn count(&self) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
        self.db
            .call(|conn| conn.query_row(&sql, [], |row| row.get(0)))
            .await
            .with_context(|| format!("Failed to count {}", R::TABLE))
    }

    /// Overwrite every data column of `id`. Returns the number of rows touched,
    /// which is 0 when the id does not exist.
    pub async fn update(&self, id: i64, fields: &R) -> Result<usize> {
        let assignments = R::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ?{}", col, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            R::TABLE,
            assignments,
            R::COLUMNS.len() + 1
        );

        self.db
            .call(|conn| {
                let mut bound = fields.to_params();
                bound.push(&id as &dyn ToSql);
                conn.execute(&sql, bound.as_slice())
            })
            .await
            .with_context(|| format!("Failed to update {} row {}", R::TABLE, id))
    }

    /// Returns the number of rows removed (0 or 1)
    pub async fn delete(&self, id: i64) -> Result<usize> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
        self.db
            .call(|conn| conn.execute(&sql, params![id]))
            .await
            .with_context(|| format!("Failed to delete {} row {}", R::TABLE, id))
    }
}
