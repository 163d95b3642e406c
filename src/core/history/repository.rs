//! Database operations for scan history.

use super::types::{now_timestamp, HistoryPage, HistoryRecord};
use crate::error::HistoryError;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// Repository for scan history operations.
///
/// Shares the connection opened by [`crate::core::database::Database`],
/// which also guarantees the `history` table exists.
pub struct HistoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl HistoryRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, HistoryError> {
        self.conn.lock().map_err(|_| HistoryError::Poisoned)
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<HistoryRecord> {
        // Rows copied from older schemas may carry NULLs
        Ok(HistoryRecord {
            id: row.get(0)?,
            value: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            timestamp: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            format: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        })
    }

    /// Record a scan made now
    pub fn add(&self, value: &str, format: &str) -> Result<HistoryRecord, HistoryError> {
        self.insert(value, &now_timestamp(), format)
    }

    /// Record a scan with an explicit timestamp
    pub fn insert(
        &self,
        value: &str,
        timestamp: &str,
        format: &str,
    ) -> Result<HistoryRecord, HistoryError> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO history (value, timestamp, format) VALUES (?, ?, ?)",
            params![value, timestamp, format],
        )?;

        Ok(HistoryRecord {
            id: conn.last_insert_rowid(),
            value: value.to_string(),
            timestamp: timestamp.to_string(),
            format: format.to_string(),
        })
    }

    /// List history with pagination, newest first
    pub fn list(&self, limit: usize, offset: usize) -> Result<HistoryPage, HistoryError> {
        let conn = self.lock()?;

        let total_count = Self::count_locked(&conn)?;

        let mut stmt = conn.prepare(
            "SELECT id, value, timestamp, format FROM history
             ORDER BY id DESC
             LIMIT ? OFFSET ?",
        )?;

        let records = stmt
            .query_map(params![limit as i64, offset as i64], Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(HistoryPage {
            records,
            total_count,
        })
    }

    /// Get a record by id
    pub fn get(&self, id: i64) -> Result<Option<HistoryRecord>, HistoryError> {
        let conn = self.lock()?;

        let record = conn
            .query_row(
                "SELECT id, value, timestamp, format FROM history WHERE id = ?",
                [id],
                Self::from_row,
            )
            .optional()?;

        Ok(record)
    }

    /// Delete records by id, returning how many existed
    pub fn delete(&self, ids: &[i64]) -> Result<usize, HistoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let conn = self.lock()?;
        let placeholders = vec!["?"; ids.len()].join(", ");
        let removed = conn.execute(
            &format!("DELETE FROM history WHERE id IN ({})", placeholders),
            params_from_iter(ids.iter()),
        )?;

        Ok(removed)
    }

    /// Remove every record
    pub fn clear(&self) -> Result<usize, HistoryError> {
        let conn = self.lock()?;
        Ok(conn.execute("DELETE FROM history", [])?)
    }

    pub fn count(&self) -> Result<usize, HistoryError> {
        let conn = self.lock()?;
        Self::count_locked(&conn)
    }

    /// Keep only the newest `max` records. Zero or negative keeps none.
    pub fn prune(&self, max: i32) -> Result<usize, HistoryError> {
        let conn = self.lock()?;
        let keep = i64::from(max.max(0));

        let removed = conn.execute(
            "DELETE FROM history WHERE id NOT IN
             (SELECT id FROM history ORDER BY id DESC LIMIT ?)",
            [keep],
        )?;

        if removed > 0 {
            tracing::debug!(removed, keep, "pruned history");
        }
        Ok(removed)
    }

    fn count_locked(conn: &Connection) -> Result<usize, HistoryError> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
