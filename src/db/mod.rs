// Database module - SQLite store for scraped revenue rows

pub mod models;

use rusqlite::{params, Connection};
use rust_decimal::prelude::ToPrimitive;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
pub use models::{Record, StoredRow};

/// Append-only store backed by one SQLite file
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        info!("Opening database at {:?}", path);
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// In-memory store, used by tests
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the `historical` table if it does not exist. Safe to call every run.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        debug!("Schema ready");
        Ok(())
    }

    /// Insert every record as a new row inside a single transaction.
    ///
    /// Existing rows are not checked, so identical records are stored again.
    /// If any record fails, the whole batch is rolled back.
    pub fn append(&mut self, records: &[Record]) -> Result<usize> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| PipelineError::Insert(format!("failed to begin transaction: {}", e)))?;

        {
            let mut stmt = tx
                .prepare("INSERT INTO historical (date, revenue) VALUES (?1, ?2)")
                .map_err(|e| PipelineError::Insert(e.to_string()))?;

            for record in records {
                let revenue = record.revenue_value()?.to_f64().ok_or_else(|| {
                    PipelineError::Insert(format!(
                        "revenue '{}' does not fit a REAL column",
                        record.revenue
                    ))
                })?;

                stmt.execute(params![record.date, revenue]).map_err(|e| {
                    PipelineError::Insert(format!("failed to insert {}: {}", record.date, e))
                })?;
            }
        }

        tx.commit()
            .map_err(|e| PipelineError::Insert(format!("failed to commit batch: {}", e)))?;

        info!("Inserted {} rows", records.len());
        Ok(records.len())
    }

    /// All rows ordered by surrogate key
    pub fn read_all(&self) -> Result<Vec<StoredRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, date, revenue FROM historical ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(StoredRow {
                id: row.get(0)?,
                date: row.get(1)?,
                revenue: row.get(2)?,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM historical", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Close the connection, reporting any error SQLite raises on close
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| PipelineError::Database(e))?;
        debug!("Database closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new("March 31 2023", "23.33"),
            Record::new("December 31 2022", "24.32"),
        ]
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();

        let table_count: i64 = store
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='historical'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 1);
    }

    #[test]
    fn test_append_then_read_all_preserves_order() {
        let mut store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.append(&sample_records()).unwrap();

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "March 31 2023");
        assert_eq!(rows[0].revenue, 23.33);
        assert_eq!(rows[1].date, "December 31 2022");
        assert!(rows[0].id < rows[1].id);
    }

    #[test]
    fn test_append_twice_duplicates_rows() {
        let mut store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.append(&sample_records()).unwrap();
        store.append(&sample_records()).unwrap();

        assert_eq!(store.count().unwrap(), 4);
    }

    #[test]
    fn test_bad_record_rolls_back_whole_batch() {
        let mut store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.append(&sample_records()).unwrap();

        let batch = vec![
            Record::new("June 30 2023", "24.93"),
            Record::new("September 30 2023", "not-a-number"),
        ];
        let err = store.append(&batch).unwrap_err();
        assert!(matches!(err, PipelineError::Insert(_)));

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.date != "June 30 2023"));
    }

    #[test]
    fn test_append_without_schema_is_insert_error() {
        let mut store = Store::open_in_memory().unwrap();
        let err = store.append(&sample_records()).unwrap_err();
        assert!(matches!(err, PipelineError::Insert(_)));
    }
}
