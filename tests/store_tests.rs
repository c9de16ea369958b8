//! Store behavior against an on-disk database
//!
//! - schema creation is idempotent across runs
//! - rows persist across open/close and come back in insertion order
//! - a failing batch leaves no rows behind

use anyhow::Result;
use revscrape::db::{Record, Store};
use revscrape::PipelineError;
use tempfile::TempDir;

/// Test helper: store file inside a fresh temp dir
fn create_test_store() -> Result<(TempDir, Store)> {
    let temp_dir = TempDir::new()?;
    let store = Store::open(&temp_dir.path().join("test.db"))?;
    store.ensure_schema()?;
    Ok((temp_dir, store))
}

#[test]
fn test_rows_persist_across_reopen() -> Result<()> {
    let (temp_dir, mut store) = create_test_store()?;
    store.append(&[
        Record::new("June 30 2023", "24.93"),
        Record::new("March 31 2023", "23.33"),
    ])?;
    store.close()?;

    let store = Store::open(&temp_dir.path().join("test.db"))?;
    store.ensure_schema()?;
    let rows = store.read_all()?;

    let pairs: Vec<(String, f64)> = rows.into_iter().map(|r| (r.date, r.revenue)).collect();
    assert_eq!(
        pairs,
        vec![
            ("June 30 2023".to_string(), 24.93),
            ("March 31 2023".to_string(), 23.33),
        ]
    );
    Ok(())
}

#[test]
fn test_ids_keep_increasing_across_batches() -> Result<()> {
    let (_temp_dir, mut store) = create_test_store()?;
    store.append(&[Record::new("June 30 2023", "24.93")])?;
    store.append(&[Record::new("June 30 2023", "24.93")])?;

    let rows = store.read_all()?;
    assert_eq!(rows.len(), 2);
    assert!(rows[1].id > rows[0].id);
    assert_eq!(rows[0].date, rows[1].date);
    Ok(())
}

#[test]
fn test_failed_batch_leaves_no_rows() -> Result<()> {
    let (_temp_dir, mut store) = create_test_store()?;

    let result = store.append(&[
        Record::new("June 30 2023", "24.93"),
        Record::new("March 31 2023", "23.33"),
        Record::new("December 31 2022", "24.32 billion"),
    ]);

    assert!(matches!(result, Err(PipelineError::Insert(_))));
    assert_eq!(store.count()?, 0);
    assert!(store.read_all()?.is_empty());
    Ok(())
}
