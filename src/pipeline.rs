//! Pipeline orchestration
//!
//! Runs fetch -> extract -> store -> report in order. Each stage finishes
//! before the next starts and the first failure aborts the run. The store
//! is closed after the report stage whether or not reporting succeeded.

use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::Config;
use crate::db::{Record, Store};
use crate::error::{PipelineError, Result};
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::reports::{annual_totals, ChartPaths, Reporter};

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub inserted: usize,
    pub total_rows: i64,
    pub annual: BTreeMap<i32, f64>,
    pub charts: ChartPaths,
}

/// Fetch the configured page and run the remaining stages on it
pub fn run(config: &Config) -> Result<RunSummary> {
    let fetcher = Fetcher::from_config(config)?;
    let html = fetcher.fetch(&config.url)?;
    run_with_html(config, &html)
}

/// Run extract, store and report on an already fetched page
pub fn run_with_html(config: &Config, html: &str) -> Result<RunSummary> {
    let extractor = Extractor::new()?;

    let page = extractor.inspect(html);
    debug!(
        "Page has {} table(s), headers: {:?}",
        page.table_count, page.header_labels
    );

    let records = extractor.parse(html)?;
    info!("Extracted {} records", records.len());

    let mut store = Store::open(&config.db_path)?;
    let outcome = store_and_report(&mut store, &records, config);
    let closed = store.close();

    let summary = outcome?;
    closed?;
    Ok(summary)
}

fn store_and_report(store: &mut Store, records: &[Record], config: &Config) -> Result<RunSummary> {
    store.ensure_schema()?;
    let inserted = store.append(records)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| {
        PipelineError::Chart(format!(
            "failed to create output directory {}: {}",
            config.output_dir.display(),
            e
        ))
    })?;

    let reporter = Reporter::new(ChartPaths::from_config(config));
    let frame = reporter.load(store)?;
    reporter.render_all(&frame)?;

    Ok(RunSummary {
        inserted,
        total_rows: store.count()?,
        annual: annual_totals(&frame),
        charts: reporter.paths().clone(),
    })
}
