//! HTML table extraction
//!
//! Pulls the two-column (date, revenue) table out of the fetched page.
//!
//! The page is assumed to carry one relevant table; the rows of the *first*
//! `<tbody>` in document order are used. A page with several tables ahead of
//! the revenue table will be misread. html5ever inserts an implicit `<tbody>`
//! into tables that lack one, so bare `<table><tr>` markup is still found.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::db::Record;
use crate::error::{PipelineError, Result};

/// Diagnostic view of the page structure, logged before extraction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSummary {
    pub table_count: usize,
    pub header_labels: Vec<String>,
}

pub struct Extractor {
    table: Selector,
    tbody: Selector,
    row: Selector,
    cell: Selector,
    panel_header: Selector,
    any_header: Selector,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            table: selector("table")?,
            tbody: selector("tbody")?,
            row: selector("tr")?,
            cell: selector("td")?,
            panel_header: selector("div.panel-content thead th")?,
            any_header: selector("thead th")?,
        })
    }

    /// Extract one record per body row, in document order.
    ///
    /// Rows without any `<td>` (header rows placed inside the body) are
    /// skipped. A row with a single `<td>`, a missing `<tbody>` or a body
    /// without data rows fails the whole extraction.
    pub fn parse(&self, html: &str) -> Result<Vec<Record>> {
        let document = Html::parse_document(html);

        let tbody = document
            .select(&self.tbody)
            .next()
            .ok_or_else(|| PipelineError::Parse("no table body found in page".to_string()))?;

        let mut records = Vec::new();
        for (index, row) in tbody.select(&self.row).enumerate() {
            let cells: Vec<ElementRef> = row.select(&self.cell).collect();
            match cells.as_slice() {
                [] => continue,
                [date, revenue, ..] => records.push(Record::new(
                    normalize_date(&cell_text(date)),
                    normalize_revenue(&cell_text(revenue)),
                )),
                [_] => {
                    return Err(PipelineError::Parse(format!(
                        "row {} has 1 cell, expected date and revenue columns",
                        index
                    )))
                }
            }
        }

        if records.is_empty() {
            return Err(PipelineError::Parse(
                "table body contains no data rows".to_string(),
            ));
        }

        debug!("Extracted {} records", records.len());
        Ok(records)
    }

    /// Count tables and read the column headers, preferring the
    /// `div.panel-content` header when the page has one
    pub fn inspect(&self, html: &str) -> PageSummary {
        let document = Html::parse_document(html);

        let mut header_labels: Vec<String> = document
            .select(&self.panel_header)
            .map(|th| cell_text(&th))
            .collect();
        if header_labels.is_empty() {
            header_labels = document
                .select(&self.any_header)
                .map(|th| cell_text(&th))
                .collect();
        }

        PageSummary {
            table_count: document.select(&self.table).count(),
            header_labels,
        }
    }
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| PipelineError::Parse(format!("invalid selector '{}': {}", css, e)))
}

/// Text content of an element with whitespace runs collapsed
fn cell_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// "January 1, 2023" -> "January 1 2023"
pub fn normalize_date(label: &str) -> String {
    label.replace(',', "").trim().to_string()
}

/// "5.50B" -> "5.50"
pub fn normalize_revenue(label: &str) -> String {
    let trimmed = label.trim();
    let without_unit = match trimmed.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => &trimmed[..trimmed.len() - 1],
        _ => trimmed,
    };
    without_unit.trim().to_string()
}
