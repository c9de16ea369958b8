use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{PipelineError, Result};

/// One (date, revenue) observation as extracted from the page.
///
/// Both fields hold normalized labels: the date without thousands
/// separators ("January 1 2023") and the revenue without its unit
/// suffix ("5.50"). Numeric and calendar parsing happen downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: String,
    pub revenue: String,
}

impl Record {
    pub fn new(date: impl Into<String>, revenue: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            revenue: revenue.into(),
        }
    }

    /// Parse the revenue label as a decimal
    pub fn revenue_value(&self) -> Result<Decimal> {
        Decimal::from_str(&self.revenue).map_err(|e| {
            PipelineError::Insert(format!(
                "revenue '{}' for {} is not numeric: {}",
                self.revenue, self.date, e
            ))
        })
    }
}

/// A row of the `historical` table
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    pub id: i64,
    pub date: String,
    pub revenue: f64,
}
