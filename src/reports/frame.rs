// Revenue frame - persisted rows with typed dates and year/month columns

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::db::{Store, StoredRow};
use crate::error::{PipelineError, Result};

/// Textual date format written by the extractor ("January 1 2023")
pub const DATE_FORMAT: &str = "%B %d %Y";

#[derive(Debug, Clone, PartialEq)]
pub struct FrameRow {
    pub id: i64,
    pub date: NaiveDate,
    pub revenue: f64,
    pub year: i32,
    pub month: u32,
}

/// Rows in storage order. Never mutated by the chart operations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevenueFrame {
    rows: Vec<FrameRow>,
}

impl RevenueFrame {
    /// Read every persisted row and derive the date columns
    pub fn load(store: &Store) -> Result<Self> {
        Self::from_rows(store.read_all()?)
    }

    /// Build a frame from stored rows. One unparseable date fails the whole load.
    pub fn from_rows(rows: Vec<StoredRow>) -> Result<Self> {
        let rows = rows
            .into_iter()
            .map(|row| -> Result<FrameRow> {
                let date = parse_date(&row.date)?;
                Ok(FrameRow {
                    id: row.id,
                    date,
                    revenue: row.revenue,
                    year: date.year(),
                    month: date.month(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[FrameRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (date, revenue) pairs sorted by date, ties kept in storage order
    pub fn chronological(&self) -> Vec<(NaiveDate, f64)> {
        let mut points: Vec<(NaiveDate, f64)> =
            self.rows.iter().map(|r| (r.date, r.revenue)).collect();
        points.sort_by_key(|(date, _)| *date);
        points
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| PipelineError::Format {
        value: value.to_string(),
        format: DATE_FORMAT,
    })
}

/// Revenue summed per calendar year, ascending
pub fn annual_totals(frame: &RevenueFrame) -> BTreeMap<i32, f64> {
    let mut totals = BTreeMap::new();
    for row in frame.rows() {
        *totals.entry(row.year).or_insert(0.0) += row.revenue;
    }
    totals
}

/// Revenue summed per calendar month (1-12) across all years
pub fn monthly_totals(frame: &RevenueFrame) -> BTreeMap<u32, f64> {
    let mut totals = BTreeMap::new();
    for row in frame.rows() {
        *totals.entry(row.month).or_insert(0.0) += row.revenue;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(id: i64, date: &str, revenue: f64) -> StoredRow {
        StoredRow {
            id,
            date: date.to_string(),
            revenue,
        }
    }

    #[test]
    fn test_from_rows_derives_year_and_month() {
        let frame = RevenueFrame::from_rows(vec![stored(1, "March 31 2023", 23.33)]).unwrap();
        let row = &frame.rows()[0];
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2023, 3, 31).unwrap());
        assert_eq!(row.year, 2023);
        assert_eq!(row.month, 3);
    }

    #[test]
    fn test_single_digit_day_parses() {
        assert_eq!(
            parse_date("January 1 2023").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_unexpected_date_format_fails_load() {
        let err = RevenueFrame::from_rows(vec![
            stored(1, "March 31 2023", 23.33),
            stored(2, "2023-06-30", 24.93),
        ])
        .unwrap_err();
        assert!(matches!(err, PipelineError::Format { ref value, .. } if value == "2023-06-30"));
    }

    #[test]
    fn test_annual_totals_sum_per_year() {
        let frame = RevenueFrame::from_rows(vec![
            stored(1, "March 31 2022", 10.0),
            stored(2, "June 30 2022", 5.0),
            stored(3, "March 31 2023", 7.0),
        ])
        .unwrap();

        let totals = annual_totals(&frame);
        assert_eq!(totals.into_iter().collect::<Vec<_>>(), vec![(2022, 15.0), (2023, 7.0)]);
    }

    #[test]
    fn test_monthly_totals_merge_years() {
        let frame = RevenueFrame::from_rows(vec![
            stored(1, "January 31 2022", 10.0),
            stored(2, "January 31 2023", 4.0),
            stored(3, "April 30 2023", 2.5),
        ])
        .unwrap();

        let totals = monthly_totals(&frame);
        assert_eq!(totals.get(&1), Some(&14.0));
        assert_eq!(totals.get(&4), Some(&2.5));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_chronological_sorts_newest_first_pages() {
        let frame = RevenueFrame::from_rows(vec![
            stored(1, "June 30 2023", 24.93),
            stored(2, "March 31 2023", 23.33),
        ])
        .unwrap();

        let points = frame.chronological();
        assert_eq!(points[0].0, NaiveDate::from_ymd_opt(2023, 3, 31).unwrap());
        assert_eq!(points[1].1, 24.93);
    }
}
