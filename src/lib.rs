//! Revscrape - revenue table scraper
//!
//! Fetches one HTML page holding a (date, revenue) table, stores the rows
//! in SQLite and renders time series, annual and monthly charts.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod reports;

pub use error::{PipelineError, Result};
