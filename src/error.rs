//! Error handling for revscrape
//!
//! Every pipeline stage reports failures through `PipelineError`. The kind
//! tells the caller which stage aborted the run; the payload carries the
//! detail. The binary wraps these in anyhow for context chaining.

use thiserror::Error;

/// Failure kinds for the extract-load-report pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("insert error: {0}")]
    Insert(String),

    #[error("format error: date '{value}' does not match '{format}'")]
    Format { value: String, format: &'static str },

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("chart error: {0}")]
    Chart(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
