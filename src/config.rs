//! Static run configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `REVSCRAPE_*` environment variables. The binary applies CLI flags last.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PipelineError, Result};

pub const DEFAULT_URL: &str = "https://ycharts.com/companies/TSLA/revenues";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_DB_PATH: &str = "tesla.db";

pub const ENV_URL: &str = "REVSCRAPE_URL";
pub const ENV_DB: &str = "REVSCRAPE_DB";
pub const ENV_OUTPUT_DIR: &str = "REVSCRAPE_OUTPUT_DIR";

/// File names of the three chart artifacts, relative to `Config::output_dir`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartFiles {
    pub time_series: String,
    pub annual: String,
    pub monthly: String,
}

impl Default for ChartFiles {
    fn default() -> Self {
        Self {
            time_series: "line_plot.svg".to_string(),
            annual: "barplot_year.svg".to_string(),
            monthly: "barplot_month.svg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page holding the revenue table
    pub url: String,
    pub user_agent: String,
    /// Extra request headers sent with the fetch
    pub headers: BTreeMap<String, String>,
    pub timeout_secs: u64,
    pub db_path: PathBuf,
    pub output_dir: PathBuf,
    pub charts: ChartFiles,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: BTreeMap::new(),
            timeout_secs: 30,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            output_dir: PathBuf::from("."),
            charts: ChartFiles::default(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then `file` if given, then environment overrides
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML configuration file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Apply `REVSCRAPE_*` overrides using `lookup` to read variables
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL).filter(|v| !v.is_empty()) {
            self.url = url;
        }
        if let Some(db) = lookup(ENV_DB).filter(|v| !v.is_empty()) {
            self.db_path = PathBuf::from(db);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
    }

    pub fn time_series_path(&self) -> PathBuf {
        self.output_dir.join(&self.charts.time_series)
    }

    pub fn annual_path(&self) -> PathBuf {
        self.output_dir.join(&self.charts.annual)
    }

    pub fn monthly_path(&self) -> PathBuf {
        self.output_dir.join(&self.charts.monthly)
    }
}
