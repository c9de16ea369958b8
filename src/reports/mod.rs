// Reports module - loads stored rows and renders the three revenue charts

pub mod charts;
pub mod frame;

use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::db::Store;
use crate::error::Result;
pub use frame::{annual_totals, monthly_totals, FrameRow, RevenueFrame, DATE_FORMAT};

/// Paths of the chart images written by one report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPaths {
    pub time_series: PathBuf,
    pub annual: PathBuf,
    pub monthly: PathBuf,
}

impl ChartPaths {
    pub fn from_config(config: &Config) -> Self {
        Self {
            time_series: config.time_series_path(),
            annual: config.annual_path(),
            monthly: config.monthly_path(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        [&self.time_series, &self.annual, &self.monthly].into_iter()
    }
}

pub struct Reporter {
    paths: ChartPaths,
}

impl Reporter {
    pub fn new(paths: ChartPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ChartPaths {
        &self.paths
    }

    pub fn load(&self, store: &Store) -> Result<RevenueFrame> {
        let frame = RevenueFrame::load(store)?;
        info!("Loaded {} rows for reporting", frame.len());
        Ok(frame)
    }

    pub fn time_series_chart(&self, frame: &RevenueFrame) -> Result<()> {
        charts::draw_time_series(frame, &self.paths.time_series)?;
        info!("Wrote time series chart to {:?}", self.paths.time_series);
        Ok(())
    }

    pub fn annual_chart(&self, frame: &RevenueFrame) -> Result<()> {
        charts::draw_annual(frame, &self.paths.annual)?;
        info!("Wrote annual chart to {:?}", self.paths.annual);
        Ok(())
    }

    pub fn monthly_chart(&self, frame: &RevenueFrame) -> Result<()> {
        charts::draw_monthly(frame, &self.paths.monthly)?;
        info!("Wrote monthly chart to {:?}", self.paths.monthly);
        Ok(())
    }

    /// Render all three charts, stopping at the first failure
    pub fn render_all(&self, frame: &RevenueFrame) -> Result<()> {
        self.time_series_chart(frame)?;
        self.annual_chart(frame)?;
        self.monthly_chart(frame)
    }
}
