// Chart drawing - SVG images for the revenue frame

use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use std::path::Path;

use super::frame::{annual_totals, monthly_totals, RevenueFrame};
use crate::error::{PipelineError, Result};

const SIZE: (u32, u32) = (1000, 600);

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn chart_error<E: std::fmt::Display>(path: &Path, e: E) -> PipelineError {
    PipelineError::Chart(format!("failed to draw {}: {}", path.display(), e))
}

fn ensure_rows(frame: &RevenueFrame, chart: &str) -> Result<()> {
    if frame.is_empty() {
        return Err(PipelineError::EmptyData(format!(
            "no stored rows to draw the {} chart",
            chart
        )));
    }
    Ok(())
}

/// Value axis bounds: always includes zero, 10% headroom above the peak
fn value_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };
    min * 1.1..top
}

/// Line chart of revenue over date
pub fn draw_time_series(frame: &RevenueFrame, path: &Path) -> Result<()> {
    ensure_rows(frame, "time series")?;

    let points = frame.chronological();
    let start = points[0].0;
    let last = points[points.len() - 1].0;
    let end = if last > start {
        last
    } else {
        start.checked_add_days(Days::new(1)).unwrap_or(start)
    };

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| chart_error(path, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Historical Revenue", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(start..end, value_range(points.iter().map(|(_, v)| *v)))
        .map_err(|e| chart_error(path, e))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Revenue")
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m").to_string())
        .draw()
        .map_err(|e| chart_error(path, e))?;

    chart
        .draw_series(LineSeries::new(points, BLUE.stroke_width(2)))
        .map_err(|e| chart_error(path, e))?;

    root.present().map_err(|e| chart_error(path, e))?;
    Ok(())
}

/// One bar per year, ascending
pub fn draw_annual(frame: &RevenueFrame, path: &Path) -> Result<()> {
    ensure_rows(frame, "annual")?;

    let (years, totals): (Vec<String>, Vec<f64>) = annual_totals(frame)
        .into_iter()
        .map(|(year, total)| (year.to_string(), total))
        .unzip();

    draw_bars(path, "Annual Revenue", "Year", &years, &totals)
}

/// One bar per calendar month, years combined
pub fn draw_monthly(frame: &RevenueFrame, path: &Path) -> Result<()> {
    ensure_rows(frame, "monthly")?;

    let (months, totals): (Vec<String>, Vec<f64>) = monthly_totals(frame)
        .into_iter()
        .map(|(month, total)| (month_label(month), total))
        .unzip();

    draw_bars(path, "Monthly Revenue", "Month", &months, &totals)
}

fn draw_bars(path: &Path, title: &str, x_desc: &str, labels: &[String], values: &[f64]) -> Result<()> {
    let count = labels.len() as u32;

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| chart_error(path, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0u32..count).into_segmented(),
            value_range(values.iter().copied()),
        )
        .map_err(|e| chart_error(path, e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_desc(x_desc)
        .y_desc("Revenue")
        .x_label_formatter(&|v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(|e| chart_error(path, e))?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, value)| {
            let x = i as u32;
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(x), 0.0), (SegmentValue::Exact(x + 1), *value)],
                BLUE.mix(0.7).filled(),
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))
        .map_err(|e| chart_error(path, e))?;

    root.present().map_err(|e| chart_error(path, e))?;
    Ok(())
}

fn month_label(month: u32) -> String {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .map(|name| name.to_string())
        .unwrap_or_else(|| month.to_string())
}
