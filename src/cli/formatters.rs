//! Terminal output for a completed run

use colored::Colorize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use revscrape::pipeline::RunSummary;

/// Format the run summary: row counts, annual totals and chart paths
pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} Stored {} new rows ({} total)\n\n",
        "✓".green().bold(),
        summary.inserted.to_string().green(),
        summary.total_rows
    ));

    #[derive(Tabled)]
    struct AnnualRow {
        #[tabled(rename = "Year")]
        year: String,
        #[tabled(rename = "Revenue")]
        revenue: String,
    }

    let rows: Vec<AnnualRow> = summary
        .annual
        .iter()
        .map(|(year, total)| AnnualRow {
            year: year.to_string(),
            revenue: format!("{:.2}", total),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.modify(Columns::new(1..), Alignment::right());
    output.push_str(&table.to_string());

    output.push_str(&format!("\n\n{} Charts\n", "📊".cyan().bold()));
    for path in summary.charts.iter() {
        output.push_str(&format!("  {}\n", path.display()));
    }

    output
}
