use clap::Parser;
use std::path::PathBuf;

use revscrape::config::Config;

pub mod formatters;

#[derive(Parser, Debug)]
#[command(name = "revscrape")]
#[command(
    version,
    about = "Scrape a revenue table, store it in SQLite and chart it"
)]
#[command(
    long_about = "Fetches the configured page, extracts its (date, revenue) table, appends the rows to the SQLite database and writes time series, annual and monthly charts. Every run appends; rows are never deduplicated."
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Page to scrape (overrides config and REVSCRAPE_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// SQLite database file (overrides config and REVSCRAPE_DB)
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Directory for the chart files (overrides config and REVSCRAPE_OUTPUT_DIR)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Read a saved page from disk instead of fetching it
    #[arg(long, value_name = "PATH")]
    pub html_file: Option<PathBuf>,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_required() {
        let cli = Cli::try_parse_from(["revscrape"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.html_file.is_none());
        assert!(!cli.no_color);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "revscrape",
            "--db",
            "/tmp/other.db",
            "--output-dir",
            "charts",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.output_dir, PathBuf::from("charts"));
        assert_eq!(config.url, revscrape::config::DEFAULT_URL);
    }
}
