mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use revscrape::config::Config;
use revscrape::pipeline;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the run summary
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);

    let summary = match &cli.html_file {
        Some(path) => {
            info!("Reading saved page from {:?}", path);
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            pipeline::run_with_html(&config, &html)
        }
        None => pipeline::run(&config),
    }
    .context("Pipeline failed")?;

    println!("{}", cli::formatters::format_run_summary(&summary));
    Ok(())
}
