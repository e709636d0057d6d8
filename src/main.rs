//! Catalog-Scraper main entry point
//!
//! This is the command-line interface for the course catalog scraper.

use anyhow::Context;
use catalog_scraper::config::{read_config_with_hash, validate_config, Config, OutputFormat};
use catalog_scraper::crawler::{page_progress_bar, Coordinator};
use catalog_scraper::output::{catalog_path, print_statistics, write_catalog};
use catalog_scraper::url::{page_url, search_url, year_range};
use catalog_scraper::ScrapeError;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Catalog-Scraper: fetch a university's full course catalog
///
/// Reads every page of the course search for one academic year and writes
/// the sorted listing to `<output>/courses-<year>-<year+1>.<ext>`.
#[derive(Parser, Debug)]
#[command(name = "catalog-scraper")]
#[command(version)]
#[command(about = "Scrapes the full course catalog for one academic year", long_about = None)]
struct Cli {
    /// Academic year to scrape (the year the session starts in); defaults to the current one
    #[arg(short, long)]
    year: Option<u16>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of result pages fetched concurrently
    #[arg(long)]
    concurrency: Option<u32>,

    /// Directory the catalog file is written to
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Output format: json or sqlite
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration and the requests a run would make
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_scrape(config, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_scraper=info,warn"),
            1 => EnvFilter::new("catalog_scraper=debug,info"),
            2 => EnvFilter::new("catalog_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, if any, and applies command-line overrides
///
/// Validation runs once, on the merged configuration.
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = read_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(year) = cli.year {
        config.scraper.year = Some(year);
    }
    if let Some(concurrency) = cli.concurrency {
        config.scraper.concurrency = concurrency;
    }
    if let Some(output) = &cli.output {
        config.output.directory = output.to_string_lossy().into_owned();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    validate_config(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be requested
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Catalog-Scraper Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Base URL: {}", config.scraper.base_url);
    match config.scraper.year {
        Some(year) => println!("  Year: {}", year_range(year)),
        None => println!("  Year: current (resolved from the site slogan)"),
    }
    println!("  Page size: {}", config.scraper.page_size);
    println!("  Concurrency: {}", config.scraper.concurrency);
    println!(
        "  Timeouts: {}s request, {}s connect",
        config.scraper.timeout_secs, config.scraper.connect_timeout_secs
    );
    println!(
        "  Retries: {} (base delay {}ms)",
        config.scraper.max_retries, config.scraper.retry_delay_ms
    );

    let base = url::Url::parse(&config.scraper.base_url)?;
    let scope = config.scraper.year;

    println!("\nRequests:");
    if scope.is_none() {
        println!("  Year:  {}", search_url(&base, None)?);
    }
    println!("  Count: {}", search_url(&base, scope)?);
    println!("  Pages: {} (page = 0 .. N-1)", page_url(&base, scope, 0)?);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Format: {}", config.output.format);
    if let Some(year) = scope {
        println!(
            "  File: {}",
            catalog_path(Path::new(&config.output.directory), year, config.output.format).display()
        );
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config, quiet: bool) -> anyhow::Result<()> {
    let output = config.output.clone();
    let coordinator = Coordinator::new(config)?;

    let progress = page_progress_bar(quiet);
    let snapshot = match coordinator.run(&progress).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    match write_catalog(snapshot, &output) {
        Ok(report) => {
            if !quiet {
                println!();
                print_statistics(&report.stats);
                println!("\nData saved to: {}", report.path.display());
            }
            Ok(())
        }
        Err(e @ ScrapeError::EmptyCatalog { .. }) => {
            tracing::error!("Error scraping. No courses found.");
            Err(e.into())
        }
        Err(e) => {
            tracing::error!("Failed to write catalog: {}", e);
            Err(e.into())
        }
    }
}
