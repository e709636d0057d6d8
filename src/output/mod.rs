//! Output module for persisting scraped catalogs
//!
//! This module handles:
//! - Sorting a snapshot into catalog order
//! - Writing it as JSON or SQLite
//! - Reporting run statistics

mod json_output;
mod sqlite_output;
pub mod stats;
mod traits;

pub use json_output::JsonOutput;
pub use sqlite_output::SqliteOutput;
pub use stats::{print_statistics, ScrapeStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult};

use crate::config::{OutputConfig, OutputFormat};
use crate::course::sort_catalog;
use crate::crawler::CatalogSnapshot;
use crate::url::catalog_file_stem;
use crate::ScrapeError;
use std::path::{Path, PathBuf};

/// Outcome of a successful write
#[derive(Debug, Clone)]
pub struct WriteReport {
    /// Where the catalog was written
    pub path: PathBuf,

    /// Statistics of the written snapshot
    pub stats: ScrapeStatistics,
}

/// Returns the handler for an output format
pub fn handler_for(format: OutputFormat) -> Box<dyn OutputHandler> {
    match format {
        OutputFormat::Json => Box::new(JsonOutput),
        OutputFormat::Sqlite => Box::new(SqliteOutput),
    }
}

/// Path of the catalog file for a year: `<dir>/courses-<year>-<year+1>.<ext>`
pub fn catalog_path(directory: &Path, year: u16, format: OutputFormat) -> PathBuf {
    directory.join(format!("{}.{}", catalog_file_stem(year), format.extension()))
}

/// Sorts and persists a snapshot
///
/// # Arguments
///
/// * `snapshot` - The collected catalog; consumed by the write
/// * `config` - Output directory and format
///
/// # Returns
///
/// * `Ok(WriteReport)` - The written path and run statistics
/// * `Err(ScrapeError::EmptyCatalog)` - Nothing was collected; no file is written
/// * `Err(ScrapeError::Output)` - The file could not be written
pub fn write_catalog(
    mut snapshot: CatalogSnapshot,
    config: &OutputConfig,
) -> Result<WriteReport, ScrapeError> {
    snapshot.ensure_not_empty()?;

    sort_catalog(&mut snapshot.courses);

    let directory = Path::new(&config.directory);
    std::fs::create_dir_all(directory).map_err(OutputError::from)?;

    let handler = handler_for(config.format);
    let path = catalog_path(directory, snapshot.year, handler.format());
    handler.write(&snapshot, &path)?;

    let stats = ScrapeStatistics::from_snapshot(&snapshot);
    tracing::info!(
        "Scraping complete! {} ({:.1}%)",
        stats.summary_line(),
        stats.completeness()
    );
    if stats.collected_count != stats.expected_count as usize {
        tracing::warn!(
            "Collected {} courses but the catalog announced {}",
            stats.collected_count,
            stats.expected_count
        );
    }
    tracing::info!("Data saved to: {}", path.display());

    Ok(WriteReport { path, stats })
}
