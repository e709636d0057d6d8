//! Crawler module for result page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with retry logic
//! - HTML parsing and course extraction
//! - Page count derivation and batch planning
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod parser;
mod progress;
mod scheduler;

pub use coordinator::{CatalogSnapshot, Coordinator, PaginationOutcome};
pub use fetcher::{build_http_client, fetch_text, user_agent_string, RetryPolicy};
pub use parser::{
    extract_course, extract_course_fragment, parse_catalog_count, parse_course_rows,
    parse_current_year, parse_result_count, parse_slogan_year, CourseSelectors, ROW_SELECTOR,
};
pub use progress::{page_progress_bar, NoProgress, ProgressReporter};
pub use scheduler::{page_count, plan_batches};

use crate::config::Config;
use crate::ScrapeError;

/// Runs a complete scrape
///
/// This is the main entry point for starting a scrape. It will:
/// 1. Build the HTTP client
/// 2. Resolve the academic year if none is configured
/// 3. Resolve the catalog size
/// 4. Fetch and parse every result page
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `progress` - Receives one tick per completed page
///
/// # Returns
///
/// * `Ok(CatalogSnapshot)` - Every page was attempted
/// * `Err(ScrapeError)` - The year or the catalog size could not be resolved
pub async fn scrape(
    config: Config,
    progress: &dyn ProgressReporter,
) -> Result<CatalogSnapshot, ScrapeError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run(progress).await
}
