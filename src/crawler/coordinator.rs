//! Scrape coordinator - pagination orchestration logic
//!
//! This module contains the run that coordinates every step of a scrape:
//! - Resolving the academic year when none is configured
//! - Resolving the catalog size and the number of result pages
//! - Fetching every page in bounded concurrent batches
//! - Merging the per-page course lists into one snapshot

use crate::config::Config;
use crate::course::Course;
use crate::crawler::fetcher::{build_http_client, fetch_text, RetryPolicy};
use crate::crawler::parser::{parse_catalog_count, parse_course_rows, parse_current_year};
use crate::crawler::progress::ProgressReporter;
use crate::crawler::scheduler::{page_count, plan_batches};
use crate::url::{page_url, search_url, year_range};
use crate::ScrapeError;
use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::Client;
use url::Url;

/// The full set of courses collected in one run
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// Academic year the catalog belongs to
    pub year: u16,

    /// Year segment used in the search URLs (`None` for the yearless search)
    pub scope: Option<u16>,

    /// Course count announced by the search summary
    pub expected_count: u32,

    /// Number of result pages requested
    pub pages_total: u32,

    /// Pages whose fetch or parse failed and contributed nothing
    pub pages_failed: u32,

    /// Collected courses, in arrival order until the writer sorts them
    pub courses: Vec<Course>,
}

impl CatalogSnapshot {
    /// Returns true if no course was collected
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Collected courses as a percentage of the announced count
    pub fn completeness(&self) -> f64 {
        if self.expected_count == 0 {
            return 0.0;
        }
        self.courses.len() as f64 / f64::from(self.expected_count) * 100.0
    }

    /// Fails with `EmptyCatalog` when the run collected nothing
    pub fn ensure_not_empty(&self) -> Result<(), ScrapeError> {
        if self.is_empty() {
            return Err(ScrapeError::EmptyCatalog { year: self.year });
        }
        Ok(())
    }
}

/// Result of fetching every result page
#[derive(Debug, Clone, Default)]
pub struct PaginationOutcome {
    /// Courses from every page, in page-completion order
    pub courses: Vec<Course>,

    /// Number of pages requested
    pub pages_total: u32,

    /// Number of pages that failed
    pub pages_failed: u32,
}

/// Main scrape coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - The base URL or the HTTP client was invalid
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.scraper.base_url)?;
        let client = build_http_client(&config.user_agent, &config.scraper)?;
        let retry = RetryPolicy::from_config(&config.scraper);

        Ok(Self {
            config,
            client,
            base_url,
            retry,
        })
    }

    /// The configuration this coordinator runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs a complete scrape and returns the unsorted snapshot
    ///
    /// Resolver failures are fatal; page failures only shrink the snapshot.
    pub async fn run(&self, progress: &dyn ProgressReporter) -> Result<CatalogSnapshot, ScrapeError> {
        let scope = self.config.scraper.year;
        let year = match scope {
            Some(year) => year,
            None => self.resolve_current_year().await?,
        };

        tracing::info!("Scraping courses for {} school year", year_range(year));

        let expected_count = self.resolve_count(scope).await?;
        let outcome = self.fetch_all(scope, expected_count, progress).await;

        tracing::info!(
            "Collected {} courses from {} pages ({} failed)",
            outcome.courses.len(),
            outcome.pages_total,
            outcome.pages_failed
        );

        Ok(CatalogSnapshot {
            year,
            scope,
            expected_count,
            pages_total: outcome.pages_total,
            pages_failed: outcome.pages_failed,
            courses: outcome.courses,
        })
    }

    /// Reads the current academic year from the yearless search page
    pub async fn resolve_current_year(&self) -> Result<u16, ScrapeError> {
        let url = search_url(&self.base_url, None)?;
        let body = fetch_text(&self.client, url.as_str(), &self.retry).await?;

        let year = parse_current_year(&body).map_err(|message| ScrapeError::Parse {
            url: url.to_string(),
            message,
        })?;

        tracing::debug!("Current academic year is {}", year_range(year));
        Ok(year)
    }

    /// Reads the total course count from the unpaged search page
    pub async fn resolve_count(&self, scope: Option<u16>) -> Result<u32, ScrapeError> {
        let url = search_url(&self.base_url, scope)?;
        let body = fetch_text(&self.client, url.as_str(), &self.retry).await?;

        let count = parse_catalog_count(&body).map_err(|message| ScrapeError::Parse {
            url: url.to_string(),
            message,
        })?;

        tracing::info!(
            "Catalog lists {} courses across {} pages",
            count,
            page_count(count, self.config.scraper.page_size)
        );
        Ok(count)
    }

    /// Fetches and parses one result page
    pub async fn try_fetch_page(&self, scope: Option<u16>, page: u32) -> Result<Vec<Course>, ScrapeError> {
        let url = page_url(&self.base_url, scope, page)?;
        let body = fetch_text(&self.client, url.as_str(), &self.retry).await?;

        let courses = parse_course_rows(&body).map_err(|message| ScrapeError::Parse {
            url: url.to_string(),
            message,
        })?;

        tracing::debug!("Page {} yielded {} courses", page, courses.len());
        Ok(courses)
    }

    /// Fetches one result page, degrading any failure to an empty page
    ///
    /// The failure is logged and not returned, so one bad page cannot abort
    /// the run.
    pub async fn fetch_page(&self, scope: Option<u16>, page: u32) -> Vec<Course> {
        self.fetch_page_or_skip(scope, page).await.unwrap_or_default()
    }

    /// Fetches one result page; `None` marks a page that was logged and skipped
    async fn fetch_page_or_skip(&self, scope: Option<u16>, page: u32) -> Option<Vec<Course>> {
        match self.try_fetch_page(scope, page).await {
            Ok(courses) => Some(courses),
            Err(e) => {
                tracing::warn!("Skipping page {}: {}", page, e);
                None
            }
        }
    }

    /// Fetches every result page for a catalog of `total_count` courses
    ///
    /// Pages are requested in batches of `concurrency`; all fetches of a
    /// batch run concurrently on this task and the next batch starts once
    /// each of them has resolved. Courses are merged and progress ticks as
    /// each page completes. Every page index is attempted exactly once.
    pub async fn fetch_all(
        &self,
        scope: Option<u16>,
        total_count: u32,
        progress: &dyn ProgressReporter,
    ) -> PaginationOutcome {
        let total_pages = page_count(total_count, self.config.scraper.page_size);
        let mut outcome = PaginationOutcome {
            pages_total: total_pages,
            ..Default::default()
        };
        let mut completed = 0;

        progress.start(total_pages);

        for batch in plan_batches(total_pages, self.config.scraper.concurrency) {
            tracing::trace!("Requesting pages {}..{}", batch.start, batch.end);

            let mut in_flight: FuturesUnordered<_> = batch
                .map(|page| self.fetch_page_or_skip(scope, page))
                .collect();

            while let Some(result) = in_flight.next().await {
                match result {
                    Some(courses) => outcome.courses.extend(courses),
                    None => outcome.pages_failed += 1,
                }

                completed += 1;
                progress.tick(completed, total_pages);
            }
        }

        progress.finish();
        outcome
    }
}
