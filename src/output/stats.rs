//! Statistics for a finished scrape
//!
//! The comparison between collected and announced courses is informational:
//! a shortfall is reported, never raised.

use crate::crawler::CatalogSnapshot;
use crate::url::year_range;
use std::collections::BTreeSet;

/// Scrape statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeStatistics {
    /// Academic year of the catalog
    pub year: u16,

    /// Course count announced by the search summary
    pub expected_count: u32,

    /// Courses actually collected
    pub collected_count: usize,

    /// Result pages requested
    pub pages_total: u32,

    /// Result pages that failed
    pub pages_failed: u32,

    /// Distinct department codes
    pub departments: usize,
}

impl ScrapeStatistics {
    /// Summarizes a snapshot
    pub fn from_snapshot(snapshot: &CatalogSnapshot) -> Self {
        let departments: BTreeSet<&str> = snapshot
            .courses
            .iter()
            .map(|course| course.department.as_str())
            .collect();

        Self {
            year: snapshot.year,
            expected_count: snapshot.expected_count,
            collected_count: snapshot.courses.len(),
            pages_total: snapshot.pages_total,
            pages_failed: snapshot.pages_failed,
            departments: departments.len(),
        }
    }

    /// Collected courses as a percentage of the announced count
    pub fn completeness(&self) -> f64 {
        if self.expected_count == 0 {
            return 0.0;
        }
        (self.collected_count as f64 / f64::from(self.expected_count)) * 100.0
    }

    /// Human-facing completeness line
    pub fn summary_line(&self) -> String {
        format!(
            "{} of {} courses scraped",
            self.collected_count, self.expected_count
        )
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ScrapeStatistics) {
    println!("=== Scrape Statistics ({}) ===\n", year_range(stats.year));

    println!("Overview:");
    println!("  Courses announced: {}", stats.expected_count);
    println!("  Courses collected: {}", stats.collected_count);
    println!("  Departments: {}", stats.departments);
    println!(
        "  Pages: {} requested, {} failed",
        stats.pages_total, stats.pages_failed
    );
    println!();

    println!(
        "Completeness: {:.1}% ({})",
        stats.completeness(),
        stats.summary_line()
    );
}
