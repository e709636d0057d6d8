//! Page scheduling for the pagination run
//!
//! This module handles:
//! - Deriving the number of result pages from the catalog size
//! - Partitioning page indices into bounded concurrent batches

use std::ops::Range;

/// Number of result pages needed to cover `total_count` listings
///
/// # Examples
///
/// ```
/// use catalog_scraper::crawler::page_count;
///
/// assert_eq!(page_count(157, 20), 8);
/// assert_eq!(page_count(160, 20), 8);
/// assert_eq!(page_count(0, 20), 0);
/// ```
pub fn page_count(total_count: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Partitions page indices `0..total_pages` into batches of at most `width`
///
/// Batches are contiguous and in index order; every page index appears in
/// exactly one batch. A width of zero is treated as one.
pub fn plan_batches(total_pages: u32, width: u32) -> Vec<Range<u32>> {
    let width = width.max(1);

    (0..total_pages)
        .step_by(width as usize)
        .map(|start| start..start.saturating_add(width).min(total_pages))
        .collect()
}
