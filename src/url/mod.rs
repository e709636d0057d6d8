//! URL handling for the course search
//!
//! The search lives under a base such as `https://www.mcgill.ca/study`. A
//! year-scoped catalog inserts a `/<year>-<year+1>` segment; the yearless
//! path always serves the current academic year.

use ::url::Url;

/// Default origin of the course search
pub const DEFAULT_BASE_URL: &str = "https://www.mcgill.ca/study";

/// Builds the unpaged search URL
///
/// # Examples
///
/// ```
/// use catalog_scraper::url::search_url;
/// use url::Url;
///
/// let base = Url::parse("https://www.mcgill.ca/study").unwrap();
/// assert_eq!(
///     search_url(&base, Some(2024)).unwrap().as_str(),
///     "https://www.mcgill.ca/study/2024-2025/courses/search"
/// );
/// assert_eq!(
///     search_url(&base, None).unwrap().as_str(),
///     "https://www.mcgill.ca/study/courses/search"
/// );
/// ```
pub fn search_url(base: &Url, year: Option<u16>) -> Result<Url, ::url::ParseError> {
    let root = base.as_str().trim_end_matches('/');
    let year_segment = year
        .map(|y| format!("/{}", year_range(y)))
        .unwrap_or_default();

    Url::parse(&format!("{}{}/courses/search", root, year_segment))
}

/// Builds the URL of one zero-based result page
pub fn page_url(base: &Url, year: Option<u16>, page: u32) -> Result<Url, ::url::ParseError> {
    let mut url = search_url(base, year)?;
    url.query_pairs_mut().append_pair("page", &page.to_string());
    Ok(url)
}

/// Formats an academic year as `"<year>-<year+1>"`
pub fn year_range(year: u16) -> String {
    format!("{}-{}", year, u32::from(year) + 1)
}

/// File name (without extension) of the catalog for a year
pub fn catalog_file_stem(year: u16) -> String {
    format!("courses-{}", year_range(year))
}
