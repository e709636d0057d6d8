//! HTML parser for search result pages
//!
//! This module handles parsing search markup to extract:
//! - Course listings (one per `.views-row` fragment)
//! - The total result count from the search summary
//! - The current academic year from the site slogan
//!
//! Title and number handling is delegated to [`crate::course`] so the
//! positional rules stay independent of the markup layer.

use crate::course::{parse_leading_int, parse_title, split_list, Course};
use scraper::{ElementRef, Html, Selector};

/// One course listing on a result page
pub const ROW_SELECTOR: &str = ".views-row";

const TITLE_SELECTOR: &str = ".views-field-field-course-title-long a";
const FACULTY_SELECTOR: &str = ".views-field-field-faculty-code span";
const DEPARTMENT_SELECTOR: &str = ".views-field-field-dept-code span";
const LEVEL_SELECTOR: &str = ".views-field-level span";
const TERMS_SELECTOR: &str = ".views-field-terms span";

const SUMMARY_SELECTOR: &str = ".current-search-item-text";
const SUMMARY_COUNT_SELECTOR: &str = ".current-search-item-text strong";
const SLOGAN_SELECTOR: &str = "#slogan";

/// Position of the year among the slogan tokens
const SLOGAN_YEAR_TOKEN: usize = 6;

/// Position of the count in a summary without an `of` marker
const COUNT_TOKEN: usize = 2;

/// Compiled selectors for the fields of a course row
pub struct CourseSelectors {
    row: Selector,
    title: Selector,
    faculty: Selector,
    department: Selector,
    level: Selector,
    terms: Selector,
}

impl CourseSelectors {
    /// Compiles the row and field selectors
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            row: compile(ROW_SELECTOR)?,
            title: compile(TITLE_SELECTOR)?,
            faculty: compile(FACULTY_SELECTOR)?,
            department: compile(DEPARTMENT_SELECTOR)?,
            level: compile(LEVEL_SELECTOR)?,
            terms: compile(TERMS_SELECTOR)?,
        })
    }
}

fn compile(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("Invalid selector '{}': {:?}", css, e))
}

/// Parses a result page and extracts every course listing on it
///
/// A page without any `.views-row` fragment yields an empty list.
///
/// # Example
///
/// ```
/// use catalog_scraper::crawler::parse_course_rows;
///
/// let html = r#"<div class="views-row">
///   <div class="views-field-field-course-title-long"><a href="/c/math-240">MATH 240 Discrete Structures (3 credits)</a></div>
/// </div>"#;
/// let courses = parse_course_rows(html).unwrap();
/// assert_eq!(courses.len(), 1);
/// assert_eq!(courses[0].course_number, Some(240));
/// ```
pub fn parse_course_rows(html: &str) -> Result<Vec<Course>, String> {
    let selectors = CourseSelectors::new()?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selectors.row)
        .map(|row| extract_course(row, &selectors))
        .collect())
}

/// Maps one row fragment to a course record
///
/// Missing elements read as empty text, so absent fields come back empty
/// (or `None` for numbers) instead of failing.
pub fn extract_course(row: ElementRef<'_>, selectors: &CourseSelectors) -> Course {
    let title_text = text_of(row, &selectors.title);
    let link = row
        .select(&selectors.title)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .unwrap_or_default()
        .to_string();

    let title = parse_title(&title_text);

    Course {
        department: title.department,
        course_number: title.course_number,
        name: title.name,
        num_credits: title.num_credits,
        link,
        faculty: text_of(row, &selectors.faculty).trim().to_string(),
        department_name: text_of(row, &selectors.department).trim().to_string(),
        level: split_list(&text_of(row, &selectors.level)),
        terms_offered: split_list(&text_of(row, &selectors.terms)),
    }
}

/// Extracts a course from a standalone row fragment string
pub fn extract_course_fragment(fragment: &str) -> Result<Course, String> {
    let selectors = CourseSelectors::new()?;
    let document = Html::parse_fragment(fragment);
    Ok(extract_course(document.root_element(), &selectors))
}

/// Concatenated text of every element matching `selector` below `element`
fn text_of(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|matched| matched.text())
        .collect()
}

/// Concatenated text of every element in the document matching `css`
fn document_text(document: &Html, css: &str) -> Result<Option<String>, String> {
    let selector = compile(css)?;
    let mut matches = document.select(&selector).peekable();

    if matches.peek().is_none() {
        return Ok(None);
    }

    Ok(Some(matches.flat_map(|element| element.text()).collect()))
}

/// Extracts the total result count from the search summary
///
/// The summary reads like `"Displaying 1 - 20 of 157 results"`; the count is
/// the token after `of`. The `<strong>` part of the summary is tried first,
/// then the whole summary node.
pub fn parse_catalog_count(html: &str) -> Result<u32, String> {
    let document = Html::parse_document(html);

    let summary = document_text(&document, SUMMARY_SELECTOR)?
        .ok_or_else(|| format!("Summary node '{}' not found", SUMMARY_SELECTOR))?;

    if let Some(strong) = document_text(&document, SUMMARY_COUNT_SELECTOR)? {
        if let Ok(count) = parse_result_count(&strong) {
            return Ok(count);
        }
    }

    parse_result_count(&summary)
}

/// Reads the result count out of a summary sentence
///
/// The count is the token after `of`. Summaries without that marker carry
/// the count as their third token (`"Search found 5436 items"`).
///
/// # Examples
///
/// ```
/// use catalog_scraper::crawler::parse_result_count;
///
/// assert_eq!(parse_result_count("Displaying 1 - 20 of 157 results"), Ok(157));
/// assert_eq!(parse_result_count("1 - 20 of 5,436"), Ok(5436));
/// assert_eq!(parse_result_count("Search found 5436 items"), Ok(5436));
/// ```
pub fn parse_result_count(text: &str) -> Result<u32, String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let token = match tokens.iter().position(|t| t.eq_ignore_ascii_case("of")) {
        Some(index) => tokens
            .get(index + 1)
            .copied()
            .ok_or_else(|| format!("No count after 'of' in '{}'", text.trim()))?,
        None if tokens.len() == 1 => tokens[0],
        None => tokens
            .get(COUNT_TOKEN)
            .copied()
            .ok_or_else(|| format!("No result count in '{}'", text.trim()))?,
    };

    token
        .replace(',', "")
        .parse()
        .map_err(|_| format!("Result count '{}' is not a number", token))
}

/// Extracts the current academic year from the site slogan
pub fn parse_current_year(html: &str) -> Result<u16, String> {
    let document = Html::parse_document(html);

    let slogan = document_text(&document, SLOGAN_SELECTOR)?
        .ok_or_else(|| format!("Slogan node '{}' not found", SLOGAN_SELECTOR))?;

    parse_slogan_year(&slogan)
}

/// Reads the year out of the slogan sentence
///
/// The slogan is split on whitespace and en-dashes; the year is a fixed
/// token position, which ties this to the site's template.
pub fn parse_slogan_year(text: &str) -> Result<u16, String> {
    let token = text
        .split(|c: char| c.is_whitespace() || c == '\u{2013}')
        .filter(|t| !t.is_empty())
        .nth(SLOGAN_YEAR_TOKEN)
        .ok_or_else(|| format!("Slogan '{}' is too short to carry a year", text.trim()))?;

    parse_leading_int(token)
        .and_then(|year| u16::try_from(year).ok())
        .ok_or_else(|| format!("Slogan token '{}' is not a year", token))
}
