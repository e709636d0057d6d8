//! Positional tokenization of course titles
//!
//! Search results render each course title as a single string of the form
//! `"<DEPT> <NUMBER> <Name ...> (<credits> credits)"`. Everything here works on
//! plain strings so it can be tested without any markup.

/// Pieces recovered from a composite course title
#[derive(Debug, Clone, PartialEq)]
pub struct TitleParts {
    /// Department code (first token)
    pub department: String,

    /// Course number (leading digits of the code's last token)
    pub course_number: Option<u32>,

    /// Course name between the code and the credit annotation
    pub name: String,

    /// Numeric credit value
    pub num_credits: Option<f64>,
}

/// Parses a composite course title
///
/// The title is split on whitespace. The first two tokens form the course
/// code, the credit annotation is the trailing token opening with `(` (or the
/// second-to-last token when no such token exists), and the name is whatever
/// lies between them.
///
/// Malformed numbers never fail: they come back as `None`.
///
/// # Example
///
/// ```
/// use catalog_scraper::course::parse_title;
///
/// let parts = parse_title("MATH 240 Discrete Structures (3 credits)");
/// assert_eq!(parts.department, "MATH");
/// assert_eq!(parts.course_number, Some(240));
/// assert_eq!(parts.name, "Discrete Structures");
/// assert_eq!(parts.num_credits, Some(3.0));
/// ```
pub fn parse_title(title: &str) -> TitleParts {
    let tokens: Vec<&str> = title.split_whitespace().collect();

    let code = &tokens[..tokens.len().min(2)];
    let department = code.first().copied().unwrap_or_default().to_string();
    let course_number = code.last().and_then(|token| parse_leading_int(token));

    let credit_index = credit_token_index(&tokens);
    let name = match credit_index {
        Some(index) if index > 2 => tokens[2..index].join(" "),
        _ => String::new(),
    };

    let num_credits = credit_index
        .map(|index| tokens[index])
        .and_then(|token| {
            let mut chars = token.chars();
            chars.next();
            parse_leading_number(chars.as_str())
        });

    if course_number.is_none() || num_credits.is_none() {
        tracing::debug!("Title '{}' has a malformed number token", title);
    }

    TitleParts {
        department,
        course_number,
        name,
        num_credits,
    }
}

/// Locates the credit annotation among the title tokens
fn credit_token_index(tokens: &[&str]) -> Option<usize> {
    let parenthesized = tokens
        .iter()
        .enumerate()
        .skip(2)
        .rev()
        .find(|(_, token)| token.starts_with('('))
        .map(|(index, _)| index);

    parenthesized.or_else(|| tokens.len().checked_sub(2))
}

/// Parses the leading run of ASCII digits of a token
///
/// `"240"` and `"240D1"` both give 240; a token without leading digits gives `None`.
pub fn parse_leading_int(token: &str) -> Option<u32> {
    let end = token
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(token.len());

    token[..end].parse().ok()
}

/// Parses the leading decimal number of a token (`"3"`, `"4.5"`, `"3)"`)
pub fn parse_leading_number(token: &str) -> Option<f64> {
    let mut seen_dot = false;
    let end = token
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map(|(i, _)| i)
        .unwrap_or(token.len());

    let number = token[..end].trim_end_matches('.');
    if number.is_empty() {
        return None;
    }
    number.parse().ok()
}

/// Splits a comma-separated field into trimmed, non-empty parts
///
/// `"Undergraduate, Graduate"` gives `["Undergraduate", "Graduate"]`.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
