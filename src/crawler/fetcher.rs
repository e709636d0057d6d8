//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for search result pages
//! - Retry logic for transient failures
//! - Error classification

use crate::config::{ScraperConfig, UserAgentConfig};
use crate::ScrapeError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Retry schedule for transient fetch failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made after the first one
    pub max_retries: u32,

    /// Delay before the first retry; doubled for every further attempt
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Single-shot fetching
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Builds the policy from scraper configuration
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Back-off before retry number `attempt` (zero-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ScraperConfig::default())
    }
}

/// Formats the user agent string
///
/// Format: `Name/Version (+ContactURL; ContactEmail)`, with the parenthesized
/// part only carrying the contact details that are configured.
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    let contact: Vec<String> = config
        .contact_url
        .iter()
        .map(|url| format!("+{}", url))
        .chain(config.contact_email.iter().cloned())
        .collect();

    if contact.is_empty() {
        format!("{}/{}", config.crawler_name, config.crawler_version)
    } else {
        format!(
            "{}/{} ({})",
            config.crawler_name,
            config.crawler_version,
            contact.join("; ")
        )
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `scraper` - Timeouts come from the scraper section
///
/// # Example
///
/// ```no_run
/// use catalog_scraper::config::Config;
/// use catalog_scraper::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.user_agent, &config.scraper).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    scraper: &ScraperConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(user_agent))
        .timeout(Duration::from_secs(scraper.timeout_secs))
        .connect_timeout(Duration::from_secs(scraper.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// A failed attempt and whether it is worth repeating
struct AttemptError {
    error: ScrapeError,
    retryable: bool,
}

/// Fetches a URL as text, retrying transient failures
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 404 | Immediate failure |
/// | HTTP 429 | Retry with back-off |
/// | HTTP 5xx | Retry with back-off |
/// | Timeout | Retry with back-off |
/// | Connection refused | Immediate failure |
/// | Other 4xx | Immediate failure |
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(ScrapeError::Network)` - The last failure once retries are exhausted
pub async fn fetch_text(client: &Client, url: &str, retry: &RetryPolicy) -> Result<String, ScrapeError> {
    let mut attempt = 0;

    loop {
        match fetch_once(client, url).await {
            Ok(body) => return Ok(body),
            Err(failure) if failure.retryable && attempt < retry.max_retries => {
                let delay = retry.delay_for(attempt);
                tracing::debug!(
                    "Retrying {} in {:?} (attempt {}/{}): {}",
                    url,
                    delay,
                    attempt + 1,
                    retry.max_retries,
                    failure.error
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(failure) => return Err(failure.error),
        }
    }
}

/// Performs a single GET request
async fn fetch_once(client: &Client, url: &str) -> Result<String, AttemptError> {
    let response = client.get(url).send().await.map_err(|e| classify_transport(url, e))?;
    let status = response.status();

    if !status.is_success() {
        return Err(AttemptError {
            error: ScrapeError::Network {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: format!("HTTP {}", status),
            },
            retryable: is_retryable_status(status),
        });
    }

    response.text().await.map_err(|e| classify_transport(url, e))
}

/// Returns true for statuses worth retrying
fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Classifies a transport-level error
fn classify_transport(url: &str, e: reqwest::Error) -> AttemptError {
    let (message, retryable) = if e.is_timeout() {
        ("Request timeout".to_string(), true)
    } else if e.is_connect() {
        ("Connection refused".to_string(), false)
    } else {
        (e.to_string(), false)
    };

    AttemptError {
        error: ScrapeError::Network {
            url: url.to_string(),
            status: e.status().map(|s| s.as_u16()),
            message,
        },
        retryable,
    }
}
