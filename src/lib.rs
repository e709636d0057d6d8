//! Catalog-Scraper: a paginated course catalog harvester
//!
//! This crate fetches every result page of a university course search for one
//! academic year, extracts the course listings from the rendered markup, and
//! writes the sorted catalog to disk.

pub mod config;
pub mod course;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for catalog scraping operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error for {url}: {message}")]
    Network {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("No courses found for the {year} catalog year")]
    EmptyCatalog { year: u16 },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// HTTP status code attached to a network failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use course::Course;
pub use crawler::{CatalogSnapshot, Coordinator};
pub use output::write_catalog;
