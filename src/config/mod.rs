//! Configuration module for Catalog-Scraper
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a run needs no file at all.
//!
//! # Example
//!
//! ```no_run
//! use catalog_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Fetching {} pages at a time", config.scraper.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, OutputFormat, ScraperConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, parse_config, read_config_with_hash,
};
pub use validation::{current_year, validate as validate_config, MIN_YEAR};
