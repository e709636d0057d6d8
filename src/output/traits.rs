//! Output handler traits and types
//!
//! This module defines the trait interface for catalog writers and the
//! errors they report.

use crate::config::OutputFormat;
use crate::crawler::CatalogSnapshot;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for catalog writers
///
/// Handlers receive a snapshot that is already sorted into catalog order and
/// must persist it at `path` without leaving a truncated file behind on
/// failure.
pub trait OutputHandler {
    /// The format this handler writes
    fn format(&self) -> OutputFormat;

    /// Persists the snapshot at `path`, replacing any previous file
    fn write(&self, snapshot: &CatalogSnapshot, path: &Path) -> OutputResult<()>;
}
