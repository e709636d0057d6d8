//! JSON catalog writer
//!
//! Writes the course list as a pretty-printed JSON array (two-space indent,
//! one object per course with a fixed field order).

use crate::config::OutputFormat;
use crate::crawler::CatalogSnapshot;
use crate::output::traits::{OutputHandler, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};

/// JSON output handler
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOutput;

impl OutputHandler for JsonOutput {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn write(&self, snapshot: &CatalogSnapshot, path: &Path) -> OutputResult<()> {
        let json = serde_json::to_string_pretty(&snapshot.courses)?;
        write_atomically(path, json.as_bytes())
    }
}

/// Writes to a sibling temporary file, then renames it over `path`
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> OutputResult<()> {
    let staging = staging_path(path);

    if let Err(e) = fs::write(&staging, contents) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }

    fs::rename(&staging, path)?;
    Ok(())
}

/// Temporary sibling path used while a file is being written
pub(crate) fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
