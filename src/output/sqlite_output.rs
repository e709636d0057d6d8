//! SQLite catalog writer
//!
//! This module persists the sorted catalog into a standalone SQLite database:
//! one `catalog` row describing the run and one `courses` row per listing,
//! with `position` preserving catalog order.

use crate::config::OutputFormat;
use crate::crawler::CatalogSnapshot;
use crate::output::json_output::staging_path;
use crate::output::traits::{OutputHandler, OutputResult};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;

/// SQL schema for the catalog database
pub const SCHEMA_SQL: &str = r#"
-- One row per scrape
CREATE TABLE IF NOT EXISTS catalog (
    year INTEGER NOT NULL,
    year_range TEXT NOT NULL,
    scraped_at TEXT NOT NULL,
    expected_count INTEGER NOT NULL,
    collected_count INTEGER NOT NULL,
    pages_total INTEGER NOT NULL,
    pages_failed INTEGER NOT NULL
);

-- Course listings in catalog order
CREATE TABLE IF NOT EXISTS courses (
    position INTEGER PRIMARY KEY,
    department TEXT NOT NULL,
    course_number INTEGER,
    name TEXT NOT NULL,
    num_credits REAL,
    link TEXT NOT NULL,
    faculty TEXT NOT NULL,
    department_name TEXT NOT NULL,
    level TEXT NOT NULL,
    terms_offered TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_courses_code ON courses(department, course_number);
"#;

/// SQLite output handler
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteOutput;

impl OutputHandler for SqliteOutput {
    fn format(&self) -> OutputFormat {
        OutputFormat::Sqlite
    }

    fn write(&self, snapshot: &CatalogSnapshot, path: &Path) -> OutputResult<()> {
        let staging = staging_path(path);
        let _ = fs::remove_file(&staging);

        if let Err(e) = write_database(snapshot, &staging) {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }

        fs::rename(&staging, path)?;
        Ok(())
    }
}

/// Creates the database at `path` and fills it in one transaction
fn write_database(snapshot: &CatalogSnapshot, path: &Path) -> OutputResult<()> {
    let mut conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA_SQL)?;

    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO catalog (year, year_range, scraped_at, expected_count, collected_count, pages_total, pages_failed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            snapshot.year,
            crate::url::year_range(snapshot.year),
            Utc::now().to_rfc3339(),
            snapshot.expected_count,
            snapshot.courses.len() as i64,
            snapshot.pages_total,
            snapshot.pages_failed,
        ],
    )?;

    {
        let mut insert = tx.prepare(
            "INSERT INTO courses (position, department, course_number, name, num_credits, link, faculty, department_name, level, terms_offered)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;

        for (position, course) in snapshot.courses.iter().enumerate() {
            insert.execute(params![
                position as i64,
                course.department,
                course.course_number,
                course.name,
                course.num_credits,
                course.link,
                course.faculty,
                course.department_name,
                serde_json::to_string(&course.level)?,
                serde_json::to_string(&course.terms_offered)?,
            ])?;
        }
    }

    tx.commit()?;
    Ok(())
}
