//! Catalog files produced by a full run

use crate::support::{mount_catalog, test_config};
use catalog_scraper::config::OutputFormat;
use catalog_scraper::crawler::{scrape, NoProgress};
use catalog_scraper::write_catalog;
use rusqlite::Connection;
use tempfile::TempDir;
use wiremock::MockServer;

#[tokio::test]
async fn test_sqlite_catalog_keeps_catalog_order() {
    let server = MockServer::start().await;
    mount_catalog(&server, Some(2023), 64, &[]).await;

    let dir = TempDir::new().unwrap();
    let mut config = test_config(&server, Some(2023), 2, dir.path());
    config.output.format = OutputFormat::Sqlite;
    let output = config.output.clone();

    let snapshot = scrape(config, &NoProgress).await.unwrap();
    let report = write_catalog(snapshot, &output).unwrap();
    assert_eq!(report.path, dir.path().join("courses-2023-2024.db"));
    assert!(!dir.path().join("courses-2023-2024.db.tmp").exists());

    let conn = Connection::open(&report.path).unwrap();

    let (year, expected, collected): (u16, u32, u32) = conn
        .query_row(
            "SELECT year, expected_count, collected_count FROM catalog",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!((year, expected, collected), (2023, 64, 64));

    let mut stmt = conn
        .prepare("SELECT department, course_number FROM courses ORDER BY position")
        .unwrap();
    let rows: Vec<(String, u32)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(rows.len(), 64);
    assert_eq!(rows[0], ("BIOL".to_string(), 103));
    let mut sorted = rows.clone();
    sorted.sort();
    assert_eq!(rows, sorted);
}

#[tokio::test]
async fn test_rerun_replaces_existing_file() {
    let server = MockServer::start().await;
    mount_catalog(&server, Some(2024), 30, &[]).await;

    let dir = TempDir::new().unwrap();
    let target = dir.path().join("courses-2024-2025.json");
    std::fs::write(&target, "stale").unwrap();

    let config = test_config(&server, Some(2024), 16, dir.path());
    let output = config.output.clone();

    let snapshot = scrape(config, &NoProgress).await.unwrap();
    write_catalog(snapshot, &output).unwrap();

    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.starts_with("[\n  {\n    \"department\": "));
    assert!(!dir.path().join("courses-2024-2025.json.tmp").exists());
}
