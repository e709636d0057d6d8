//! End-to-end scrape runs against a fake course search

use crate::support::{
    mount_catalog, render_page, search_path, test_config, RecordingProgress, WithoutPageParam,
    PAGE_SIZE,
};
use catalog_scraper::crawler::{Coordinator, NoProgress};
use catalog_scraper::{write_catalog, Course, ScrapeError};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOTAL: u32 = 157;

fn read_catalog(path: &std::path::Path) -> Vec<Course> {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_full_scrape_writes_sorted_catalog() {
    let server = MockServer::start().await;
    mount_catalog(&server, Some(2024), TOTAL, &[]).await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, Some(2024), 16, dir.path());
    let output = config.output.clone();

    let snapshot = Coordinator::new(config).unwrap().run(&NoProgress).await.unwrap();
    assert_eq!(snapshot.year, 2024);
    assert_eq!(snapshot.expected_count, TOTAL);
    assert_eq!(snapshot.pages_total, 8);
    assert_eq!(snapshot.pages_failed, 0);
    assert_eq!(snapshot.courses.len(), TOTAL as usize);

    let report = write_catalog(snapshot, &output).unwrap();
    assert_eq!(report.path, dir.path().join("courses-2024-2025.json"));
    assert_eq!(report.stats.summary_line(), "157 of 157 courses scraped");

    let courses = read_catalog(&report.path);
    assert_eq!(courses.len(), TOTAL as usize);

    let keys: Vec<_> = courses
        .iter()
        .map(|c| (c.department.clone(), c.course_number))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    let first = &courses[0];
    assert_eq!(first.department, "BIOL");
    assert_eq!(first.course_number, Some(103));
    assert_eq!(first.name, "Course Number 3");
    assert_eq!(first.num_credits, Some(3.0));
    assert_eq!(first.link, "/study/courses/biol-103");
    assert_eq!(first.faculty, "Faculty of Science");
    assert_eq!(first.department_name, "Department BIOL");
    assert_eq!(first.level, vec!["Undergraduate"]);
    assert_eq!(first.terms_offered, vec!["Fall 2024", "Winter 2025"]);
}

#[tokio::test]
async fn test_output_is_identical_across_concurrency_widths() {
    let server = MockServer::start().await;
    mount_catalog(&server, Some(2024), TOTAL, &[]).await;

    let mut outputs = Vec::new();
    for width in [1, 3, 16] {
        let dir = TempDir::new().unwrap();
        let config = test_config(&server, Some(2024), width, dir.path());
        let output = config.output.clone();

        let snapshot = Coordinator::new(config).unwrap().run(&NoProgress).await.unwrap();
        let report = write_catalog(snapshot, &output).unwrap();
        outputs.push(std::fs::read(&report.path).unwrap());
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
}

#[tokio::test]
async fn test_failed_page_is_skipped() {
    let server = MockServer::start().await;

    // One initial attempt plus one retry
    Mock::given(method("GET"))
        .and(path(search_path(Some(2024)).as_str()))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;
    mount_catalog(&server, Some(2024), TOTAL, &[]).await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, Some(2024), 4, dir.path());
    let output = config.output.clone();

    let snapshot = Coordinator::new(config).unwrap().run(&NoProgress).await.unwrap();
    assert_eq!(snapshot.pages_total, 8);
    assert_eq!(snapshot.pages_failed, 1);
    assert_eq!(snapshot.courses.len(), (TOTAL - PAGE_SIZE) as usize);

    let report = write_catalog(snapshot, &output).unwrap();
    assert_eq!(report.stats.summary_line(), "137 of 157 courses scraped");
    assert_eq!(read_catalog(&report.path).len(), 137);
}

#[tokio::test]
async fn test_transient_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(search_path(Some(2024)).as_str()))
        .and(query_param("page", "5"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_catalog(&server, Some(2024), TOTAL, &[]).await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, Some(2024), 16, dir.path());

    let snapshot = Coordinator::new(config).unwrap().run(&NoProgress).await.unwrap();
    assert_eq!(snapshot.pages_failed, 0);
    assert_eq!(snapshot.courses.len(), TOTAL as usize);
}

#[tokio::test]
async fn test_all_pages_failing_writes_no_file() {
    let server = MockServer::start().await;
    let failing: Vec<u32> = (0..8).collect();
    mount_catalog(&server, Some(2024), TOTAL, &failing).await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, Some(2024), 16, dir.path());
    let output = config.output.clone();

    let snapshot = Coordinator::new(config).unwrap().run(&NoProgress).await.unwrap();
    assert_eq!(snapshot.pages_failed, 8);
    assert!(snapshot.is_empty());

    let result = write_catalog(snapshot, &output);
    assert!(matches!(result, Err(ScrapeError::EmptyCatalog { year: 2024 })));
    assert!(!dir.path().join("courses-2024-2025.json").exists());
}

#[tokio::test]
async fn test_yearless_scrape_resolves_year_from_slogan() {
    let server = MockServer::start().await;
    mount_catalog(&server, None, 45, &[]).await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, None, 16, dir.path());
    let output = config.output.clone();

    let snapshot = Coordinator::new(config).unwrap().run(&NoProgress).await.unwrap();
    assert_eq!(snapshot.year, 2024);
    assert_eq!(snapshot.scope, None);
    assert_eq!(snapshot.pages_total, 3);
    assert_eq!(snapshot.courses.len(), 45);

    let report = write_catalog(snapshot, &output).unwrap();
    assert_eq!(report.path, dir.path().join("courses-2024-2025.json"));
}

#[tokio::test]
async fn test_missing_slogan_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, None, 16, dir.path());

    let result = Coordinator::new(config).unwrap().run(&NoProgress).await;
    assert!(matches!(result, Err(ScrapeError::Parse { .. })));
}

#[tokio::test]
async fn test_year_lookup_http_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses/search"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, None, 16, dir.path());

    let err = Coordinator::new(config)
        .unwrap()
        .run(&NoProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Network { .. }));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_unparsable_count_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(search_path(Some(2024)).as_str()))
        .and(WithoutPageParam)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>Search is unavailable</p></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;
    // Any page request would be a bug
    Mock::given(method("GET"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, Some(2024), 16, dir.path());

    let result = Coordinator::new(config).unwrap().run(&NoProgress).await;
    assert!(matches!(result, Err(ScrapeError::Parse { .. })));
}

#[tokio::test]
async fn test_count_http_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(search_path(Some(2024)).as_str()))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, Some(2024), 16, dir.path());

    let err = Coordinator::new(config)
        .unwrap()
        .run(&NoProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Network { .. }));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_fetch_page_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(search_path(Some(2024)).as_str()))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(render_page(0, TOTAL)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(search_path(Some(2024)).as_str()))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, Some(2024), 16, dir.path());
    let coordinator = Coordinator::new(config).unwrap();

    assert_eq!(coordinator.fetch_page(Some(2024), 0).await.len(), 20);
    assert!(coordinator.fetch_page(Some(2024), 1).await.is_empty());
    assert!(coordinator.try_fetch_page(Some(2024), 1).await.is_err());
}

#[tokio::test]
async fn test_progress_ticks_once_per_page() {
    let server = MockServer::start().await;
    mount_catalog(&server, Some(2024), TOTAL, &[3]).await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, Some(2024), 3, dir.path());
    let progress = RecordingProgress::default();

    let snapshot = Coordinator::new(config).unwrap().run(&progress).await.unwrap();
    assert_eq!(snapshot.pages_total, 8);

    assert_eq!(*progress.started.lock().unwrap(), Some(8));
    let ticks = progress.ticks.lock().unwrap().clone();
    let expected: Vec<(u32, u32)> = (1..=8).map(|completed| (completed, 8)).collect();
    assert_eq!(ticks, expected);
    assert!(*progress.finished.lock().unwrap());
}

#[tokio::test]
async fn test_zero_courses_requests_no_pages() {
    let server = MockServer::start().await;
    mount_catalog(&server, Some(2024), 0, &[]).await;
    Mock::given(method("GET"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, Some(2024), 16, dir.path());
    let output = config.output.clone();

    let snapshot = Coordinator::new(config).unwrap().run(&NoProgress).await.unwrap();
    assert_eq!(snapshot.pages_total, 0);

    let result = write_catalog(snapshot, &output);
    assert!(matches!(result, Err(ScrapeError::EmptyCatalog { .. })));
}
