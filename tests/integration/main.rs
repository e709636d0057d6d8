//! Integration tests for the catalog scraper
//!
//! These tests use wiremock to serve a fake course search and run the full
//! resolve, paginate and write cycle end-to-end.


mod output_tests;
mod scrape_tests;
