//! Integration tests for the crawlability analyzer
//!
//! These tests use wiremock to serve robots.txt files, sitemaps and pages
//! and exercise the full analysis against real HTTP.

mod analysis_tests;
mod robots_tests;

use crawl_audit::config::Config;
use crawl_audit::crawler::build_http_client;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used by the direct module tests
pub fn test_client() -> Client {
    build_http_client(&Config::default().user_agent, Duration::from_secs(5))
        .expect("Failed to build test client")
}

/// Wraps page locations in a `<urlset>` document
pub fn urlset(locs: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    );
    for loc in locs {
        xml.push_str(&format!("<url><loc>{}</loc></url>", loc));
    }
    xml.push_str("</urlset>");
    xml
}

/// Wraps child sitemap locations in a `<sitemapindex>` document
pub fn sitemap_index(locs: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    );
    for loc in locs {
        xml.push_str(&format!("<sitemap><loc>{}</loc></sitemap>", loc));
    }
    xml.push_str("</sitemapindex>");
    xml
}
