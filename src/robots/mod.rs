//! Robots.txt handling module
//!
//! This module provides fetching and parsing of robots.txt files and the
//! pattern matching used to decide whether a path is disallowed.

mod matcher;
mod parser;
mod types;

pub use matcher::{is_blocked, is_path_blocked};
pub use parser::{parse, parse_for_agent, select_rules, WILDCARD_AGENT};
pub use types::{RobotsRule, RobotsTxtAnalysis};

use crate::crawler::{fetch_url, FetchResult};
use reqwest::Client;
use url::Url;

/// Fetches and parses robots.txt for a site
///
/// A missing or unreachable file is not an error: it yields an analysis with
/// `exists == false` and the reason recorded in `errors`.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `site` - Any URL on the site; only scheme, host and port are used
/// * `agent` - The agent whose rules populate `applicable_rules`
pub async fn fetch_robots(client: &Client, site: &Url, agent: &str) -> RobotsTxtAnalysis {
    let robots_url = crate::url::robots_url(site);
    tracing::debug!("Fetching {}", robots_url);

    match fetch_url(client, robots_url.as_str()).await {
        FetchResult::Success { body, .. } => {
            let content = String::from_utf8_lossy(&body);
            let analysis = parse_for_agent(&content, agent);
            tracing::info!(
                "Parsed {}: {} rule blocks, {} sitemaps, {} errors",
                robots_url,
                analysis.rules.len(),
                analysis.sitemaps.len(),
                analysis.errors.len()
            );
            analysis
        }
        FetchResult::HttpError { status_code } => {
            tracing::info!("No robots.txt at {} (HTTP {})", robots_url, status_code);
            RobotsTxtAnalysis::missing(format!("robots.txt not found (HTTP {})", status_code))
        }
        FetchResult::NetworkError { error } => {
            tracing::warn!("Failed to fetch {}: {}", robots_url, error);
            RobotsTxtAnalysis::missing(format!("robots.txt could not be fetched: {}", error))
        }
    }
}
