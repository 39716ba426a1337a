//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made during an analysis:
//! - Building HTTP clients with a proper user agent string and timeouts
//! - GET requests for robots.txt, sitemaps and the inspected page
//! - Error classification (HTTP status vs. transport failure)
//!
//! There is no retry logic: a failed fetch is final for that invocation.

use crate::config::UserAgentConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Largest response body accepted from any single request
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Received a 2xx response
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value (empty if absent)
        content_type: String,
        /// X-Robots-Tag header value, if present
        x_robots_tag: Option<String>,
        /// Raw response body
        body: Vec<u8>,
    },

    /// Received a non-2xx response
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, oversize body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total timeout applied to each request
///
/// # Example
///
/// ```no_run
/// use crawl_audit::config::UserAgentConfig;
/// use crawl_audit::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Success` |
/// | any other status | `HttpError` |
/// | timeout | `NetworkError("Request timeout")` |
/// | connection failure | `NetworkError("Connection failed: ...")` |
/// | body over [`MAX_BODY_BYTES`] | `NetworkError` |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let mut response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    let content_type = header_string(&response, "content-type").unwrap_or_default();
    let x_robots_tag = header_string(&response, "x-robots-tag");

    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return FetchResult::NetworkError {
                        error: format!("Response body exceeds {} bytes", MAX_BODY_BYTES),
                    };
                }
                body.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(e) => return classify_error(&e),
        }
    }

    FetchResult::Success {
        final_url,
        status_code: status.as_u16(),
        content_type,
        x_robots_tag,
        body,
    }
}

fn header_string(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };
    FetchResult::NetworkError { error }
}
