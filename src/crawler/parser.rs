//! HTML parser for extracting indexing signals
//!
//! This module pulls the page-level signals that affect indexing out of an
//! HTML document:
//! - `<meta name="robots" content="...">` directives
//! - `<link rel="canonical" href="...">`

use scraper::{Html, Selector};
use url::Url;

/// Indexing signals extracted from an HTML page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSignals {
    /// Content of every robots meta tag, joined with commas
    pub meta_robots: Option<String>,

    /// Canonical URL resolved against the page URL
    pub canonical: Option<Url>,
}

/// Parses HTML content and extracts indexing signals
///
/// The `name` attribute of the robots meta tag and the `rel` value of the
/// canonical link are compared case-insensitively. When several canonical
/// links are present the first resolvable one wins.
///
/// # Example
///
/// ```
/// use crawl_audit::crawler::parse_page_signals;
/// use url::Url;
///
/// let html = r#"<html><head>
///     <meta name="ROBOTS" content="noindex">
///     <link rel="canonical" href="/page">
/// </head></html>"#;
/// let base_url = Url::parse("https://example.com/page?ref=x").unwrap();
/// let signals = parse_page_signals(html, &base_url);
/// assert_eq!(signals.meta_robots.as_deref(), Some("noindex"));
/// assert_eq!(signals.canonical.unwrap().as_str(), "https://example.com/page");
/// ```
pub fn parse_page_signals(html: &str, base_url: &Url) -> PageSignals {
    let document = Html::parse_document(html);

    PageSignals {
        meta_robots: extract_meta_robots(&document),
        canonical: extract_canonical(&document, base_url),
    }
}

/// Collects the content of all robots meta tags
fn extract_meta_robots(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name][content]").ok()?;

    let contents: Vec<&str> = document
        .select(&selector)
        .filter(|element| {
            element
                .value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("robots"))
        })
        .filter_map(|element| element.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .collect();

    if contents.is_empty() {
        None
    } else {
        Some(contents.join(","))
    }
}

/// Finds the canonical link and resolves it to an absolute URL
fn extract_canonical(document: &Html, base_url: &Url) -> Option<Url> {
    let selector = Selector::parse("link[rel][href]").ok()?;

    document
        .select(&selector)
        .filter(|element| {
            element.value().attr("rel").is_some_and(|rel| {
                rel.split_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("canonical"))
            })
        })
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .find_map(|href| base_url.join(href).ok())
        .filter(|url| url.scheme() == "http" || url.scheme() == "https")
}
