//! Indexability inspection
//!
//! Fetches one page and decides whether a compliant search engine would
//! index it, combining robots.txt rules, robots meta directives, the
//! `X-Robots-Tag` header, and canonical URL analysis.

use crate::crawler::{fetch_url, parse_page_signals, FetchResult, PageSignals};
use crate::robots::RobotsTxtAnalysis;
use crate::url::{robots_path, same_page};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// Robots directives found on a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaRobots {
    pub noindex: bool,
    pub nofollow: bool,
    pub noarchive: bool,
    pub nosnippet: bool,
}

impl MetaRobots {
    /// Parses a directive list such as `"noindex, nofollow"`
    ///
    /// Tokens are split on commas and whitespace and compared
    /// case-insensitively. `none` implies both `noindex` and `nofollow`.
    ///
    /// # Example
    ///
    /// ```
    /// use crawl_audit::MetaRobots;
    ///
    /// let meta = MetaRobots::parse("NOINDEX,follow");
    /// assert!(meta.noindex);
    /// assert!(!meta.nofollow);
    /// ```
    pub fn parse(directives: &str) -> Self {
        let mut meta = Self::default();
        for token in directives
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(|token| token.trim().to_ascii_lowercase())
        {
            match token.as_str() {
                "noindex" => meta.noindex = true,
                "nofollow" => meta.nofollow = true,
                "noarchive" => meta.noarchive = true,
                "nosnippet" => meta.nosnippet = true,
                "none" => {
                    meta.noindex = true;
                    meta.nofollow = true;
                }
                _ => {}
            }
        }
        meta
    }

    /// Combines two directive sets; a directive set in either is set in the result
    pub fn merge(self, other: Self) -> Self {
        Self {
            noindex: self.noindex || other.noindex,
            nofollow: self.nofollow || other.nofollow,
            noarchive: self.noarchive || other.noarchive,
            nosnippet: self.nosnippet || other.nosnippet,
        }
    }
}

/// Which signals contributed to a page not being indexable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockingFactors {
    /// robots.txt disallows the page path
    pub robots_txt: bool,
    /// a `noindex` directive is present
    pub meta_robots: bool,
    /// a `nofollow` directive is present
    pub nofollow: bool,
    /// always false: canonical problems are advisory only
    pub canonical: bool,
}

/// Indexability verdict for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexabilityResult {
    pub url: String,
    pub is_indexable: bool,
    pub blocking_factors: BlockingFactors,
    pub meta_robots: MetaRobots,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    pub recommendations: Vec<String>,
}

/// Fetches `url` and evaluates its indexability against `robots`
///
/// Never fails: an unreachable page or a non-2xx status yields a
/// non-indexable result with a recommendation naming the cause.
pub async fn inspect(client: &Client, url: &Url, robots: &RobotsTxtAnalysis) -> IndexabilityResult {
    let robots_blocked = robots.is_path_blocked(&robots_path(url));

    match fetch_url(client, url.as_str()).await {
        FetchResult::Success {
            final_url,
            status_code,
            body,
            x_robots_tag,
            ..
        } => {
            let landed = Url::parse(&final_url).unwrap_or_else(|_| url.clone());
            tracing::debug!("Fetched {} (HTTP {}, landed on {})", url, status_code, landed);
            let html = String::from_utf8_lossy(&body);
            let signals = parse_page_signals(&html, &landed);
            evaluate_landed(url, &landed, robots_blocked, &signals, x_robots_tag.as_deref())
        }
        FetchResult::HttpError { status_code } => unreachable_page(
            url,
            robots_blocked,
            format!(
                "Page returned HTTP {}; it must return a 2xx status to be indexed",
                status_code
            ),
        ),
        FetchResult::NetworkError { error } => unreachable_page(
            url,
            robots_blocked,
            format!("Page could not be fetched ({}); it must be reachable to be indexed", error),
        ),
    }
}

/// Evaluates the signals of a successfully fetched page
pub fn evaluate(
    url: &Url,
    robots_blocked: bool,
    signals: &PageSignals,
    x_robots_tag: Option<&str>,
) -> IndexabilityResult {
    evaluate_landed(url, url, robots_blocked, signals, x_robots_tag)
}

/// Evaluates a page that was requested as `url` and served from `landed`
///
/// When redirects moved the page, the canonical link is compared with the
/// URL that actually served it.
fn evaluate_landed(
    url: &Url,
    landed: &Url,
    robots_blocked: bool,
    signals: &PageSignals,
    x_robots_tag: Option<&str>,
) -> IndexabilityResult {
    let meta_robots = signals
        .meta_robots
        .as_deref()
        .map(MetaRobots::parse)
        .unwrap_or_default()
        .merge(x_robots_tag.map(MetaRobots::parse).unwrap_or_default());

    let mut recommendations = Vec::new();
    if robots_blocked {
        recommendations.push(robots_recommendation(url));
    }
    if meta_robots.noindex {
        recommendations
            .push("Page has a noindex robots directive; remove it to allow indexing".to_string());
    }
    if meta_robots.nofollow {
        recommendations.push(
            "Page has a nofollow robots directive; links on this page will not be followed"
                .to_string(),
        );
    }
    if meta_robots.nosnippet {
        recommendations.push(
            "Page has a nosnippet robots directive; search results will show no text snippet"
                .to_string(),
        );
    }

    if !same_page(landed, url) {
        recommendations.push(format!(
            "Page redirects to {}; link to the final URL directly",
            landed
        ));
    }

    match &signals.canonical {
        None => recommendations.push(
            "Missing canonical URL; add a <link rel=\"canonical\"> tag to prevent duplicate content issues"
                .to_string(),
        ),
        Some(canonical) if !same_page(canonical, landed) => recommendations.push(format!(
            "Canonical URL {} differs from the page URL; this may indicate duplicate content",
            canonical
        )),
        Some(_) => {}
    }

    let is_indexable = !meta_robots.noindex && !robots_blocked;
    tracing::info!(
        "Page {} is {}indexable (robots.txt blocked: {}, noindex: {})",
        url,
        if is_indexable { "" } else { "not " },
        robots_blocked,
        meta_robots.noindex
    );

    IndexabilityResult {
        url: url.to_string(),
        is_indexable,
        blocking_factors: BlockingFactors {
            robots_txt: robots_blocked,
            meta_robots: meta_robots.noindex,
            nofollow: meta_robots.nofollow,
            canonical: false,
        },
        meta_robots,
        canonical_url: signals.canonical.as_ref().map(Url::to_string),
        recommendations,
    }
}

fn unreachable_page(url: &Url, robots_blocked: bool, reason: String) -> IndexabilityResult {
    tracing::warn!("Page {} not inspectable: {}", url, reason);
    let mut recommendations = vec![reason];
    if robots_blocked {
        recommendations.push(robots_recommendation(url));
    }

    IndexabilityResult {
        url: url.to_string(),
        is_indexable: false,
        blocking_factors: BlockingFactors {
            robots_txt: robots_blocked,
            ..BlockingFactors::default()
        },
        meta_robots: MetaRobots::default(),
        canonical_url: None,
        recommendations,
    }
}

fn robots_recommendation(url: &Url) -> String {
    format!(
        "Page is blocked by robots.txt ({} is disallowed); remove or narrow the matching Disallow rule",
        robots_path(url)
    )
}
