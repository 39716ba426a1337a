//! Analysis coordinator - top-level crawlability orchestration
//!
//! Fetches robots.txt, then walks the declared sitemaps and inspects the
//! target page concurrently, and finally scores the combined result.

use crate::config::Config;
use crate::crawler::build_http_client;
use crate::indexability::{self, BlockingFactors, IndexabilityResult, MetaRobots};
use crate::robots::{fetch_robots, RobotsTxtAnalysis};
use crate::score::score;
use crate::sitemap::{SitemapAnalysis, SitemapTreeCrawler, TreeLimits};
use crate::url::parse_site_url;
use crate::AuditError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Complete crawlability analysis of one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlabilityResult {
    /// The URL that was analyzed
    pub url: String,
    pub robots_txt: RobotsTxtAnalysis,
    pub indexability: IndexabilityResult,
    pub sitemaps: SitemapAnalysis,
    pub overall_indexable: bool,
    /// 0-100
    pub crawlability_score: u8,
    pub recommendations: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
    /// Set when the analysis could not be carried out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CrawlabilityResult {
    /// Builds the well-formed result for a site whose crawlability could not be determined
    ///
    /// The score is 0 and the recommendations explain why.
    pub fn undetermined(url: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            url: url.to_string(),
            robots_txt: RobotsTxtAnalysis::missing(format!("robots.txt was not checked: {}", reason)),
            indexability: IndexabilityResult {
                url: url.to_string(),
                is_indexable: false,
                blocking_factors: BlockingFactors::default(),
                meta_robots: MetaRobots::default(),
                canonical_url: None,
                recommendations: Vec::new(),
            },
            sitemaps: SitemapAnalysis::default(),
            overall_indexable: false,
            crawlability_score: 0,
            recommendations: vec![
                format!("Crawlability could not be determined: {}", reason),
                "Check that the URL is a fully-qualified http(s) address and that the site is reachable"
                    .to_string(),
            ],
            analyzed_at: Utc::now(),
            error: Some(reason),
        }
    }
}

/// Runs crawlability analyses with a shared HTTP client and configuration
pub struct Analyzer {
    config: Config,
    client: Client,
}

impl Analyzer {
    /// Creates a new analyzer
    ///
    /// # Returns
    ///
    /// * `Ok(Analyzer)` - Ready to analyze
    /// * `Err(AuditError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, AuditError> {
        let client = build_http_client(&config.user_agent, config.engine.request_timeout())?;
        Ok(Self { config, client })
    }

    /// Analyzes the crawlability of a site
    ///
    /// Problems with the site itself never produce an `Err`; only an invalid
    /// `url` does.
    pub async fn analyze(&self, url: &str) -> Result<CrawlabilityResult, AuditError> {
        let site = parse_site_url(url)?;
        tracing::info!("Analyzing crawlability of {}", site);
        let started = std::time::Instant::now();

        let robots = fetch_robots(&self.client, &site, &self.config.engine.evaluation_agent).await;

        let tree = SitemapTreeCrawler::new(&self.client, TreeLimits::from(&self.config.engine));
        let (sitemaps, indexability) = tokio::join!(
            tree.crawl(&robots.sitemaps),
            indexability::inspect(&self.client, &site, &robots),
        );

        let card = score(&robots, &indexability, &sitemaps);
        tracing::info!(
            "Analysis of {} finished in {:?}: score {}",
            site,
            started.elapsed(),
            card.score
        );

        Ok(CrawlabilityResult {
            url: site.to_string(),
            overall_indexable: indexability.is_indexable,
            robots_txt: robots,
            indexability,
            sitemaps,
            crawlability_score: card.score,
            recommendations: card.recommendations,
            analyzed_at: Utc::now(),
            error: None,
        })
    }

    /// Analyzes a site unless `cancel` completes first
    ///
    /// When `cancel` wins, every outstanding fetch of this analysis is
    /// dropped and `AuditError::Cancelled` is returned.
    pub async fn analyze_until<F>(&self, url: &str, cancel: F) -> Result<CrawlabilityResult, AuditError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                tracing::warn!("Analysis of {} cancelled", url);
                Err(AuditError::Cancelled { url: url.to_string() })
            }
            result = self.analyze(url) => result,
        }
    }

    /// Analyzes a site, folding any error into an undetermined result
    pub async fn analyze_or_undetermined(&self, url: &str) -> CrawlabilityResult {
        match self.analyze(url).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Analysis of {} failed: {}", url, e);
                CrawlabilityResult::undetermined(url, e.to_string())
            }
        }
    }
}

/// Analyzes a site with the default configuration
///
/// Always returns a renderable result; see [`CrawlabilityResult::undetermined`].
///
/// # Example
///
/// ```no_run
/// # async fn example() {
/// let result = crawl_audit::analyze_crawlability("https://example.com/").await;
/// println!("score: {}", result.crawlability_score);
/// # }
/// ```
pub async fn analyze_crawlability(url: &str) -> CrawlabilityResult {
    match Analyzer::new(Config::default()) {
        Ok(analyzer) => analyzer.analyze_or_undetermined(url).await,
        Err(e) => {
            tracing::error!("Failed to build analyzer: {}", e);
            CrawlabilityResult::undetermined(url, e.to_string())
        }
    }
}
