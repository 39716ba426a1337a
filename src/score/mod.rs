//! Crawlability scoring
//!
//! Deterministic point deductions from 100. The weights and the order of
//! recommendations are part of the output contract.

use crate::indexability::IndexabilityResult;
use crate::robots::RobotsTxtAnalysis;
use crate::sitemap::SitemapAnalysis;
use serde::Serialize;

/// Deduction when robots.txt does not exist
pub const MISSING_ROBOTS_PENALTY: u8 = 20;
/// Deduction when robots.txt exists but has syntax errors
pub const INVALID_ROBOTS_PENALTY: u8 = 30;
/// Deduction when the inspected page is not indexable
pub const NOT_INDEXABLE_PENALTY: u8 = 50;
/// Deduction when no sitemap resolved successfully
pub const NO_VALID_SITEMAP_PENALTY: u8 = 10;

/// Score and ordered recommendations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    pub score: u8,
    pub recommendations: Vec<String>,
}

/// Scores a site from its three analyses
///
/// Recommendations are ordered: robots.txt, sitemaps, then the
/// indexability recommendations verbatim.
///
/// # Example
///
/// ```
/// use crawl_audit::robots::RobotsTxtAnalysis;
/// use crawl_audit::score::score;
/// use crawl_audit::sitemap::SitemapAnalysis;
/// use crawl_audit::{BlockingFactors, IndexabilityResult, MetaRobots};
///
/// let robots = RobotsTxtAnalysis::missing("robots.txt not found (HTTP 404)");
/// let page = IndexabilityResult {
///     url: "https://example.com/".to_string(),
///     is_indexable: true,
///     blocking_factors: BlockingFactors::default(),
///     meta_robots: MetaRobots::default(),
///     canonical_url: Some("https://example.com/".to_string()),
///     recommendations: Vec::new(),
/// };
/// let card = score(&robots, &page, &SitemapAnalysis::default());
/// assert_eq!(card.score, 70);
/// ```
pub fn score(
    robots: &RobotsTxtAnalysis,
    indexability: &IndexabilityResult,
    sitemaps: &SitemapAnalysis,
) -> ScoreCard {
    let mut deductions: u32 = 0;
    let mut recommendations = Vec::new();

    if !robots.exists {
        deductions += u32::from(MISSING_ROBOTS_PENALTY);
        recommendations
            .push("Create a robots.txt file to guide search engine crawlers".to_string());
    } else if !robots.is_valid {
        deductions += u32::from(INVALID_ROBOTS_PENALTY);
        recommendations.push(format!(
            "Fix robots.txt syntax errors: {}",
            robots.errors.join("; ")
        ));
    }

    if !sitemaps.has_valid_sitemap() {
        deductions += u32::from(NO_VALID_SITEMAP_PENALTY);
        if sitemaps.discovered.is_empty() {
            recommendations.push(
                "Add an XML sitemap and declare it with a Sitemap directive in robots.txt"
                    .to_string(),
            );
        } else {
            recommendations.push(format!(
                "Fix invalid sitemaps: {}",
                sitemaps.invalid.join(", ")
            ));
        }
    }

    if !indexability.is_indexable {
        deductions += u32::from(NOT_INDEXABLE_PENALTY);
    }
    recommendations.extend(indexability.recommendations.iter().cloned());

    let score = 100u32.saturating_sub(deductions) as u8;
    ScoreCard {
        score,
        recommendations,
    }
}
