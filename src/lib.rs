//! Crawl-Audit: a crawlability analysis engine
//!
//! This crate determines whether a website can be discovered and indexed by
//! search-engine crawlers. It parses the site's robots.txt, walks its XML
//! sitemap tree (including nested indexes and gzip-compressed sitemaps),
//! inspects a page for indexing directives, and produces a 0-100
//! crawlability score with recommendations.

pub mod config;
pub mod crawler;
pub mod indexability;
pub mod output;
pub mod robots;
pub mod score;
pub mod sitemap;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Crawl-Audit operations
///
/// Problems with the analyzed site (missing files, bad XML, unreachable
/// hosts) are never reported through this type; they become fields of the
/// returned [`CrawlabilityResult`].
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Analysis of {url} was cancelled")]
    Cancelled { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Crawl-Audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{analyze_crawlability, Analyzer, CrawlabilityResult};
pub use indexability::{BlockingFactors, IndexabilityResult, MetaRobots};
pub use robots::{RobotsRule, RobotsTxtAnalysis};
pub use sitemap::{SitemapAnalysis, SitemapDetail, SitemapUrl};
pub use state::NodeState;
