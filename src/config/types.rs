use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Crawl-Audit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Analysis engine limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Timeout applied to every outbound request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Maximum sitemap index nesting depth
    #[serde(rename = "max-sitemap-depth")]
    pub max_sitemap_depth: usize,

    /// Maximum number of entries kept from a single sitemap
    #[serde(rename = "max-urls-per-sitemap")]
    pub max_urls_per_sitemap: usize,

    /// Maximum number of page URLs accumulated across a whole sitemap tree
    #[serde(rename = "max-total-urls")]
    pub max_total_urls: usize,

    /// User agent whose robots.txt rules are evaluated
    #[serde(rename = "evaluation-agent")]
    pub evaluation_agent: String,
}

impl EngineConfig {
    /// Returns the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            max_sitemap_depth: 10,
            max_urls_per_sitemap: 100_000,
            max_total_urls: 500_000,
            evaluation_agent: "*".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "CrawlAudit".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/crawl-audit/crawl-audit".to_string(),
        }
    }
}
