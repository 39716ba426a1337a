use serde::{Deserialize, Serialize};

/// One `User-agent` block of a robots.txt file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsRule {
    /// The agent token exactly as written in the file
    pub user_agent: String,

    /// `Disallow` patterns in file order
    pub disallow: Vec<String>,

    /// `Allow` patterns in file order
    pub allow: Vec<String>,

    /// `Crawl-delay` in seconds, if declared and valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawl_delay: Option<f64>,

    /// `Sitemap` URLs declared while this block was active
    pub sitemap: Vec<String>,
}

impl RobotsRule {
    /// Creates an empty rule block for an agent
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    /// Returns true if the block has no allow or disallow patterns
    pub fn is_empty(&self) -> bool {
        self.disallow.is_empty() && self.allow.is_empty()
    }
}

/// Result of fetching and parsing a site's robots.txt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsTxtAnalysis {
    /// Whether the file was served with a 2xx status
    pub exists: bool,

    /// Raw file content (empty when the file does not exist)
    pub content: String,

    /// True when parsing produced no errors
    pub is_valid: bool,

    /// Human-readable syntax problems, in line order
    pub errors: Vec<String>,

    /// Rule blocks in file order
    pub rules: Vec<RobotsRule>,

    /// Every declared sitemap URL, regardless of block
    pub sitemaps: Vec<String>,

    /// Rules selected for the evaluation agent; empty when nothing matched
    pub applicable_rules: RobotsRule,
}

impl RobotsTxtAnalysis {
    /// Builds the analysis for a site whose robots.txt could not be retrieved
    pub fn missing(reason: impl Into<String>) -> Self {
        Self {
            exists: false,
            content: String::new(),
            is_valid: false,
            errors: vec![reason.into()],
            rules: Vec::new(),
            sitemaps: Vec::new(),
            applicable_rules: RobotsRule::default(),
        }
    }

    /// Returns true if the given path is disallowed under the applicable rules
    pub fn is_path_blocked(&self, path: &str) -> bool {
        crate::robots::is_path_blocked(&self.applicable_rules, path)
    }
}
