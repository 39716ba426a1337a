use crate::state::NodeState;
use serde::{Deserialize, Serialize};

/// One entry of a sitemap: a page, or a reference to a child sitemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapUrl {
    /// Absolute URL of the page or child sitemap
    pub loc: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,

    /// True when this entry references another sitemap rather than a page
    pub is_sitemap: bool,

    /// The sitemap this entry was read from
    pub sitemap_source: String,
}

/// Result of resolving a single sitemap URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapDetail {
    pub url: String,

    pub is_valid: bool,

    pub is_sitemap_index: bool,

    /// Direct entries of this node: pages for a leaf, child sitemaps for an index
    pub urls: Vec<SitemapUrl>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Terminal lifecycle state of the node
    pub state: NodeState,

    /// Distance from the root sitemap that led here (roots are 0)
    pub depth: usize,
}

impl SitemapDetail {
    /// Builds the detail for a node that failed to resolve
    pub fn failed(url: impl Into<String>, depth: usize, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_valid: false,
            is_sitemap_index: false,
            urls: Vec::new(),
            error: Some(error.into()),
            state: NodeState::Failed,
            depth,
        }
    }

    /// Records an additional non-fatal problem without changing validity
    pub fn push_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error = Some(match self.error.take() {
            Some(existing) => format!("{}; {}", existing, message),
            None => message,
        });
    }
}

/// Aggregate over a whole sitemap tree walk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapAnalysis {
    /// Sitemap URLs declared in robots.txt
    pub discovered: Vec<String>,

    /// Visited sitemaps that resolved successfully
    pub valid: Vec<String>,

    /// Visited sitemaps that failed
    pub invalid: Vec<String>,

    /// Every page-level entry across the tree, capped
    pub urls: Vec<SitemapUrl>,

    /// Every visited node, in visit order
    pub sitemaps: Vec<SitemapDetail>,

    /// Per-node failures and circuit-breaker notices
    pub errors: Vec<String>,
}

impl SitemapAnalysis {
    /// Folds the visited nodes of a walk into the aggregate view
    pub fn from_walk(discovered: Vec<String>, sitemaps: Vec<SitemapDetail>, errors: Vec<String>) -> Self {
        let (valid, invalid): (Vec<&SitemapDetail>, Vec<&SitemapDetail>) =
            sitemaps.iter().partition(|detail| detail.is_valid);

        let urls = sitemaps
            .iter()
            .filter(|detail| detail.is_valid && !detail.is_sitemap_index)
            .flat_map(|detail| detail.urls.iter().cloned())
            .collect();

        Self {
            discovered,
            valid: valid.into_iter().map(|d| d.url.clone()).collect(),
            invalid: invalid.into_iter().map(|d| d.url.clone()).collect(),
            urls,
            sitemaps,
            errors,
        }
    }

    /// Returns true if at least one sitemap resolved successfully
    pub fn has_valid_sitemap(&self) -> bool {
        !self.valid.is_empty()
    }
}
