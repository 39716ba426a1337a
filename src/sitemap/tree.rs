//! Sitemap tree crawler
//!
//! Expands sitemap indexes into a flat URL set using an explicit worklist of
//! `(url, depth)` pairs. A single visited set and URL counter are shared by
//! the whole walk. Each node resolves independently, so one failing branch
//! never affects its siblings.

use crate::config::EngineConfig;
use crate::sitemap::resolver::SitemapResolver;
use crate::sitemap::types::{SitemapAnalysis, SitemapDetail};
use crate::state::NodeState;
use reqwest::Client;
use std::collections::HashSet;

/// Bounds applied to one tree walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLimits {
    /// Nodes at this depth or deeper are not fetched
    pub max_depth: usize,
    /// Per-node entry cap
    pub max_urls_per_sitemap: usize,
    /// Cap on page URLs accumulated across the whole walk
    pub max_total_urls: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for TreeLimits {
    fn from(config: &EngineConfig) -> Self {
        Self {
            max_depth: config.max_sitemap_depth,
            max_urls_per_sitemap: config.max_urls_per_sitemap,
            max_total_urls: config.max_total_urls,
        }
    }
}

/// A node waiting in the worklist
#[derive(Debug)]
struct PendingNode {
    url: String,
    depth: usize,
}

/// Why a pending node was not fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    Circular,
    TooDeep,
    UrlLimit,
}

/// Shared bookkeeping for one walk
#[derive(Debug, Default)]
struct TraversalState {
    visited: HashSet<String>,
    accumulated_urls: usize,
    details: Vec<SitemapDetail>,
    errors: Vec<String>,
}

impl TraversalState {
    /// Decides whether a node may be fetched, claiming it in the visited set if so
    fn admit(&mut self, node: &PendingNode, limits: &TreeLimits) -> Result<(), Skip> {
        if self.visited.contains(&node.url) {
            return Err(Skip::Circular);
        }
        if node.depth >= limits.max_depth {
            return Err(Skip::TooDeep);
        }
        if self.accumulated_urls >= limits.max_total_urls {
            return Err(Skip::UrlLimit);
        }
        self.visited.insert(node.url.clone());
        Ok(())
    }

    /// Charges a leaf's URLs against the global cap, truncating what does not fit
    fn charge(&mut self, detail: &mut SitemapDetail, limits: &TreeLimits) {
        if !detail.is_valid || detail.is_sitemap_index {
            return;
        }
        let remaining = limits.max_total_urls.saturating_sub(self.accumulated_urls);
        if detail.urls.len() > remaining {
            detail.urls.truncate(remaining);
            detail.push_error(format!(
                "Total URL limit of {} reached; sitemap truncated to {} URLs",
                limits.max_total_urls, remaining
            ));
        }
        self.accumulated_urls += detail.urls.len();
    }
}

/// Walks sitemap trees starting from a set of root URLs
pub struct SitemapTreeCrawler<'a> {
    resolver: SitemapResolver<'a>,
    limits: TreeLimits,
}

impl<'a> SitemapTreeCrawler<'a> {
    /// Creates a crawler using `client` for every fetch
    pub fn new(client: &'a Client, limits: TreeLimits) -> Self {
        Self {
            resolver: SitemapResolver::new(client, limits.max_urls_per_sitemap),
            limits,
        }
    }

    /// Resolves every root and, recursively, every child of an index
    ///
    /// The walk is depth-first in document order. It always returns an
    /// analysis covering each node actually visited.
    pub async fn crawl(&self, roots: &[String]) -> SitemapAnalysis {
        let mut state = TraversalState::default();
        let mut worklist: Vec<PendingNode> = roots
            .iter()
            .rev()
            .map(|url| PendingNode {
                url: url.clone(),
                depth: 0,
            })
            .collect();

        while let Some(node) = worklist.pop() {
            if let Err(skip) = state.admit(&node, &self.limits) {
                let message = self.skip_message(skip);
                tracing::warn!("Skipping sitemap {}: {}", node.url, message);
                state.errors.push(format!("{}: {}", node.url, message));
                continue;
            }

            let mut node_state = NodeState::Unvisited;
            advance(&mut node_state, NodeState::Fetching, &node.url);

            let mut detail = self.resolver.resolve(&node.url, node.depth).await;
            advance(&mut node_state, detail.state, &node.url);
            debug_assert!(node_state.is_terminal());
            debug_assert_eq!(node_state.is_success(), detail.is_valid);
            tracing::debug!(
                "Sitemap {} at depth {} {} with {} entries",
                node.url,
                node.depth,
                if node_state.is_success() { "resolved" } else { "failed" },
                detail.urls.len()
            );

            state.charge(&mut detail, &self.limits);

            if let Some(error) = &detail.error {
                state.errors.push(format!("{}: {}", detail.url, error));
            }

            if detail.is_sitemap_index {
                worklist.extend(detail.urls.iter().rev().map(|child| PendingNode {
                    url: child.loc.clone(),
                    depth: node.depth + 1,
                }));
            }

            state.details.push(detail);
        }

        let analysis = SitemapAnalysis::from_walk(roots.to_vec(), state.details, state.errors);
        tracing::info!(
            "Sitemap walk finished: {} visited ({} valid, {} invalid), {} URLs, {} errors",
            analysis.sitemaps.len(),
            analysis.valid.len(),
            analysis.invalid.len(),
            analysis.urls.len(),
            analysis.errors.len()
        );
        analysis
    }

    fn skip_message(&self, skip: Skip) -> String {
        match skip {
            Skip::Circular => "Circular sitemap reference detected".to_string(),
            Skip::TooDeep => format!(
                "Maximum sitemap depth of {} exceeded",
                self.limits.max_depth
            ),
            Skip::UrlLimit => format!(
                "Total URL limit of {} reached; sitemap skipped",
                self.limits.max_total_urls
            ),
        }
    }
}

fn advance(current: &mut NodeState, next: NodeState, url: &str) {
    debug_assert!(
        current.can_transition_to(next),
        "illegal sitemap node transition {} -> {}",
        current,
        next
    );
    tracing::trace!("Sitemap {}: {} -> {}", url, current, next);
    *current = next;
}
