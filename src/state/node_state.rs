/// Sitemap node state definitions
///
/// A node moves `Unvisited -> Fetching -> {LeafResolved | IndexResolved | Failed}`.
/// An index node fans out to child nodes that each start at `Unvisited`.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the current state of a sitemap node in a tree walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    // ===== Active States =====
    /// Node is known but has not been requested yet
    Unvisited,

    /// Node is being fetched and parsed
    Fetching,

    // ===== Terminal States =====
    /// Node parsed as a `<urlset>` of page URLs
    LeafResolved,

    /// Node parsed as a `<sitemapindex>` of child sitemaps
    IndexResolved,

    /// Node could not be fetched or parsed
    Failed,
}

impl NodeState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unvisited | Self::Fetching)
    }

    /// Returns true if this represents a successful resolution
    pub fn is_success(&self) -> bool {
        matches!(self, Self::LeafResolved | Self::IndexResolved)
    }

    /// Returns true if moving from this state to `next` is a legal transition
    pub fn can_transition_to(&self, next: NodeState) -> bool {
        matches!(
            (self, next),
            (Self::Unvisited, Self::Fetching)
                | (Self::Fetching, Self::LeafResolved)
                | (Self::Fetching, Self::IndexResolved)
                | (Self::Fetching, Self::Failed)
        )
    }

    /// Returns the string form used in reports and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unvisited => "unvisited",
            Self::Fetching => "fetching",
            Self::LeafResolved => "leaf_resolved",
            Self::IndexResolved => "index_resolved",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
