//! State module for tracking sitemap traversal progress
//!
//! # Components
//!
//! - `NodeState`: lifecycle of a single sitemap node during a tree walk

mod node_state;

pub use node_state::NodeState;
