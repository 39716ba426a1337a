//! URL handling module for Crawl-Audit
//!
//! This module provides site URL validation, robots.txt location derivation,
//! and the comparison normalization used for canonical URL checks.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{robots_path, robots_url};
pub use normalize::{comparison_key, parse_site_url, same_page};
