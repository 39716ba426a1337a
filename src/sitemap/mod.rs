//! Sitemap handling module
//!
//! This module resolves XML sitemaps (plain or gzip-compressed), follows
//! sitemap indexes recursively with depth, cycle and size bounds, and folds
//! the visited nodes into a [`SitemapAnalysis`].

mod resolver;
mod tree;
mod types;
mod xml;

pub use resolver::{NodeError, SitemapResolver, MAX_DECOMPRESSED_BYTES};
pub use tree::{SitemapTreeCrawler, TreeLimits};
pub use types::{SitemapAnalysis, SitemapDetail, SitemapUrl};
pub use xml::{parse_sitemap_document, SitemapDocument, UrlEntry, XmlError};
