//! Crawler module for crawlability analysis
//!
//! This module contains the network-facing parts of an analysis:
//! - HTTP fetching with timeouts and error classification
//! - HTML parsing for indexing signals
//! - Overall analysis coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{analyze_crawlability, Analyzer, CrawlabilityResult};
pub use fetcher::{build_http_client, fetch_url, FetchResult, MAX_BODY_BYTES};
pub use parser::{parse_page_signals, PageSignals};
