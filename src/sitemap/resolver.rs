//! Sitemap node resolver
//!
//! Resolves one sitemap URL into a [`SitemapDetail`] without recursing:
//! fetch, content-type check, optional gunzip, XML parse, entry extraction.
//! Every failure becomes a detail with `is_valid == false`.

use crate::crawler::{fetch_url, FetchResult};
use crate::sitemap::types::{SitemapDetail, SitemapUrl};
use crate::sitemap::xml::{parse_sitemap_document, SitemapDocument, XmlError};
use crate::state::NodeState;
use flate2::read::GzDecoder;
use reqwest::Client;
use std::io::Read;
use thiserror::Error;
use url::Url;

/// Largest decompressed size accepted for a gzip sitemap
pub const MAX_DECOMPRESSED_BYTES: u64 = 256 * 1024 * 1024;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Reasons a single sitemap node fails to resolve
#[derive(Debug, Error, PartialEq)]
pub enum NodeError {
    #[error("Invalid sitemap URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {0}")]
    Http(u16),

    #[error("{0}")]
    Network(String),

    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    #[error("Failed to decompress gzip sitemap: {0}")]
    Decompress(String),

    #[error("Sitemap is not valid UTF-8")]
    Encoding,

    #[error("Invalid XML: {0}")]
    Xml(String),

    #[error("Not a valid sitemap format (root element <{0}>)")]
    UnknownFormat(String),
}

/// Resolves individual sitemap nodes
pub struct SitemapResolver<'a> {
    client: &'a Client,
    max_urls_per_sitemap: usize,
}

impl<'a> SitemapResolver<'a> {
    /// Creates a resolver that keeps at most `max_urls_per_sitemap` entries per node
    pub fn new(client: &'a Client, max_urls_per_sitemap: usize) -> Self {
        Self {
            client,
            max_urls_per_sitemap,
        }
    }

    /// Resolves one sitemap URL
    ///
    /// # Arguments
    ///
    /// * `url` - The sitemap URL
    /// * `depth` - Depth of this node in the tree, recorded on the detail
    pub async fn resolve(&self, url: &str, depth: usize) -> SitemapDetail {
        match self.fetch_document(url).await {
            Ok(document) => self.build_detail(url, depth, document),
            Err(e) => {
                tracing::warn!("Sitemap {} failed: {}", url, e);
                SitemapDetail::failed(url, depth, e.to_string())
            }
        }
    }

    async fn fetch_document(&self, url: &str) -> Result<SitemapDocument, NodeError> {
        let parsed = Url::parse(url).map_err(|e| NodeError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(NodeError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let (content_type, body) = match fetch_url(self.client, url).await {
            FetchResult::Success {
                content_type, body, ..
            } => (content_type, body),
            FetchResult::HttpError { status_code } => return Err(NodeError::Http(status_code)),
            FetchResult::NetworkError { error } => return Err(NodeError::Network(error)),
        };

        check_content_type(&content_type, parsed.path())?;
        let text = decode_body(body)?;

        parse_sitemap_document(&text, self.max_urls_per_sitemap).map_err(|e| match e {
            XmlError::Malformed(message) => NodeError::Xml(message),
            XmlError::UnknownRoot(root) => NodeError::UnknownFormat(root),
        })
    }

    fn build_detail(&self, url: &str, depth: usize, document: SitemapDocument) -> SitemapDetail {
        match document {
            SitemapDocument::UrlSet { entries, truncated } => {
                tracing::debug!("Sitemap {} lists {} URLs", url, entries.len());
                let urls = entries
                    .into_iter()
                    .map(|entry| SitemapUrl {
                        loc: entry.loc,
                        lastmod: entry.lastmod,
                        changefreq: entry.changefreq,
                        priority: entry.priority,
                        is_sitemap: false,
                        sitemap_source: url.to_string(),
                    })
                    .collect();
                let error = truncated.then(|| {
                    format!(
                        "Sitemap contains more than {} URLs; truncated to {}",
                        self.max_urls_per_sitemap, self.max_urls_per_sitemap
                    )
                });
                SitemapDetail {
                    url: url.to_string(),
                    is_valid: true,
                    is_sitemap_index: false,
                    urls,
                    error,
                    state: NodeState::LeafResolved,
                    depth,
                }
            }
            SitemapDocument::Index { sitemaps } => {
                tracing::debug!("Sitemap index {} references {} sitemaps", url, sitemaps.len());
                let urls = sitemaps
                    .into_iter()
                    .map(|loc| SitemapUrl {
                        loc,
                        lastmod: None,
                        changefreq: None,
                        priority: None,
                        is_sitemap: true,
                        sitemap_source: url.to_string(),
                    })
                    .collect();
                SitemapDetail {
                    url: url.to_string(),
                    is_valid: true,
                    is_sitemap_index: true,
                    urls,
                    error: None,
                    state: NodeState::IndexResolved,
                    depth,
                }
            }
        }
    }
}

/// Accepts XML, text, and gzip content types
///
/// A `.gz` path is accepted regardless of the declared type since gzip
/// sitemaps are commonly served as `application/octet-stream`.
fn check_content_type(content_type: &str, path: &str) -> Result<(), NodeError> {
    let lowered = content_type.to_ascii_lowercase();
    if lowered.contains("xml")
        || lowered.contains("text")
        || lowered.contains("gzip")
        || path.ends_with(".gz")
    {
        Ok(())
    } else if content_type.is_empty() {
        Err(NodeError::InvalidContentType("(none)".to_string()))
    } else {
        Err(NodeError::InvalidContentType(content_type.to_string()))
    }
}

/// Converts a response body to text, gunzipping when it carries the gzip magic
fn decode_body(body: Vec<u8>) -> Result<String, NodeError> {
    let bytes = if body.starts_with(&GZIP_MAGIC) {
        gunzip(&body)?
    } else {
        body
    };
    String::from_utf8(bytes).map_err(|_| NodeError::Encoding)
}

fn gunzip(compressed: &[u8]) -> Result<Vec<u8>, NodeError> {
    let mut decoder = GzDecoder::new(compressed).take(MAX_DECOMPRESSED_BYTES + 1);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| NodeError::Decompress(e.to_string()))?;
    if decompressed.len() as u64 > MAX_DECOMPRESSED_BYTES {
        return Err(NodeError::Decompress(format!(
            "decompressed size exceeds {} bytes",
            MAX_DECOMPRESSED_BYTES
        )));
    }
    Ok(decompressed)
}
