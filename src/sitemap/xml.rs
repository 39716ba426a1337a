//! Typed representation of sitemap XML documents
//!
//! Only the two sitemap root elements are recognized; anything else is an
//! explicit unknown-format error. Elements are matched on their local name so
//! documents with or without the sitemaps.org namespace parse the same way.

use roxmltree::{Document, Node, ParsingOptions};

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq)]
pub enum SitemapDocument {
    /// `<urlset>`: page entries, at most `limit` of them
    UrlSet {
        entries: Vec<UrlEntry>,
        /// True when the document held more entries than the limit
        truncated: bool,
    },

    /// `<sitemapindex>`: locations of child sitemaps
    Index { sitemaps: Vec<String> },
}

/// One `<url>` element of a `<urlset>`
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<f32>,
}

/// Why a document could not be read as a sitemap
#[derive(Debug, Clone, PartialEq)]
pub enum XmlError {
    /// The text is not well-formed XML
    Malformed(String),

    /// Well-formed XML whose root is neither `urlset` nor `sitemapindex`
    UnknownRoot(String),
}

/// Parses sitemap XML, keeping at most `limit` `<url>` entries
///
/// `<url>` elements without a non-empty `<loc>` are dropped.
pub fn parse_sitemap_document(xml: &str, limit: usize) -> Result<SitemapDocument, XmlError> {
    let xml = xml.trim_start_matches('\u{feff}');
    let doc = Document::parse_with_options(
        xml,
        ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )
    .map_err(|e| XmlError::Malformed(e.to_string()))?;

    let root = doc.root_element();
    match root.tag_name().name() {
        "urlset" => {
            let mut entries = Vec::new();
            let mut truncated = false;
            for url_node in child_elements(root, "url") {
                let Some(loc) = child_text(url_node, "loc") else {
                    continue;
                };
                if entries.len() == limit {
                    truncated = true;
                    break;
                }
                entries.push(UrlEntry {
                    loc,
                    lastmod: child_text(url_node, "lastmod"),
                    changefreq: child_text(url_node, "changefreq"),
                    priority: child_text(url_node, "priority").and_then(|p| p.parse().ok()),
                });
            }
            Ok(SitemapDocument::UrlSet { entries, truncated })
        }
        "sitemapindex" => {
            let sitemaps = child_elements(root, "sitemap")
                .filter_map(|node| child_text(node, "loc"))
                .collect();
            Ok(SitemapDocument::Index { sitemaps })
        }
        other => Err(XmlError::UnknownRoot(other.to_string())),
    }
}

fn child_elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child_elements(node, name)
        .next()
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
