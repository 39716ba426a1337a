//! Robots.txt pattern matching
//!
//! Patterns use `*` for "any sequence of characters" and a trailing `$` to
//! anchor the end of the path. Everything else is literal. A pattern matches
//! when the path starts with it.

use crate::robots::types::RobotsRule;
use regex::RegexBuilder;

/// Upper bound on the compiled size of a translated pattern
const PATTERN_SIZE_LIMIT: usize = 1 << 16;

/// Returns true if `path` is matched by a robots.txt `pattern`
///
/// Any pattern that cannot be translated is treated as not matching.
///
/// # Examples
///
/// ```
/// use crawl_audit::robots::is_blocked;
///
/// assert!(is_blocked("/", "/anything"));
/// assert!(is_blocked("/private", "/private/page"));
/// assert!(is_blocked("/*.pdf$", "/docs/report.pdf"));
/// assert!(!is_blocked("/x$", "/x/y"));
/// ```
pub fn is_blocked(pattern: &str, path: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    if pattern == "/" {
        return true;
    }

    let (body, anchored) = match pattern.strip_suffix('$') {
        Some(body) => (body, true),
        None => (pattern, false),
    };

    let mut expression = String::with_capacity(body.len() + 8);
    expression.push('^');
    let translated: Vec<String> = body
        .split('*')
        .map(|piece| regex::escape(&percent_encode_non_ascii(piece)))
        .collect();
    expression.push_str(&translated.join(".*"));
    if anchored {
        expression.push('$');
    }

    match RegexBuilder::new(&expression)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => regex.is_match(path),
        Err(e) => {
            tracing::warn!("Ignoring untranslatable robots.txt pattern {:?}: {}", pattern, e);
            false
        }
    }
}

/// Percent-encodes non-ASCII characters so a pattern compares with URL paths
///
/// Paths reach the matcher in their percent-encoded form, while robots.txt
/// authors often write raw UTF-8.
fn percent_encode_non_ascii(piece: &str) -> String {
    let mut encoded = String::with_capacity(piece.len());
    let mut buf = [0u8; 4];
    for c in piece.chars() {
        if c.is_ascii() {
            encoded.push(c);
        } else {
            encoded.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    encoded
}

/// Returns true if `path` is disallowed by a rule block
///
/// The longest matching `Disallow` pattern is compared with the longest
/// matching `Allow` pattern; `Allow` wins ties.
pub fn is_path_blocked(rule: &RobotsRule, path: &str) -> bool {
    let longest_match = |patterns: &[String]| {
        patterns
            .iter()
            .filter(|pattern| is_blocked(pattern, path))
            .map(String::len)
            .max()
    };

    match (longest_match(&rule.disallow), longest_match(&rule.allow)) {
        (Some(disallow), Some(allow)) => disallow > allow,
        (Some(_), None) => true,
        (None, _) => false,
    }
}
