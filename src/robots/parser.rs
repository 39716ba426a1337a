//! Robots.txt directive parser
//!
//! Turns raw robots.txt text into per-agent rule blocks. Parsing never
//! fails: malformed lines are recorded in `errors` and skipped.

use crate::robots::types::{RobotsRule, RobotsTxtAnalysis};

/// Agent used when no specific agent is requested
pub const WILDCARD_AGENT: &str = "*";

/// Parses robots.txt content and selects rules for the wildcard agent
pub fn parse(content: &str) -> RobotsTxtAnalysis {
    parse_for_agent(content, WILDCARD_AGENT)
}

/// Parses robots.txt content and selects the rules that apply to `agent`
///
/// # Line handling
///
/// | Line | Action |
/// |------|--------|
/// | blank or `#` comment | skipped |
/// | no `:` separator | error, skipped |
/// | `User-agent` | closes the current block, opens a new one |
/// | `Disallow` / `Allow` / `Crawl-delay` outside a block | ignored |
/// | bad `Crawl-delay` value | error, value ignored |
/// | `Sitemap` | always recorded file-wide, also on the active block |
/// | anything else | unknown directive error, skipped |
///
/// # Example
///
/// ```
/// use crawl_audit::robots::parse_for_agent;
///
/// let analysis = parse_for_agent("User-agent: *\nDisallow: /private", "Googlebot");
/// assert!(analysis.is_valid);
/// assert_eq!(analysis.applicable_rules.disallow, vec!["/private".to_string()]);
/// ```
pub fn parse_for_agent(content: &str, agent: &str) -> RobotsTxtAnalysis {
    let mut errors = Vec::new();
    let mut rules = Vec::new();
    let mut sitemaps = Vec::new();
    let mut current: Option<RobotsRule> = None;

    let body = content.strip_prefix('\u{feff}').unwrap_or(content);
    for (index, raw_line) in body.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((directive, value)) = line.split_once(':') else {
            errors.push(format!(
                "Line {}: invalid line format (missing ':'): {}",
                line_number, line
            ));
            continue;
        };

        let directive = directive.trim().to_lowercase();
        let value = strip_inline_comment(value);

        match directive.as_str() {
            "user-agent" => {
                if let Some(finished) = current.take() {
                    rules.push(finished);
                }
                current = Some(RobotsRule::new(value));
            }
            "disallow" => {
                if let Some(rule) = current.as_mut() {
                    rule.disallow.push(value.to_string());
                }
            }
            "allow" => {
                if let Some(rule) = current.as_mut() {
                    rule.allow.push(value.to_string());
                }
            }
            "crawl-delay" => match parse_crawl_delay(value) {
                Some(delay) => {
                    if let Some(rule) = current.as_mut() {
                        rule.crawl_delay = Some(delay);
                    }
                }
                None => errors.push(format!(
                    "Line {}: invalid crawl-delay value '{}'",
                    line_number, value
                )),
            },
            "sitemap" => {
                sitemaps.push(value.to_string());
                if let Some(rule) = current.as_mut() {
                    rule.sitemap.push(value.to_string());
                }
            }
            other => errors.push(format!(
                "Line {}: unknown directive '{}'",
                line_number, other
            )),
        }
    }

    if let Some(finished) = current.take() {
        rules.push(finished);
    }

    let applicable_rules = select_rules(&rules, agent);

    RobotsTxtAnalysis {
        exists: true,
        content: content.to_string(),
        is_valid: errors.is_empty(),
        errors,
        rules,
        sitemaps,
        applicable_rules,
    }
}

/// Selects the rule block for an agent
///
/// An exact, case-sensitive match on the block's agent wins; otherwise the
/// `*` block is used; otherwise an empty rule set is returned.
pub fn select_rules(rules: &[RobotsRule], agent: &str) -> RobotsRule {
    rules
        .iter()
        .find(|rule| rule.user_agent == agent)
        .or_else(|| rules.iter().find(|rule| rule.user_agent == WILDCARD_AGENT))
        .cloned()
        .unwrap_or_else(|| RobotsRule::new(agent))
}

fn strip_inline_comment(value: &str) -> &str {
    match value.find('#') {
        Some(pos) => value[..pos].trim(),
        None => value.trim(),
    }
}

fn parse_crawl_delay(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|delay| delay.is_finite() && *delay >= 0.0)
}
