//! Markdown report generation
//!
//! This module renders a crawlability result as a human-readable markdown
//! document with sections for the score, robots.txt, indexability and
//! sitemaps.

use crate::crawler::CrawlabilityResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Most sitemap page URLs listed in a report
const MAX_LISTED_URLS: usize = 25;

/// Writes a markdown report for `result` to `output_path`
pub fn generate_markdown_report(result: &CrawlabilityResult, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_markdown_report(result);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawlability result as markdown
pub fn format_markdown_report(result: &CrawlabilityResult) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# Crawlability Report\n\n");

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **URL**: {}\n", result.url));
    md.push_str(&format!(
        "- **Analyzed**: {}\n",
        result.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "- **Crawlability Score**: {}/100\n",
        result.crawlability_score
    ));
    md.push_str(&format!(
        "- **Indexable**: {}\n",
        yes_no(result.overall_indexable)
    ));
    if let Some(error) = &result.error {
        md.push_str(&format!("- **Error**: {}\n", error));
    }
    md.push('\n');

    if !result.recommendations.is_empty() {
        md.push_str("## Recommendations\n\n");
        for (i, recommendation) in result.recommendations.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, recommendation));
        }
        md.push('\n');
    }

    // robots.txt
    let robots = &result.robots_txt;
    md.push_str("## robots.txt\n\n");
    md.push_str(&format!("- **Exists**: {}\n", yes_no(robots.exists)));
    if robots.exists {
        md.push_str(&format!("- **Valid**: {}\n", yes_no(robots.is_valid)));
        md.push_str(&format!("- **Rule Blocks**: {}\n", robots.rules.len()));
        md.push_str(&format!(
            "- **Applicable Agent**: `{}`\n",
            robots.applicable_rules.user_agent
        ));
        if let Some(delay) = robots.applicable_rules.crawl_delay {
            md.push_str(&format!("- **Crawl Delay**: {}s\n", delay));
        }
    }
    md.push('\n');

    if !robots.rules.is_empty() {
        md.push_str("| User Agent | Disallow | Allow |\n");
        md.push_str("|------------|----------|-------|\n");
        for rule in &robots.rules {
            md.push_str(&format!(
                "| `{}` | {} | {} |\n",
                rule.user_agent,
                rule.disallow.len(),
                rule.allow.len()
            ));
        }
        md.push('\n');
    }

    if !robots.errors.is_empty() {
        md.push_str("### robots.txt Issues\n\n");
        for error in &robots.errors {
            md.push_str(&format!("- {}\n", error));
        }
        md.push('\n');
    }

    // Indexability
    let page = &result.indexability;
    md.push_str("## Indexability\n\n");
    md.push_str(&format!("- **Page**: {}\n", page.url));
    md.push_str(&format!("- **Indexable**: {}\n", yes_no(page.is_indexable)));
    md.push_str(&format!(
        "- **Canonical**: {}\n\n",
        page.canonical_url.as_deref().unwrap_or("(none)")
    ));

    md.push_str("| Signal | Blocking |\n");
    md.push_str("|--------|----------|\n");
    md.push_str(&format!(
        "| robots.txt | {} |\n",
        yes_no(page.blocking_factors.robots_txt)
    ));
    md.push_str(&format!(
        "| meta robots (noindex) | {} |\n",
        yes_no(page.blocking_factors.meta_robots)
    ));
    md.push_str(&format!(
        "| nofollow | {} |\n",
        yes_no(page.blocking_factors.nofollow)
    ));
    md.push_str(&format!(
        "| canonical | {} |\n\n",
        yes_no(page.blocking_factors.canonical)
    ));

    // Sitemaps
    let sitemaps = &result.sitemaps;
    md.push_str("## Sitemaps\n\n");
    md.push_str(&format!("- **Declared**: {}\n", sitemaps.discovered.len()));
    md.push_str(&format!("- **Visited**: {}\n", sitemaps.sitemaps.len()));
    md.push_str(&format!("- **Valid**: {}\n", sitemaps.valid.len()));
    md.push_str(&format!("- **Invalid**: {}\n", sitemaps.invalid.len()));
    md.push_str(&format!("- **Page URLs**: {}\n\n", sitemaps.urls.len()));

    if !sitemaps.sitemaps.is_empty() {
        md.push_str("| Sitemap | Depth | State | Entries | Error |\n");
        md.push_str("|---------|-------|-------|---------|-------|\n");
        for detail in &sitemaps.sitemaps {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                detail.url,
                detail.depth,
                detail.state,
                detail.urls.len(),
                detail.error.as_deref().unwrap_or("")
            ));
        }
        md.push('\n');
    }

    if !sitemaps.urls.is_empty() {
        md.push_str("### Sample URLs\n\n");
        for entry in sitemaps.urls.iter().take(MAX_LISTED_URLS) {
            md.push_str(&format!("- {}\n", entry.loc));
        }
        if sitemaps.urls.len() > MAX_LISTED_URLS {
            md.push_str(&format!(
                "- ... and {} more\n",
                sitemaps.urls.len() - MAX_LISTED_URLS
            ));
        }
        md.push('\n');
    }

    if !sitemaps.errors.is_empty() {
        md.push_str("### Sitemap Issues\n\n");
        for error in &sitemaps.errors {
            md.push_str(&format!("- {}\n", error));
        }
        md.push('\n');
    }

    md
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
