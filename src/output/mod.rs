//! Output module for rendering analysis results
//!
//! This module handles:
//! - Serializing a [`CrawlabilityResult`] to JSON
//! - Generating human-readable markdown reports
//! - Writing either form to a file

mod markdown;

pub use markdown::{format_markdown_report, generate_markdown_report};

use crate::crawler::CrawlabilityResult;
use crate::AuditError;
use std::path::Path;

/// Report formats supported by [`render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Json,
    Markdown,
}

/// Serializes a result as pretty-printed JSON
pub fn to_json(result: &CrawlabilityResult) -> Result<String, AuditError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Renders a result in the requested format
pub fn render(result: &CrawlabilityResult, format: ReportFormat) -> Result<String, AuditError> {
    match format {
        ReportFormat::Json => to_json(result),
        ReportFormat::Markdown => Ok(format_markdown_report(result)),
    }
}

/// Renders a result and writes it to `path`
pub fn write_report(
    result: &CrawlabilityResult,
    format: ReportFormat,
    path: &Path,
) -> Result<(), AuditError> {
    match format {
        ReportFormat::Json => std::fs::write(path, to_json(result)?)?,
        ReportFormat::Markdown => generate_markdown_report(result, path)?,
    }
    Ok(())
}
