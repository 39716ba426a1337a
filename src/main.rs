//! Crawl-Audit main entry point
//!
//! This is the command-line interface for the Crawl-Audit crawlability analyzer.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crawl_audit::config::{load_config_with_hash, validate, Config};
use crawl_audit::output::{render, write_report, ReportFormat};
use crawl_audit::{Analyzer, AuditError, CrawlabilityResult};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Crawl-Audit: checks whether search engines can crawl and index a site
///
/// Crawl-Audit reads the site's robots.txt, walks every sitemap it declares,
/// inspects the page for indexing directives, and reports a 0-100
/// crawlability score with recommendations.
#[derive(Parser, Debug)]
#[command(name = "crawl-audit")]
#[command(version = "1.0.0")]
#[command(about = "Crawlability analysis for websites", long_about = None)]
struct Cli {
    /// URL of the site to analyze
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Crawler name to evaluate robots.txt rules for (overrides config)
    #[arg(short, long, value_name = "NAME")]
    agent: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Markdown,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => ReportFormat::Json,
            Format::Markdown => ReportFormat::Markdown,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        None => Config::default(),
    };

    if let Some(agent) = cli.agent {
        config.engine.evaluation_agent = agent;
        validate(&config).context("Invalid --agent value")?;
    }

    let analyzer = Analyzer::new(config).context("Failed to build HTTP client")?;

    let result = match analyzer
        .analyze_until(&cli.url, shutdown_signal())
        .await
    {
        Ok(result) => result,
        Err(AuditError::Cancelled { url }) => {
            anyhow::bail!("Analysis of {} interrupted", url);
        }
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            CrawlabilityResult::undetermined(&cli.url, e.to_string())
        }
    };

    let format = ReportFormat::from(cli.format);
    match &cli.output {
        Some(path) => {
            write_report(&result, format, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            let report = render(&result, format).context("Failed to render report")?;
            println!("{}", report);
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawl_audit=info,warn"),
            1 => EnvFilter::new("crawl_audit=debug,info"),
            2 => EnvFilter::new("crawl_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
