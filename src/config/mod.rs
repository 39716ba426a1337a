//! Configuration module for Crawl-Audit
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the reference
//! engine limits.
//!
//! # Example
//!
//! ```no_run
//! use crawl_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl-audit.toml")).unwrap();
//! println!("Sitemap depth limit: {}", config.engine.max_sitemap_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, EngineConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
