use crate::config::types::{Config, EngineConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_engine_config(&config.engine)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates engine limits
fn validate_engine_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 || config.request_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 120, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_sitemap_depth < 1 || config.max_sitemap_depth > 64 {
        return Err(ConfigError::Validation(format!(
            "max_sitemap_depth must be between 1 and 64, got {}",
            config.max_sitemap_depth
        )));
    }

    if config.max_urls_per_sitemap < 1 {
        return Err(ConfigError::Validation(format!(
            "max_urls_per_sitemap must be >= 1, got {}",
            config.max_urls_per_sitemap
        )));
    }

    if config.max_total_urls < config.max_urls_per_sitemap {
        return Err(ConfigError::Validation(format!(
            "max_total_urls ({}) must be >= max_urls_per_sitemap ({})",
            config.max_total_urls, config.max_urls_per_sitemap
        )));
    }

    if config.evaluation_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "evaluation_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}
