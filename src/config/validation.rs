use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > 100 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 100, got {}",
            config.workers
        )));
    }

    if config.idle_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "idle-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.read_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "read-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    // The seed must be an absolute http(s) URL with a host, since the root
    // origin for same-origin filtering is derived from it
    let url = Url::parse(&config.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.seed_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "seed-url must use http or https, got {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "seed-url has no host: {}",
            config.seed_url
        )));
    }

    if config.detail_path_fragment.is_empty() {
        return Err(ConfigError::Validation(
            "detail-path-fragment cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
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

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    // Validate contact URL parses
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.contact_url, e)))?;

    // Validate contact email has the minimal shape user@domain
    if !config.contact_email.contains('@') || config.contact_email.starts_with('@') {
        return Err(ConfigError::Validation(format!(
            "contact_email must be a valid email address, got '{}'",
            config.contact_email
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.export_path.is_empty() {
        return Err(ConfigError::Validation(
            "export-path cannot be empty".to_string(),
        ));
    }

    if config.failure_log_path.is_empty() {
        return Err(ConfigError::Validation(
            "failure-log-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            crawler: CrawlerConfig {
                workers: 5,
                idle_timeout_secs: 60,
                connect_timeout_secs: 3,
                read_timeout_secs: 30,
            },
            site: SiteConfig {
                seed_url: "https://www.goodreads.com/shelf/show/technology?page=1".to_string(),
                detail_path_fragment: "/book/show/".to_string(),
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestDredge".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            output: OutputConfig {
                export_path: "./export.csv".to_string(),
                failure_log_path: "./failures.log".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = valid_config();
        config.crawler.workers = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_too_many_workers_rejected() {
        let mut config = valid_config();
        config.crawler.workers = 500;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_relative_seed_rejected() {
        let mut config = valid_config();
        config.site.seed_url = "/shelf/show/technology".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_seed_rejected() {
        let mut config = valid_config();
        config.site.seed_url = "ftp://example.com/books".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_detail_fragment_rejected() {
        let mut config = valid_config();
        config.site.detail_path_fragment = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_crawler_name_with_spaces_rejected() {
        let mut config = valid_config();
        config.user_agent.crawler_name = "Test Dredge".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut config = valid_config();
        config.user_agent.contact_email = "not-an-email".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_export_path_rejected() {
        let mut config = valid_config();
        config.output.export_path = String::new();
        assert!(validate(&config).is_err());
    }
}
