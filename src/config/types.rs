use serde::Deserialize;

/// Main configuration structure for Bookdredge
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent fetch workers
    pub workers: u32,

    /// How long the supervisor waits on an empty frontier before declaring
    /// the crawl finished (seconds)
    #[serde(rename = "idle-timeout-secs", default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// HTTP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// HTTP read timeout (seconds)
    #[serde(rename = "read-timeout-secs", default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

fn default_idle_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    3
}

fn default_read_timeout() -> u64 {
    30
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Absolute URL the crawl starts from; its scheme and host define the
    /// root origin that discovered links are filtered against
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Path fragment that marks a URL as a detail page (substring test)
    #[serde(rename = "detail-path-fragment", default = "default_detail_fragment")]
    pub detail_path_fragment: String,
}

fn default_detail_fragment() -> String {
    "/book/show/".to_string()
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV export file
    #[serde(rename = "export-path")]
    pub export_path: String,

    /// Path to the append-only failure log
    #[serde(rename = "failure-log-path")]
    pub failure_log_path: String,
}
