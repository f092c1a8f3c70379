//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with a proper user agent string
//! - GET requests to fetch page content
//! - Redirect following (the final URL drives page classification)
//! - Error classification into the crawl's failure taxonomy

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of one fetch attempt
///
/// Everything short of `Success` is recovered locally by dropping the task;
/// the crawl is best-effort and a lost page is a log line, not an error.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A 2xx response with a body
    Success {
        /// Final URL after redirects; classification depends on this, not
        /// the URL that was requested
        final_url: Url,
        /// HTTP status code
        status: u16,
        /// Page body content
        body: String,
    },

    /// A non-2xx response
    HttpError {
        /// The HTTP status code
        status: u16,
    },

    /// Timeout, connection failure, or another transport-level error
    TransportError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by all workers
///
/// The user agent is formatted as `CrawlerName/Version (+ContactURL; ContactEmail)`.
/// Redirects are followed by reqwest; the response reports the final URL.
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(crawler.read_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs one GET and classifies the result
pub async fn fetch_url(client: &Client, url: &Url) -> FetchOutcome {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().clone();

            if !status.is_success() {
                return FetchOutcome::HttpError {
                    status: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success {
                    final_url,
                    status: status.as_u16(),
                    body,
                },
                Err(e) => FetchOutcome::TransportError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchOutcome::TransportError {
                    error: format!("Request timeout for {}", url),
                }
            } else if e.is_connect() {
                FetchOutcome::TransportError {
                    error: format!("Connection failed for {}", url),
                }
            } else {
                FetchOutcome::TransportError {
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> (CrawlerConfig, UserAgentConfig) {
        (
            CrawlerConfig {
                workers: 5,
                idle_timeout_secs: 60,
                connect_timeout_secs: 3,
                read_timeout_secs: 30,
            },
            UserAgentConfig {
                crawler_name: "TestDredge".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
        )
    }

    #[test]
    fn test_build_http_client() {
        let (crawler, user_agent) = create_test_config();
        let client = build_http_client(&crawler, &user_agent);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_connection_failure_is_transport_error() {
        let (crawler, user_agent) = create_test_config();
        let client = build_http_client(&crawler, &user_agent).unwrap();

        // Nothing listens on this port
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        match fetch_url(&client, &url).await {
            FetchOutcome::TransportError { .. } => {}
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
