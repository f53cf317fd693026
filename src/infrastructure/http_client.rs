//! HTTP client for fetching board and article pages
//!
//! The fetch collaborator of the extraction pipeline: a single GET per
//! page, no retry. Any non-success status or transport error surfaces as a
//! `FetchError`, and the caller decides whether the slot is skipped or
//! recorded as an error record.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use crate::infrastructure::config::ptt;

/// Errors from the fetch collaborator. Kept separate from parse-side
/// errors so a failed fetch stays distinguishable from malformed markup
/// downstream.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("HTTP request failed for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("empty response from {url}")]
    EmptyBody { url: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Configuration for HTTP client behavior
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// User agent string
    pub user_agent: String,

    /// Skip TLS certificate verification. Set once at construction; there
    /// is no process-wide verification toggle.
    pub danger_accept_invalid_certs: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 3,
            user_agent: "ptt-crawler/1.0".to_string(),
            danger_accept_invalid_certs: false,
        }
    }
}

/// HTTP client carrying the over-18 cookie PTT requires for gated boards.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
            .gzip(true)
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self { client, config })
    }

    /// Fetch the raw markup of a page.
    pub async fn fetch_html_string(&self, url: &str) -> Result<String, FetchError> {
        debug!(
            "HTTP GET: {} (timeout {}s)",
            url, self.config.timeout_seconds
        );

        let response = self
            .client
            .get(url)
            .header(reqwest::header::COOKIE, ptt::OVER18_COOKIE)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("HTTP error {}: {}", status, url);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        if body.is_empty() {
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }

        Ok(body)
    }
}
