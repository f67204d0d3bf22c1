//! Page fetching
//!
//! One `GET` per call with a fixed User-Agent. No caching and no retries;
//! transport and status failures are returned to the caller as-is.

use crate::config::Config;
use crate::error::FetchError;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Raw HTML fetched from one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// URL the page was requested from
    pub url: String,
    /// Response body
    pub html: String,
}

/// HTTP page fetcher
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Create a fetcher from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| FetchError::Transport {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;

        Ok(Self { client })
    }

    /// Fetch a page
    ///
    /// Dropping the returned future aborts the in-flight request.
    ///
    /// # Errors
    ///
    /// * `FetchError::InvalidUrl` - malformed URL or non-http(s) scheme
    /// * `FetchError::Transport` - network failure or unreadable body
    /// * `FetchError::Timeout` - configured timeout elapsed
    /// * `FetchError::HttpStatus` - 4xx/5xx response
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        let parsed = validate_url(url)?;

        debug!("Sending GET request");
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, url))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            warn!(status = status.as_u16(), "Upstream returned an error status");
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, url))?;

        info!("Fetched page ({} bytes)", html.len());
        Ok(Page {
            url: url.to_string(),
            html,
        })
    }
}

fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            url, scheme
        ))),
    }
}

fn map_reqwest_error(error: reqwest::Error, url: &str) -> FetchError {
    if error.is_timeout() {
        return FetchError::Timeout {
            url: url.to_string(),
        };
    }
    FetchError::Transport {
        url: url.to_string(),
        message: error.to_string(),
    }
}
