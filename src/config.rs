//! Runtime configuration
//!
//! Defaults target the public aws-services.info site. Every value can be
//! overridden from the environment and then from the command line.
//!
//! # Environment Variables
//!
//! - `AWSRANDS_BASE_URL`: origin all listing pages are fetched from
//! - `AWSRANDS_USER_AGENT`: User-Agent header sent with every request
//! - `AWSRANDS_TIMEOUT_SECS`: optional request timeout in seconds

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;
use tracing::{debug, info};

/// Default origin of the scraped site
pub const DEFAULT_BASE_URL: &str = "https://www.aws-services.info/";

/// User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "rands-app/1.0";

const BASE_URL_ENV_VAR: &str = "AWSRANDS_BASE_URL";
const USER_AGENT_ENV_VAR: &str = "AWSRANDS_USER_AGENT";
const TIMEOUT_ENV_VAR: &str = "AWSRANDS_TIMEOUT_SECS";

/// Fetcher and catalog configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin the listing pages live under; always ends with `/`
    pub base_url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Request timeout; `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = env::var(BASE_URL_ENV_VAR) {
            config = config.with_base_url(base_url)?;
        }

        if let Ok(user_agent) = env::var(USER_AGENT_ENV_VAR) {
            config = config.with_user_agent(user_agent)?;
        }

        if let Ok(secs) = env::var(TIMEOUT_ENV_VAR) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                Error::config(format!("{} must be a whole number of seconds: {}", TIMEOUT_ENV_VAR, e))
            })?;
            config = config.with_timeout_secs(secs)?;
        }

        debug!(?config, "Loaded configuration from environment");
        Ok(config)
    }

    /// Replace the base URL, normalising it to end with `/`
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let mut base_url = base_url.into().trim().to_string();
        if base_url.is_empty() {
            return Err(Error::config("base URL cannot be empty"));
        }

        let parsed = url::Url::parse(&base_url)
            .map_err(|e| Error::config(format!("invalid base URL {}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base URL must be http or https, got {}",
                parsed.scheme()
            )));
        }

        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(Error::config(format!(
                "base URL cannot carry a query or fragment: {}",
                base_url
            )));
        }

        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        if base_url != DEFAULT_BASE_URL {
            info!("Using base URL {}", base_url);
        }
        self.base_url = base_url;
        Ok(self)
    }

    /// Replace the User-Agent header value
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Result<Self> {
        let user_agent = user_agent.into();
        if user_agent.trim().is_empty() {
            return Err(Error::config("user agent cannot be empty"));
        }
        self.user_agent = user_agent;
        Ok(self)
    }

    /// Set a request timeout in whole seconds
    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self> {
        if secs == 0 {
            return Err(Error::config("timeout cannot be 0 seconds"));
        }
        self.request_timeout = Some(Duration::from_secs(secs));
        Ok(self)
    }

    /// Resolve a page name against the base URL
    pub fn page_url(&self, page: &str) -> String {
        format!("{}{}", self.base_url, page)
    }
}
