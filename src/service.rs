//! Listing queries
//!
//! [`AwsRands`] composes fetch, extraction and formatting for one page kind.
//! It holds no mutable state, so one instance serves concurrent calls.

use crate::catalog::PageKind;
use crate::config::Config;
use crate::error::{Error, FetchError, Result};
use crate::extraction::{TableExtractor, TableResult};
use crate::fetch::PageFetcher;
use crate::format::TableFormatter;
use tracing::{info, instrument};

/// Query service for aws-services.info listings
#[derive(Debug, Clone)]
pub struct AwsRands {
    config: Config,
    fetcher: PageFetcher,
}

impl AwsRands {
    /// Create a service from configuration
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = PageFetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// URL a page kind is fetched from
    ///
    /// Fixed listings resolve against the base URL; detail pages require
    /// `url`, typically a link column taken from an earlier listing.
    pub fn resolve_url(&self, kind: PageKind, url: Option<&str>) -> Result<String> {
        match (kind.page(), url) {
            (Some(page), _) => Ok(self.config.page_url(page)),
            (None, Some(url)) if !url.trim().is_empty() => Ok(url.trim().to_string()),
            (None, _) => Err(Error::Fetch(FetchError::InvalidUrl(format!(
                "{:?} needs a page URL",
                kind
            )))),
        }
    }

    /// Fetch and extract a listing without formatting it
    #[instrument(skip(self))]
    pub async fn table(&self, kind: PageKind, url: Option<&str>) -> Result<TableResult> {
        let url = self.resolve_url(kind, url)?;
        let page = self.fetcher.fetch(&url).await?;
        let result = TableExtractor::extract(&page.html, &kind.schema(), &self.config.base_url)?;
        info!(rows = result.rows.len(), "Extracted {:?} listing", kind);
        Ok(result)
    }

    /// Fetch, extract and format a listing as tab-delimited text
    pub async fn query(&self, kind: PageKind, url: Option<&str>) -> Result<String> {
        let result = self.table(kind, url).await?;
        Ok(TableFormatter::format(&result, &kind.layout()))
    }
}
