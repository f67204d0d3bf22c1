//! awsrands - AWS service and region availability over MCP
//!
//! This crate provides an MCP (Model Context Protocol) stdio server that
//! answers questions about where AWS services run by scraping the listing
//! pages of aws-services.info and returning their tables as tab-delimited
//! text.
//!
//! # Architecture
//!
//! ```text
//! AI Agent ──▶ MCP Server ──▶ Tool ──▶ AwsRands::query(PageKind)
//!                                          │
//!                    ┌─────────────────────┼─────────────────────┐
//!                    ▼                     ▼                     ▼
//!              PageFetcher          TableExtractor         TableFormatter
//!             (GET + UA)         (table.table-striped)     (tab-delimited)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use awsrands::{AwsRands, Config, PageKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = AwsRands::new(Config::default())?;
//!     let regions = service.query(PageKind::Regions, None).await?;
//!     println!("{}", regions);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod format;
pub mod mcp;
pub mod service;

// Re-exports for convenience
pub use catalog::PageKind;
pub use config::Config;
pub use error::{Error, Result};
pub use extraction::{Column, ColumnSchema, TableExtractor, TableResult};
pub use fetch::{Page, PageFetcher};
pub use format::{TableFormatter, TableLayout};
pub use mcp::{McpServer, McpTool};
pub use service::AwsRands;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
