//! Error types for awsrands
//!
//! This module provides the error hierarchy used across the fetcher, the
//! table extractor and the MCP layer, built with `thiserror`.

use thiserror::Error;

/// The main error type for awsrands operations
#[derive(Error, Debug)]
pub enum Error {
    /// Page fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Table extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// MCP protocol errors
    #[error("MCP error: {0}")]
    Mcp(#[from] McpError),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while fetching a page
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL could not be parsed or uses an unsupported scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network unreachable, connection reset, body read failure
    #[error("Transport error for {url}: {message}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying transport message
        message: String,
    },

    /// The configured request timeout elapsed
    #[error("Request to {url} timed out")]
    Timeout {
        /// Requested URL
        url: String,
    },

    /// Non-success HTTP status
    #[error("HTTP error {status} for {url}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },
}

/// Errors raised while extracting the data table from a page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The page no longer carries the expected data table
    #[error("expected data table not found (table.{class})")]
    TableNotFound {
        /// Class attribute that was searched for
        class: String,
    },

    /// A data row has fewer cells than the column schema requires
    #[error("row {row} has {found} cells, expected at least {expected}")]
    RowShape {
        /// Zero-based data row index (header excluded)
        row: usize,
        /// Cells required by the schema
        expected: usize,
        /// Cells present in the row
        found: usize,
    },

    /// Invalid selector
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    /// Invalid parameters
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Tool not found
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Prompt not found
    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
}

impl McpError {
    /// JSON-RPC error code for this error
    pub fn code(&self) -> i32 {
        match self {
            McpError::InvalidParams(_)
            | McpError::ToolNotFound(_)
            | McpError::PromptNotFound(_) => -32602,
            McpError::ResourceNotFound(_) => -32002,
        }
    }
}

/// Result type alias for awsrands operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error from a string
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
}
