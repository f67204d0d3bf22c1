//! Table extraction module
//!
//! Turns a listing page into a [`TableResult`]: the rows of its single data
//! table shaped by a [`ColumnSchema`], plus the optional "Updated on:" and
//! subject annotations the site prints above the table.

pub mod annotations;
pub mod table;

pub use table::{Column, ColumnSchema, Row, TableExtractor, TableResult, DATA_TABLE_CLASS, NA};

use crate::error::ExtractionError;
use scraper::Selector;

/// Parse a CSS selector, surfacing failures as extraction errors
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::InvalidSelector(format!("{}: {}", css, e)))
}
