//! Page annotations printed above the data table
//!
//! Both annotations are optional; a page without them is still valid.

use super::selector;
use super::table::element_text;
use crate::error::ExtractionError;
use scraper::{ElementRef, Html};

/// Bold label preceding the last-updated text
pub const UPDATED_ON_MARKER: &str = "Updated on:";

/// Text following `<b>Updated on:</b>` inside the first paragraph carrying it
///
/// ```html
/// <p><b>Updated on:</b> 2025-05-01 10:00 UTC</p>
/// ```
pub fn updated_on(document: &Html) -> Result<Option<String>, ExtractionError> {
    let paragraph_sel = selector("p")?;
    let bold_sel = selector("b, strong")?;

    for paragraph in document.select(&paragraph_sel) {
        let Some(marker) = paragraph.select(&bold_sel).next() else {
            continue;
        };
        if element_text(marker) != UPDATED_ON_MARKER {
            continue;
        }
        if let Some(text) = following_text(marker) {
            return Ok(Some(text));
        }
    }

    Ok(None)
}

/// Trimmed text of the first `<font color="green">` element
///
/// Service and region detail pages print the name they describe this way.
pub fn subject(document: &Html) -> Result<Option<String>, ExtractionError> {
    let green_sel = selector(r#"font[color="green"]"#)?;

    Ok(document
        .select(&green_sel)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty()))
}

fn following_text(marker: ElementRef<'_>) -> Option<String> {
    let sibling = marker
        .next_siblings()
        .find(|node| !node.value().is_comment())?;

    if let Some(text) = sibling.value().as_text() {
        return Some(text.trim().to_string());
    }
    ElementRef::wrap(sibling).map(element_text)
}
