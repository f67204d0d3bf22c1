//! Data table extraction
//!
//! Every listing page on the site carries exactly one `<table class="table
//! table-striped">` whose first row is a header. The extractor locates it,
//! drops the header and maps each data row through a column schema.

use super::{annotations, selector};
use crate::error::ExtractionError;
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Class attribute identifying the data table
pub const DATA_TABLE_CLASS: &str = "table table-striped";

/// Value substituted for cells with no visible text
pub const NA: &str = "NA";

/// One output field, derived from one cell of a data row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "cell")]
pub enum Column {
    /// Trimmed visible text of the cell, `NA` when empty
    Text(usize),
    /// `base_url + href` of the cell's first anchor, `base_url` without one
    Link(usize),
}

impl Column {
    /// Cell index this column reads from
    pub fn cell(&self) -> usize {
        match self {
            Column::Text(cell) | Column::Link(cell) => *cell,
        }
    }
}

/// Ordered column extractors shared by every row of a table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    /// Build a schema from explicit columns
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Schema of `count` plain-text columns over cells `0..count`
    pub fn plain(count: usize) -> Self {
        Self::new((0..count).map(Column::Text).collect())
    }

    /// Columns in output order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of fields every produced row has
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema declares no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Minimum number of cells a data row must carry
    pub fn required_cells(&self) -> usize {
        self.columns.iter().map(|c| c.cell() + 1).max().unwrap_or(0)
    }
}

/// One extracted row; always exactly as long as its schema
pub type Row = Vec<String>;

/// Extracted table with its page annotations
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableResult {
    /// Free text following the page's "Updated on:" marker
    pub updated_on: Option<String>,
    /// Name of the service or region the page is about
    pub subject: Option<String>,
    /// Data rows, header excluded, in document order
    pub rows: Vec<Row>,
}

/// Extracts the data table from a listing page
pub struct TableExtractor;

impl TableExtractor {
    /// Extract the data table and annotations from page HTML
    ///
    /// # Errors
    ///
    /// * `ExtractionError::TableNotFound` - no `table.table.table-striped` on the page
    /// * `ExtractionError::RowShape` - a data row has fewer cells than `schema` reads
    #[instrument(skip(html, schema), fields(columns = schema.len()))]
    pub fn extract(
        html: &str,
        schema: &ColumnSchema,
        base_url: &str,
    ) -> Result<TableResult, ExtractionError> {
        let document = Html::parse_document(html);

        let table = Self::find_data_table(&document)?;
        let rows = Self::extract_rows(table, schema, base_url)?;
        debug!("Extracted {} rows", rows.len());

        Ok(TableResult {
            updated_on: annotations::updated_on(&document)?,
            subject: annotations::subject(&document)?,
            rows,
        })
    }

    fn find_data_table(document: &Html) -> Result<ElementRef<'_>, ExtractionError> {
        let table_sel = selector("table")?;
        document
            .select(&table_sel)
            .find(|t| t.value().attr("class") == Some(DATA_TABLE_CLASS))
            .ok_or_else(|| ExtractionError::TableNotFound {
                class: DATA_TABLE_CLASS.to_string(),
            })
    }

    fn extract_rows(
        table: ElementRef<'_>,
        schema: &ColumnSchema,
        base_url: &str,
    ) -> Result<Vec<Row>, ExtractionError> {
        let row_sel = selector("tr")?;
        let cell_sel = selector("td")?;
        let anchor_sel = selector("a")?;
        let required = schema.required_cells();

        table
            .select(&row_sel)
            .skip(1)
            .enumerate()
            .map(|(index, row)| {
                let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
                if cells.len() < required {
                    return Err(ExtractionError::RowShape {
                        row: index,
                        expected: required,
                        found: cells.len(),
                    });
                }

                Ok(schema
                    .columns()
                    .iter()
                    .map(|column| match *column {
                        Column::Text(cell) => cell_text(cells[cell]),
                        Column::Link(cell) => cell_link(cells[cell], &anchor_sel, base_url),
                    })
                    .collect())
            })
            .collect()
    }
}

/// Trimmed visible text of an element
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let text = element_text(cell);
    if text.is_empty() {
        NA.to_string()
    } else {
        text
    }
}

fn cell_link(cell: ElementRef<'_>, anchor_sel: &scraper::Selector, base_url: &str) -> String {
    cell.select(anchor_sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(|href| format!("{}{}", base_url, href))
        .unwrap_or_else(|| base_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.test/";

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body>
            <table class="table table-striped">
                <tr><th>Name</th><th>Count</th></tr>
                {}
            </table>
            </body></html>"#,
            rows
        )
    }

    #[test]
    fn test_extract_plain_rows() {
        let html = page("<tr><td> x </td><td>1</td></tr><tr><td>y</td><td>2</td></tr>");
        let result = TableExtractor::extract(&html, &ColumnSchema::plain(2), BASE).unwrap();
        assert_eq!(result.rows, vec![vec!["x", "1"], vec!["y", "2"]]);
        assert!(result.updated_on.is_none());
        assert!(result.subject.is_none());
    }

    #[test]
    fn test_whitespace_cell_becomes_na() {
        let html = page("<tr><td>  \n\t </td><td>2</td></tr>");
        let result = TableExtractor::extract(&html, &ColumnSchema::plain(2), BASE).unwrap();
        assert_eq!(result.rows, vec![vec!["NA", "2"]]);
    }

    #[test]
    fn test_link_column_resolves_href() {
        let html = page(
            r#"<tr><td><a href="svc.html">Amazon S3</a></td><td>33</td></tr>
               <tr><td>No Link</td><td>1</td></tr>"#,
        );
        let schema = ColumnSchema::new(vec![Column::Text(0), Column::Link(0), Column::Text(1)]);
        let result = TableExtractor::extract(&html, &schema, BASE).unwrap();
        assert_eq!(
            result.rows,
            vec![
                vec!["Amazon S3", "https://example.test/svc.html", "33"],
                vec!["No Link", "https://example.test/", "1"],
            ]
        );
    }

    #[test]
    fn test_link_column_without_href_falls_back_to_base() {
        let html = page(r#"<tr><td><a name="anchor">S3</a></td><td>1</td></tr>"#);
        let schema = ColumnSchema::new(vec![Column::Link(0)]);
        let result = TableExtractor::extract(&html, &schema, BASE).unwrap();
        assert_eq!(result.rows, vec![vec![BASE]]);
    }

    #[test]
    fn test_link_field_can_follow_other_columns() {
        let html = page(r#"<tr><td><a href="af-south-1.html">Cape Town</a></td><td>af-south-1</td><td>150</td></tr>"#);
        let schema = ColumnSchema::new(vec![
            Column::Text(0),
            Column::Text(1),
            Column::Link(0),
            Column::Text(2),
        ]);
        let result = TableExtractor::extract(&html, &schema, BASE).unwrap();
        assert_eq!(
            result.rows[0],
            vec![
                "Cape Town",
                "af-south-1",
                "https://example.test/af-south-1.html",
                "150"
            ]
        );
    }

    #[test]
    fn test_missing_table() {
        let html = "<html><body><table class=\"table\"><tr><td>x</td></tr></table></body></html>";
        let err = TableExtractor::extract(html, &ColumnSchema::plain(1), BASE).unwrap_err();
        assert!(matches!(err, ExtractionError::TableNotFound { .. }));
    }

    #[test]
    fn test_class_must_match_exactly() {
        let html = "<table class=\"table table-striped table-hover\"><tr><th>h</th></tr></table>";
        let err = TableExtractor::extract(html, &ColumnSchema::plain(1), BASE).unwrap_err();
        assert!(matches!(err, ExtractionError::TableNotFound { .. }));
    }

    #[test]
    fn test_short_row_is_an_error() {
        let html = page("<tr><td>x</td><td>1</td></tr><tr><td>only one</td></tr>");
        let err = TableExtractor::extract(&html, &ColumnSchema::plain(2), BASE).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::RowShape {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_extra_cells_are_ignored() {
        let html = page("<tr><td>x</td><td>1</td><td>extra</td></tr>");
        let result = TableExtractor::extract(&html, &ColumnSchema::plain(2), BASE).unwrap();
        assert_eq!(result.rows, vec![vec!["x", "1"]]);
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let result = TableExtractor::extract(&page(""), &ColumnSchema::plain(2), BASE).unwrap();
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_first_matching_table_wins() {
        let html = r#"
            <table class="table table-striped"><tr><th>h</th></tr><tr><td>first</td></tr></table>
            <table class="table table-striped"><tr><th>h</th></tr><tr><td>second</td></tr></table>"#;
        let result = TableExtractor::extract(html, &ColumnSchema::plain(1), BASE).unwrap();
        assert_eq!(result.rows, vec![vec!["first"]]);
    }

    #[test]
    fn test_schema_required_cells() {
        let schema = ColumnSchema::new(vec![Column::Text(0), Column::Link(0), Column::Text(3)]);
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.required_cells(), 4);
        assert_eq!(ColumnSchema::default().required_cells(), 0);
        assert!(ColumnSchema::default().is_empty());
    }
}
