//! Tab-delimited table rendering
//!
//! Output shape, every line newline-terminated:
//!
//! ```text
//! This information was last updated on: <updated_on>   (optional)
//! <subject line>                                       (optional)
//!                                                      (blank, only after annotations)
//! Header A<TAB>Header B
//! --------------------------------------------------
//! a1<TAB>b1
//! ```

use crate::extraction::TableResult;
use serde::{Deserialize, Serialize};

/// Width of the separator line under the header
pub const SEPARATOR_WIDTH: usize = 50;

/// Placeholder replaced by the subject name in a subject template
pub const SUBJECT_PLACEHOLDER: &str = "{subject}";

/// Presentation of one listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    /// Header labels, one per schema column
    pub headers: Vec<String>,
    /// Character repeated to form the separator line
    pub separator: char,
    /// Sentence introducing the page subject; `None` suppresses the subject line
    pub subject_template: Option<String>,
}

impl TableLayout {
    /// Layout with the given headers and separator and no subject line
    pub fn new<I, S>(headers: I, separator: char) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            separator,
            subject_template: None,
        }
    }

    /// Render the page subject with this sentence, `{subject}` being replaced
    pub fn with_subject_template(mut self, template: impl Into<String>) -> Self {
        self.subject_template = Some(template.into());
        self
    }
}

/// Renders extracted tables as tab-delimited text
pub struct TableFormatter;

impl TableFormatter {
    /// Format a table result with the given layout
    pub fn format(result: &TableResult, layout: &TableLayout) -> String {
        let mut annotations = Vec::new();
        if let Some(updated_on) = &result.updated_on {
            annotations.push(format!("This information was last updated on: {}", updated_on));
        }
        if let (Some(subject), Some(template)) = (&result.subject, &layout.subject_template) {
            annotations.push(template.replace(SUBJECT_PLACEHOLDER, subject));
        }

        let mut output = String::new();
        for line in &annotations {
            output.push_str(line);
            output.push('\n');
        }
        if !annotations.is_empty() {
            output.push('\n');
        }

        output.push_str(&layout.headers.join("\t"));
        output.push('\n');
        output.push_str(&Self::separator_line(layout.separator));
        output.push('\n');

        for row in &result.rows {
            output.push_str(&row.join("\t"));
            output.push('\n');
        }

        output
    }

    /// The line printed under the header
    pub fn separator_line(separator: char) -> String {
        std::iter::repeat(separator).take(SEPARATOR_WIDTH).collect()
    }
}
