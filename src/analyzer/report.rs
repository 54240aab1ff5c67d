// src/analyzer/report.rs
// =============================================================================
// The data an analysis produces.
//
// A report is created fresh for every analysis. The tree walker fills in the
// structural fields, the prober fills in `inaccessible_link_count`, and then
// the whole thing is handed to the caller.
// =============================================================================

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The markup standard a page declares in its doctype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Dialect {
    #[serde(rename = "HTML5")]
    Html5,
    #[serde(rename = "HTML4.01")]
    Html401,
    #[serde(rename = "XHTML1.0-Strict")]
    Xhtml10Strict,
    #[serde(rename = "XHTML1.0-Transitional")]
    Xhtml10Transitional,
    #[serde(rename = "XHTML1.1")]
    Xhtml11,
    #[default]
    Unknown,
}

impl Dialect {
    pub fn label(self) -> &'static str {
        match self {
            Dialect::Html5 => "HTML5",
            Dialect::Html401 => "HTML4.01",
            Dialect::Xhtml10Strict => "XHTML1.0-Strict",
            Dialect::Xhtml10Transitional => "XHTML1.0-Transitional",
            Dialect::Xhtml11 => "XHTML1.1",
            Dialect::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything we learned about one page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub dialect: Dialect,
    /// First non-empty <title>, or "" if the page has none
    pub title: String,
    /// "h1".."h6" -> number of occurrences; levels that never appear are absent
    pub heading_counts: BTreeMap<String, usize>,
    pub internal_link_count: usize,
    /// Distinct external hrefs, in the order they first appear
    pub external_links: Vec<String>,
    pub external_link_count: usize,
    pub inaccessible_link_count: usize,
    pub has_login_form: bool,
    /// Empty unless fetching or parsing failed
    pub error_message: String,
}

impl AnalysisReport {
    pub fn new() -> Self {
        Self::default()
    }

    // A report for an analysis that never got as far as a document tree.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error_message.is_empty()
    }

    pub(crate) fn push_external_link(&mut self, link: String) {
        self.external_links.push(link);
        self.external_link_count = self.external_links.len();
    }

    pub(crate) fn count_heading(&mut self, level: &str) {
        *self.heading_counts.entry(level.to_string()).or_insert(0) += 1;
    }
}
