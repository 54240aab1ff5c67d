// src/analyzer/dialect.rs
// =============================================================================
// Works out which markup standard a page claims to follow by looking at its
// doctype. This is a plain string inspection of the raw body (before any
// parsing), case-insensitive and ignoring leading/trailing whitespace.
// =============================================================================

use super::report::Dialect;

// Public identifiers, lower-cased, quotes included so that e.g. the 4.01
// identifier doesn't also match "html 4.01 transitional"
const HTML_401_STRICT: &str = r#""-//w3c//dtd html 4.01//en""#;
const XHTML_10_STRICT: &str = r#""-//w3c//dtd xhtml 1.0 strict//en""#;
const XHTML_10_TRANSITIONAL: &str = r#""-//w3c//dtd xhtml 1.0 transitional//en""#;
const XHTML_11: &str = r#""-//w3c//dtd xhtml 1.1//en""#;

// Rules are checked in order and the first match wins
pub fn detect_dialect(markup: &str) -> Dialect {
    let content = markup.trim().to_lowercase();

    if content.starts_with("<!doctype html>") {
        Dialect::Html5
    } else if content.contains(HTML_401_STRICT) {
        Dialect::Html401
    } else if content.contains(XHTML_10_STRICT) {
        Dialect::Xhtml10Strict
    } else if content.contains(XHTML_10_TRANSITIONAL) {
        Dialect::Xhtml10Transitional
    } else if content.contains(XHTML_11) {
        Dialect::Xhtml11
    } else {
        Dialect::Unknown
    }
}
