// src/analyzer/markup.rs
// =============================================================================
// Turning the raw body into a node tree, plus the small helpers the tree
// walker uses to read things off individual nodes.
//
// Parsing goes through the `MarkupParser` trait so a test can swap in a
// parser that fails on demand. The real one is html5ever (via scraper), which
// repairs broken markup instead of rejecting it. In strict mode we look at
// the list of repairs it had to make and refuse the document if there were any.
// =============================================================================

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{Html, Node};

use crate::error::ParseError;

pub trait MarkupParser: Send + Sync {
    fn parse(&self, body: &str) -> Result<Html, ParseError>;
}

/// html5ever-backed parser
#[derive(Debug, Clone, Default)]
pub struct Html5Parser {
    strict: bool,
}

impl Html5Parser {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

impl MarkupParser for Html5Parser {
    fn parse(&self, body: &str) -> Result<Html, ParseError> {
        let document = Html::parse_document(body);

        if self.strict {
            if let Some(first) = document.errors.first() {
                return Err(ParseError(first.to_string()));
            }
        }

        Ok(document)
    }
}

// Value of an attribute, or "" when the element doesn't have it
pub fn extract_attribute<'a>(element: &'a Element, name: &str) -> &'a str {
    element.attr(name).unwrap_or("")
}

// <input type="password">, any capitalisation of "password"
pub fn is_password_input(element: &Element) -> bool {
    extract_attribute(element, "type").eq_ignore_ascii_case("password")
}

// Text directly inside a <title> element, trimmed
pub fn extract_title(node: NodeRef<'_, Node>) -> String {
    let mut title = String::new();
    for child in node.children() {
        if let Node::Text(text) = child.value() {
            title.push_str(text);
        }
    }

    title.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn first_element(html: &Html, selector: &str) -> Element {
        let selector = Selector::parse(selector).unwrap();
        html.select(&selector).next().unwrap().value().clone()
    }

    #[test]
    fn test_parse_valid_document() {
        let parser = Html5Parser::new(true);
        let html = "<!DOCTYPE html><html><head><title>Test</title></head><body><p>Test</p></body></html>";
        assert!(parser.parse(html).is_ok());
    }

    #[test]
    fn test_lenient_parser_repairs_broken_markup() {
        let parser = Html5Parser::default();
        let html = "<html><head><title>Test</title><body><p>Test";
        assert!(parser.parse(html).is_ok());
    }

    #[test]
    fn test_strict_parser_rejects_broken_markup() {
        let parser = Html5Parser::new(true);
        let result = parser.parse("<html><head><title>Test</title><body><p>Test");
        let err = result.err().expect("strict parse should fail");
        assert!(!err.0.is_empty());
    }

    #[test]
    fn test_extract_attribute() {
        let html = Html::parse_fragment(r#"<a class="my-class" href="/test">x</a>"#);
        let anchor = first_element(&html, "a");
        assert_eq!(extract_attribute(&anchor, "href"), "/test");
        assert_eq!(extract_attribute(&anchor, "id"), "");
    }

    #[test]
    fn test_password_input() {
        let html = Html::parse_fragment(
            r#"<input class="my-class" type="PassWord"><input type="text" id="user">"#,
        );
        let selector = Selector::parse("input").unwrap();
        let inputs: Vec<_> = html.select(&selector).collect();
        assert!(is_password_input(inputs[0].value()));
        assert!(!is_password_input(inputs[1].value()));
    }

    #[test]
    fn test_extract_title() {
        let html = Html::parse_document("<html><head><title>  Test Page \n</title></head></html>");
        let selector = Selector::parse("title").unwrap();
        let title = html.select(&selector).next().unwrap();
        assert_eq!(extract_title(*title), "Test Page");
    }
}
