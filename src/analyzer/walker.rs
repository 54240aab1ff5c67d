// src/analyzer/walker.rs
// =============================================================================
// One recursive pass over the parsed document that fills in the report.
//
// Nodes are visited once each, parent before children, children left to
// right (document order). For each element:
//   <title>     -> the first one with any text becomes the page title
//   <h1>..<h6>  -> bump that level's counter
//   <input>     -> has_login_form = (type is "password"); the last input wins
//   <a>         -> the href (or "" if missing) is classified the first time
//                  we see it, and ignored every time after that
//
// The report is borrowed mutably for the whole walk. Nothing here is async
// and nothing touches the network.
// =============================================================================

use ego_tree::NodeRef;
use scraper::{Html, Node};
use std::collections::HashSet;

use super::links::{LinkClassifier, LinkKind};
use super::markup::{extract_attribute, extract_title, is_password_input};
use super::report::AnalysisReport;

pub struct TreeWalker {
    classifier: LinkClassifier,
    // Raw href strings already counted, so duplicates are skipped
    seen_links: HashSet<String>,
}

impl TreeWalker {
    pub fn new(base_address: &str) -> Self {
        Self {
            classifier: LinkClassifier::new(base_address),
            seen_links: HashSet::new(),
        }
    }

    pub fn walk(&mut self, document: &Html, report: &mut AnalysisReport) {
        self.visit(document.tree.root(), report);
    }

    fn visit(&mut self, node: NodeRef<'_, Node>, report: &mut AnalysisReport) {
        if let Node::Element(element) = node.value() {
            match element.name() {
                "title" => {
                    // Pages can have more than one <title>, e.g. inside an inline <svg>
                    if report.title.is_empty() {
                        report.title = extract_title(node);
                    }
                }
                level @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
                    report.count_heading(level);
                }
                "input" => {
                    report.has_login_form = is_password_input(element);
                }
                "a" => {
                    self.record_link(extract_attribute(element, "href"), report);
                }
                _ => {}
            }
        }

        for child in node.children() {
            self.visit(child, report);
        }
    }

    fn record_link(&mut self, href: &str, report: &mut AnalysisReport) {
        if !self.seen_links.insert(href.to_string()) {
            return;
        }

        match self.classifier.classify(href) {
            LinkKind::Internal => report.internal_link_count += 1,
            LinkKind::External => report.push_external_link(href.to_string()),
        }
    }
}

// Convenience wrapper: walk `document` as if it lived at `base_address`
pub fn walk_document(document: &Html, base_address: &str, report: &mut AnalysisReport) {
    TreeWalker::new(base_address).walk(document, report);
}
