// src/analyzer/mod.rs
// =============================================================================
// This module contains the page analysis logic.
//
// Submodules:
// - report:  the AnalysisReport produced for every page
// - dialect: doctype -> markup dialect
// - links:   internal vs external link classification
// - markup:  parsing the body and reading attributes/text off nodes
// - walker:  the single pass over the document tree
// - prober:  concurrent reachability checks for external links
// - page:    PageAnalyzer, which runs all of the above for one address
// =============================================================================

mod dialect;
mod links;
mod markup;
mod page;
mod prober;
mod report;
mod walker;

pub use page::PageAnalyzer;
pub use report::AnalysisReport;
