// src/analyzer/page.rs
// =============================================================================
// Ties the stages together for one address:
//
//   fetch -> parse -> detect dialect + walk tree -> probe external links
//
// Data only flows forward. If fetching or parsing fails we stop there and
// return a report that is all zero values except for `error_message`. The
// caller always gets a report back, never an error.
//
// Rust concepts:
// - Trait objects: Arc<dyn Fetcher> lets tests swap in canned pages
// - Send: scraper's Html isn't Send, so it must be dropped before any .await
// - From/Into: FetchError and ParseError convert into AnalysisError via `?`
// =============================================================================

use log::{debug, info, warn};
use std::sync::Arc; // Shared ownership of the injected collaborators

use super::dialect::detect_dialect;
use super::markup::{Html5Parser, MarkupParser};
use super::prober::{HeadProber, LinkProber, ReachabilityProber};
use super::report::AnalysisReport;
use super::walker::walk_document;
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, ParseError};
use crate::fetch::{Fetcher, HttpFetcher};

// One analyzer can serve many addresses; it holds no per-page state
pub struct PageAnalyzer {
    fetcher: Arc<dyn Fetcher>,
    parser: Arc<dyn MarkupParser>,
    prober: ReachabilityProber,
}

impl PageAnalyzer {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        parser: Arc<dyn MarkupParser>,
        link_prober: Arc<dyn LinkProber>,
        config: &AnalyzerConfig,
    ) -> Self {
        Self {
            fetcher,
            parser,
            prober: ReachabilityProber::new(link_prober, config),
        }
    }

    // The real thing: reqwest for fetching and probing, html5ever for parsing
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(
            Arc::new(HttpFetcher::new(config)?),
            Arc::new(Html5Parser::new(config.strict_parse)),
            Arc::new(HeadProber::new(config)?),
            config,
        ))
    }

    pub async fn analyze(&self, address: &str) -> AnalysisReport {
        // Step 1: fetch. e.into() turns the FetchError into an AnalysisError
        let body = match self.fetcher.fetch(address).await {
            Ok(body) => body,
            Err(e) => return failed_report(address, e.into()),
        };

        // Parsing and walking are done before the first .await below, so the
        // (non-Send) document never lives across a suspension point
        let mut report = match self.inspect(address, &body) {
            Ok(report) => report,
            Err(e) => return failed_report(address, e.into()),
        };

        // Step 3: only the external links go out to the network
        report.inaccessible_link_count = self.prober.probe(&report.external_links).await;

        info!(
            "Analyzed {}: {} internal, {} external ({} inaccessible) links",
            address,
            report.internal_link_count,
            report.external_link_count,
            report.inaccessible_link_count
        );
        report
    }

    // Step 2: everything that needs the parsed document. It is dropped when
    // this returns.
    fn inspect(&self, address: &str, body: &str) -> Result<AnalysisReport, ParseError> {
        let document = self.parser.parse(body)?;

        let mut report = AnalysisReport::new();
        // The doctype is read from the raw text, not the tree
        report.dialect = detect_dialect(body);
        walk_document(&document, address, &mut report);

        debug!(
            "Walked {}: dialect {}, title {:?}",
            address, report.dialect, report.title
        );
        Ok(report)
    }
}

// Logs the technical error, hands the user the friendly one
fn failed_report(address: &str, error: AnalysisError) -> AnalysisReport {
    warn!("Analysis of {} failed: {}", address, error);
    AnalysisReport::failed(error.user_message())
}
