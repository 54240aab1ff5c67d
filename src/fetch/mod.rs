// src/fetch/mod.rs
// =============================================================================
// This module retrieves the raw markup of the page being analyzed.
//
// The analyzer only sees the `Fetcher` trait, so tests can hand it canned
// HTML (or canned failures) without touching the network.
// =============================================================================

mod page;
#[cfg(test)]
pub(crate) mod testing;

pub use page::{Fetcher, HttpFetcher};
