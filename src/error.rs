// src/error.rs
// =============================================================================
// Error types for the things that can go wrong while analyzing a page.
//
// Only fetch and parse failures are errors here. A link that cannot be probed
// is not an error at all: it simply counts as inaccessible (see
// analyzer/prober.rs).
//
// Every error knows how to turn itself into a message for the person who
// asked for the analysis. The analyzer never hands a raw error back to its
// caller, it always returns a report with `error_message` filled in.
// =============================================================================

use thiserror::Error;

/// Failures while retrieving the raw markup of a page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The address could not be parsed as a URL at all
    #[error("invalid URL '{address}': {reason}")]
    InvalidUrl { address: String, reason: String },

    /// The address parsed, but has no http(s) scheme or no host
    #[error("invalid URL: missing scheme or host")]
    MissingSchemeOrHost,

    /// Connection, DNS or TLS failure, or the request timed out
    #[error("unable to fetch the URL: {0}")]
    Unreachable(String),

    /// The server answered with something other than 200 OK
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// The response body could not be read to the end
    #[error("error reading the response body: {0}")]
    BodyRead(String),
}

/// The markup parser rejected the body.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ParseError(pub String);

/// Anything that ends an analysis early.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl AnalysisError {
    // Human-readable text placed in the report's `error_message`.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Fetch(FetchError::InvalidUrl { .. }) => {
                "The provided URL is not valid. Please check the format and try again.".to_string()
            }
            AnalysisError::Fetch(FetchError::MissingSchemeOrHost) => {
                "The URL is missing a scheme (like 'http' or 'https') or a host. \
                 Please provide a complete URL."
                    .to_string()
            }
            AnalysisError::Fetch(FetchError::Unreachable(_)) => {
                "We were unable to fetch the requested URL. \
                 Please check your internet connection or the URL."
                    .to_string()
            }
            AnalysisError::Fetch(FetchError::UnexpectedStatus(code)) => format!(
                "The server returned a status code of {}. \
                 Please ensure you have the necessary permissions.",
                code
            ),
            AnalysisError::Fetch(FetchError::BodyRead(_)) => {
                "An error occurred while reading the response. Please try again later.".to_string()
            }
            AnalysisError::Parse(ParseError(message)) => {
                format!("The page could not be parsed: {}", message)
            }
        }
    }
}
