// src/analyzer/prober.rs
// =============================================================================
// This module checks whether external links are reachable.
//
// Key functionality:
// - HEAD requests (lightweight, no body download)
// - A link is accessible when it answers with a status below 400 before the
//   probe timeout runs out. Anything else (timeout, DNS failure, refused
//   connection, TLS problem, malformed URL, 4xx/5xx) makes it inaccessible.
// - All links are probed concurrently, a bounded number at a time, and the
//   call only returns once every probe has finished.
//
// Counting: each probe task reports back a single bool and one coordinator
// folds those into the total, so there is exactly one writer for the count
// no matter what order the probes finish in.
//
// Rust concepts:
// - async-trait: lets a trait have async methods and still be used as dyn
// - tokio::spawn: each probe is its own task, so one panic can't take the
//   others down
// - Streams: buffer_unordered caps how many tasks run at once
// - Enums: ProbeOutcome names every way a probe can end
// =============================================================================

use async_trait::async_trait;
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered() and .fold()
use log::{debug, warn};
use reqwest::Client;
use std::collections::HashSet;
use std::error::Error as _; // brings .source() into scope for the error chain
use std::sync::Arc;
use std::time::Duration;

use crate::config::AnalyzerConfig;

/// What happened when we probed one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 1xx/2xx status
    Ok(u16),
    /// 3xx that wasn't followed (e.g. no Location header)
    Redirect(u16),
    /// 4xx status (404, 410, ...)
    ClientError(u16),
    /// 5xx or anything above
    ServerError(u16),
    /// No answer before the probe timeout
    Timeout,
    /// Redirect loop or chain too long
    TooManyRedirects,
    /// Could not resolve hostname
    DnsError,
    /// SSL/TLS certificate error
    SslError,
    /// Connection refused / reset / unreachable
    ConnectFailed,
    /// The link isn't a requestable URL at all
    InvalidUrl,
    Other(String),
}

impl ProbeOutcome {
    // 3xx only shows up here when reqwest couldn't follow it
    pub fn from_status(status: u16) -> Self {
        match status {
            0..=299 => ProbeOutcome::Ok(status),
            300..=399 => ProbeOutcome::Redirect(status),
            400..=499 => ProbeOutcome::ClientError(status),
            _ => ProbeOutcome::ServerError(status),
        }
    }

    // Below 400 means the link is alive
    pub fn is_accessible(&self) -> bool {
        matches!(self, ProbeOutcome::Ok(_) | ProbeOutcome::Redirect(_))
    }
}

/// One reachability check against one link
#[async_trait]
pub trait LinkProber: Send + Sync {
    async fn probe(&self, link: &str) -> ProbeOutcome;
}

/// Probes links with HTTP HEAD requests
pub struct HeadProber {
    client: Client,
}

impl HeadProber {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, reqwest::Error> {
        // Same limits as the page fetch, except the shorter timeout
        let client = Client::builder()
            .timeout(config.probe_timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl LinkProber for HeadProber {
    async fn probe(&self, link: &str) -> ProbeOutcome {
        // HEAD: we only need the status line, not the body
        match self.client.head(link).send().await {
            Ok(response) => ProbeOutcome::from_status(response.status().as_u16()),
            Err(e) => categorize_error(&e),
        }
    }
}

// Sorts a reqwest failure into a ProbeOutcome
//
// reqwest's own message is generic ("error sending request for url ..."), the
// useful detail (dns, certificate, ...) lives further down the source chain.
fn categorize_error(error: &reqwest::Error) -> ProbeOutcome {
    if error.is_timeout() {
        return ProbeOutcome::Timeout;
    }
    if error.is_redirect() {
        return ProbeOutcome::TooManyRedirects;
    }
    // reqwest refuses to even build a request for a malformed URL
    if error.is_builder() {
        return ProbeOutcome::InvalidUrl;
    }

    // Checked before is_connect(): DNS and TLS failures are connect errors too
    let detail = error_chain(error).to_lowercase();
    if detail.contains("certificate") || detail.contains("tls") || detail.contains("ssl") {
        ProbeOutcome::SslError
    } else if detail.contains("dns") || detail.contains("failed to lookup address") {
        ProbeOutcome::DnsError
    } else if error.is_connect() {
        ProbeOutcome::ConnectFailed
    } else {
        ProbeOutcome::Other(detail)
    }
}

// "outer: inner: innermost"
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Runs a LinkProber over a whole set of links and counts the failures
pub struct ReachabilityProber {
    prober: Arc<dyn LinkProber>,
    timeout: Duration,
    concurrency: usize,
}

impl ReachabilityProber {
    pub fn new(prober: Arc<dyn LinkProber>, config: &AnalyzerConfig) -> Self {
        Self {
            prober,
            timeout: config.probe_timeout,
            concurrency: config.probe_concurrency(),
        }
    }

    // Returns how many of the (distinct) links are inaccessible.
    //
    // Each probe runs in its own tokio task with its own timeout, starting when
    // that task starts. At most `concurrency` tasks are in flight. A task that
    // panics counts as inaccessible; nothing here fails the whole operation.
    pub async fn probe(&self, links: &[String]) -> usize {
        // Duplicates are probed once. HashSet::insert returns false for a
        // repeat, which filters it out while keeping first-seen order
        let mut seen = HashSet::new();
        let unique: Vec<String> = links
            .iter()
            .filter(|link| seen.insert(*link))
            .cloned()
            .collect();

        if unique.is_empty() {
            return 0;
        }

        debug!(
            "Probing {} external link(s), {} at a time",
            unique.len(),
            self.concurrency
        );

        // The map is lazy, so a task is only spawned when buffer_unordered has room for it
        let tasks = unique.into_iter().map(|link| {
            // The task must own what it uses ('static), hence the clones
            let prober = Arc::clone(&self.prober);
            let timeout = self.timeout;
            tokio::spawn(async move {
                // The timer starts here, not when the batch started
                let outcome = match tokio::time::timeout(timeout, prober.probe(&link)).await {
                    Ok(outcome) => outcome,
                    Err(_) => ProbeOutcome::Timeout,
                };
                debug!("Probed {}: {:?}", link, outcome);
                outcome.is_accessible()
            })
        });

        stream::iter(tasks)
            .buffer_unordered(self.concurrency)
            .fold(0usize, |inaccessible, joined| async move {
                // joined is Err only if the task panicked or was cancelled
                match joined {
                    Ok(true) => inaccessible,
                    Ok(false) => inaccessible + 1,
                    Err(e) => {
                        warn!("Probe task failed: {}", e);
                        inaccessible + 1
                    }
                }
            })
            .await
    }
}
