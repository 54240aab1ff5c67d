// src/config.rs
// =============================================================================
// Runtime settings for an analysis.
//
// The CLI builds one of these from its flags (see cli.rs); tests usually
// start from `AnalyzerConfig::default()` and tweak a field or two.
// =============================================================================

use std::time::Duration;

/// How long a single link probe may take before the link counts as inaccessible
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// How long fetching the page itself may take
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on probes in flight at once
pub const DEFAULT_MAX_CONCURRENT_PROBES: usize = 50;

pub const DEFAULT_USER_AGENT: &str = concat!("page-analyzer/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub probe_timeout: Duration,
    pub fetch_timeout: Duration,
    pub max_concurrent_probes: usize,
    pub user_agent: String,
    /// Reject documents that html5ever had to repair while parsing
    pub strict_parse: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_concurrent_probes: DEFAULT_MAX_CONCURRENT_PROBES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            strict_parse: false,
        }
    }
}

impl AnalyzerConfig {
    // buffer_unordered(0) would never make progress, so clamp to at least one
    pub fn probe_concurrency(&self) -> usize {
        self.max_concurrent_probes.max(1)
    }
}
