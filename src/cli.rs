// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is one operation, "analyze this address", so no subcommands: the
// address is a positional argument and everything else is an optional flag
// that tweaks AnalyzerConfig.
// =============================================================================

use clap::Parser;
use log::LevelFilter;
use std::time::Duration;

use crate::config::AnalyzerConfig;

#[derive(Parser, Debug)]
#[command(
    name = "page-analyzer",
    version,
    about = "Analyze a webpage: markup dialect, title, headings, login forms and link reachability",
    long_about = "page-analyzer fetches a single page, reports its doctype dialect, title, heading \
                  counts and whether it has a login form, classifies every link as internal or \
                  external, and checks how many of the external links are unreachable."
)]
pub struct Cli {
    /// Address of the page to analyze (e.g., https://example.com)
    pub url: String,

    /// Output the report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Seconds each external link probe may take before it counts as inaccessible
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,

    /// Seconds allowed for fetching the page itself
    #[arg(long, default_value_t = 30)]
    pub fetch_timeout: u64,

    /// Maximum number of link probes running at the same time
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(1..=500))]
    pub concurrency: u16,

    /// Fail the analysis if the markup needed repairs while parsing
    #[arg(long)]
    pub strict: bool,

    /// Log level for diagnostics on stderr (error, warn, info, debug, trace).
    ///
    /// Overrides RUST_LOG; with neither set, only warnings and errors are shown
    #[arg(long)]
    pub log_level: Option<LevelFilter>,
}

impl Cli {
    pub fn to_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            probe_timeout: Duration::from_secs(self.timeout),
            fetch_timeout: Duration::from_secs(self.fetch_timeout),
            max_concurrent_probes: usize::from(self.concurrency),
            strict_parse: self.strict,
            ..AnalyzerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["page-analyzer", "https://example.com"]).unwrap();
        assert_eq!(cli.url, "https://example.com");
        assert!(!cli.json);
        assert_eq!(cli.log_level, None);

        let config = cli.to_config();
        assert_eq!(config.probe_timeout, Duration::from_secs(5));
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.max_concurrent_probes, 50);
        assert!(!config.strict_parse);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "page-analyzer",
            "https://example.com",
            "--json",
            "--timeout",
            "2",
            "--concurrency",
            "8",
            "--strict",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.log_level, Some(LevelFilter::Debug));
        let config = cli.to_config();
        assert_eq!(config.probe_timeout, Duration::from_secs(2));
        assert_eq!(config.max_concurrent_probes, 8);
        assert!(config.strict_parse);
    }

    #[test]
    fn test_concurrency_out_of_range() {
        let result = Cli::try_parse_from(["page-analyzer", "https://example.com", "--concurrency", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["page-analyzer"]).is_err());
    }
}
