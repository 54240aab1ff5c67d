// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Analyze the page
// 4. Print the report (summary or JSON)
// 5. Exit with proper code (0 = all fine, 1 = inaccessible links, 2 = error)
// =============================================================================

mod analyzer; // src/analyzer/ - tree walk, link probing, report
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - AnalyzerConfig and defaults
mod error; // src/error.rs - fetch / parse errors
mod fetch; // src/fetch/ - retrieving the page
mod logging; // src/logging.rs - env_logger setup

use analyzer::{AnalysisReport, PageAnalyzer};
use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = page analyzed, every external link reachable
//   Ok(1) = page analyzed, some external links are inaccessible
//   Ok(2) = the page itself could not be fetched or parsed
//   Err   = unexpected error (bad setup, output failure)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    logging::init_logger(cli.log_level).context("failed to initialize logger")?;

    let config = cli.to_config();
    let analyzer = PageAnalyzer::from_config(&config).context("failed to build HTTP client")?;

    if !cli.json {
        println!("🔍 Analyzing: {}", cli.url);
    }

    let report = analyzer.analyze(&cli.url).await;

    print_report(&report, cli.json)?;

    if report.is_error() {
        Ok(2)
    } else if report.inaccessible_link_count > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn print_report(report: &AnalysisReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_summary(report);
    }
    Ok(())
}

// Human-readable summary in the terminal
fn print_summary(report: &AnalysisReport) {
    if report.is_error() {
        println!("❌ {}", report.error_message);
        return;
    }

    let title = if report.title.is_empty() {
        "(none)"
    } else {
        report.title.as_str()
    };

    println!();
    println!("{:<24} {}", "HTML version:", report.dialect);
    println!("{:<24} {}", "Title:", title);
    println!(
        "{:<24} {}",
        "Login form:",
        if report.has_login_form { "yes" } else { "no" }
    );

    println!("{:<24}", "Headings:");
    if report.heading_counts.is_empty() {
        println!("   (none)");
    }
    for (level, count) in &report.heading_counts {
        println!("   {:<4} {}", level, count);
    }

    println!();
    println!("📊 Links:");
    println!("   🏠 Internal: {}", report.internal_link_count);
    println!("   🌐 External: {}", report.external_link_count);
    println!("   ❌ Inaccessible: {}", report.inaccessible_link_count);

    if !report.external_links.is_empty() {
        println!();
        println!("External links:");
        for link in &report.external_links {
            // Truncate long URLs so the list stays readable
            let display = if link.chars().count() > 77 {
                format!("{}...", link.chars().take(77).collect::<String>())
            } else {
                link.clone()
            };
            println!("   {}", display);
        }
    }
}
