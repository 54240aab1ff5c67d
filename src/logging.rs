// src/logging.rs
// =============================================================================
// Logger setup.
//
// Diagnostics go through the `log` facade and are printed by env_logger on
// stderr, so `--json` output on stdout stays machine-readable.
//
// Where the level comes from, strongest first:
//   1. --log-level               page-analyzer https://example.com --log-level debug
//   2. RUST_LOG                  RUST_LOG=debug page-analyzer https://example.com
//   3. neither given -> warn
//
// Rust concepts:
// - Option<T>: "no --log-level flag" is None, not a made-up default
// - Global state: a process can install exactly one logger, so the building
//   is split from the installing to keep it testable
// =============================================================================

use log::LevelFilter;
use std::io::Write; // writeln! into env_logger's formatter buffer

// Crates that are chatty below warn and drown out our own messages
const NOISY_MODULES: [(&str, LevelFilter); 5] = [
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("hyper", LevelFilter::Warn),
    ("reqwest", LevelFilter::Warn),
    ("rustls", LevelFilter::Warn),
];

// Installs the logger for the whole process.
//
// Parameters:
//   level: the --log-level flag, if given
//
// Fails (instead of panicking) if a logger is already installed.
pub fn init_logger(level: Option<LevelFilter>) -> Result<(), log::SetLoggerError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let logger = build_logger(level, rust_log.as_deref());

    // This is what env_logger's try_init() does, minus reading RUST_LOG itself
    let max_level = logger.filter();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);
    Ok(())
}

// Builds (but does not install) a logger from the flag and RUST_LOG's value
fn build_logger(level: Option<LevelFilter>, rust_log: Option<&str>) -> env_logger::Logger {
    let mut builder = env_logger::Builder::new();

    if let Some(filters) = rust_log {
        builder.parse_filters(filters);
    }

    match (level, rust_log) {
        // The flag replaces RUST_LOG's global level (module directives stay)
        (Some(level), _) => {
            builder.filter_level(level);
        }
        (None, None) => {
            builder.filter_level(LevelFilter::Warn);
        }
        (None, Some(_)) => {}
    }

    for (module, cap) in NOISY_MODULES {
        builder.filter_module(module, cap);
    }

    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {}] {}",
            record.level(),
            record.target(),
            record.args()
        )
    });

    builder.build()
}
