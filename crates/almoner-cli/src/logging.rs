//! Tracing initialisation for the CLI

use crate::error::{CliError, CliResult};

/// Map a configured level name to a tracing level
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::WARN,
    }
}

/// Install the global subscriber; `--verbose` raises the level to debug
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: &str, verbose: bool) -> CliResult<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        parse_level(level)
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
