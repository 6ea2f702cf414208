//! Logging utilities
//!
//! Diagnostics go to stderr so the report on stdout stays clean.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Target prefix of every event this binary emits
const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Parse a level name (`trace` .. `error`, case-insensitive), falling back to WARN.
pub fn parse_level(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::WARN)
}

/// Filter passing this crate's events at `level` and above
pub fn build_filter(level: Level) -> EnvFilter {
    EnvFilter::new(format!("{CRATE_TARGET}={level}"))
}

/// Initialize the logger. `RUST_LOG` takes precedence over `level`.
pub fn init_logger(level: Level) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| build_filter(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
