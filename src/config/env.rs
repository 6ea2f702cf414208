//! Environment variable configuration
//!
//! Provides environment variable overrides for the run configuration.

use std::env;
use tracing::warn;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "RUN_GN_TESTS";

/// Overrides read from `RUN_GN_TESTS_*` variables
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Shard count from RUN_GN_TESTS_SHARDS
    pub shards: Option<u32>,
    /// Concurrency cap from RUN_GN_TESTS_CPUS
    pub cpus: Option<i64>,
    /// Verbose from RUN_GN_TESTS_VERBOSE
    pub verbose: Option<bool>,
    /// Log level from RUN_GN_TESTS_LOG
    pub log_level: Option<String>,
}

impl EnvConfig {
    /// Load configuration from the process environment
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));

        Self {
            shards: parse_var("SHARDS", get("SHARDS")),
            cpus: parse_var("CPUS", get("CPUS")),
            verbose: get("VERBOSE").map(|v| parse_bool(&v)),
            log_level: get("LOG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.shards.is_some()
            || self.cpus.is_some()
            || self.verbose.is_some()
            || self.log_level.is_some()
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: Option<String>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring {}_{}={:?}: not a valid number", ENV_PREFIX, name, value);
            None
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}
