//! Configuration module
//!
//! Resolves the run configuration once at startup from CLI flags,
//! environment overrides and defaults.

mod env;

pub use env::EnvConfig;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::cli::Args;

/// Shards per suite when neither the CLI nor the environment sets one
pub const DEFAULT_SHARDS: u32 = 8;

/// Default log level for diagnostics
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Build directory not found: {}", .0.display())]
    OutDirNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Shard count must be at least 1 (got {0})")]
    InvalidShards(u32),
}

/// Fully resolved configuration for one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Build output directory holding the test executables
    pub out_dir: PathBuf,

    /// Shards per test suite
    pub shards: u32,

    /// Maximum number of shards running at once
    pub concurrency: usize,

    /// Stream captured output after every result
    pub verbose: bool,
}

impl RunConfig {
    /// Resolve CLI > environment > defaults, then validate.
    ///
    /// `detected_cpus` is the host's CPU count, looked up by the caller.
    pub fn resolve(
        args: &Args,
        env: &EnvConfig,
        detected_cpus: Option<NonZeroUsize>,
    ) -> Result<Self, ConfigError> {
        let shards = args.shards.or(env.shards).unwrap_or(DEFAULT_SHARDS);
        if shards == 0 {
            return Err(ConfigError::InvalidShards(shards));
        }

        let concurrency = match args.cpus.or(env.cpus) {
            Some(cpus) => coerce_concurrency(cpus),
            None => default_concurrency(detected_cpus),
        };

        if !args.out_dir.exists() {
            return Err(ConfigError::OutDirNotFound(args.out_dir.clone()));
        }
        if !args.out_dir.is_dir() {
            return Err(ConfigError::NotADirectory(args.out_dir.clone()));
        }

        Ok(Self {
            out_dir: args.out_dir.clone(),
            shards,
            concurrency,
            verbose: args.verbose || env.verbose.unwrap_or(false),
        })
    }
}

/// Resolve the log level: CLI flag, then environment, then the default.
pub fn resolve_log_level(args: &Args, env: &EnvConfig) -> String {
    args.log_level
        .clone()
        .or_else(|| env.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Default concurrency is the detected CPU count, never less than 1.
pub fn default_concurrency(detected_cpus: Option<NonZeroUsize>) -> usize {
    detected_cpus.map_or(1, NonZeroUsize::get)
}

/// A configured cap of zero or less becomes 1 so the run can progress.
pub fn coerce_concurrency(requested: i64) -> usize {
    if requested < 1 {
        warn!("Concurrency {} is not positive, using 1", requested);
        return 1;
    }
    usize::try_from(requested).unwrap_or(usize::MAX)
}
