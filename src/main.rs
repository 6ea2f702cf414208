//! run-gn-tests - sharded test runner for GN build directories
//!
//! Collects every executable in a build output directory matching
//! `xnnpack_*_test`, runs each one several times with GoogleTest sharding
//! enabled, and prints a summary.
//!
//! ## Usage
//!
//! ```bash
//! # Run every suite in out/Default, 8 shards each, one shard per CPU
//! run-gn-tests out/Default
//!
//! # Fewer shards, at most 4 processes at once, streaming test output
//! run-gn-tests out/Default --shards 2 --cpus 4 --verbose
//! ```
//!
//! Exits with 0 when every shard passed and 1 otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, info};

mod cli;
mod config;
mod discovery;
mod executor;
mod models;
mod output;
#[cfg(all(test, unix))]
mod testutil;
mod utils;

use cli::Args;
use config::{EnvConfig, RunConfig};
use executor::Scheduler;
use output::Reporter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let log_level = config::resolve_log_level(&args, &env);
    utils::init_logger(utils::parse_level(&log_level));
    if env.has_any() {
        debug!("Environment overrides: {:?}", env);
    }

    let detected_cpus = std::thread::available_parallelism().ok();
    let config = RunConfig::resolve(&args, &env, detected_cpus)?;
    info!(
        "Running tests in {} ({} shards, {} concurrent)",
        config.out_dir.display(),
        config.shards,
        config.concurrency
    );

    let code = run(&config, std::io::stdout()).await?;
    Ok(ExitCode::from(code))
}

/// Discover, run and report. Returns the process exit status.
async fn run<W: Write>(config: &RunConfig, out: W) -> Result<u8> {
    let suites = discovery::discover_suites(&config.out_dir)?;

    let mut reporter = Reporter::new(out, config.shards).verbose(config.verbose);
    reporter
        .discovered(suites.len())
        .context("Failed to write report")?;

    let scheduler = Scheduler::new(config.concurrency, config.shards);
    debug!("Admitting at most {} shards at once", scheduler.concurrency());
    let outcome = scheduler
        .run(&suites, |result| {
            reporter.result(result).context("Failed to write report")
        })
        .await?;

    reporter.finish(&outcome).context("Failed to write report")?;
    Ok(output::exit_code(&outcome))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testutil::{failing_suite, passing_suite, script_suite};
    use std::path::Path;
    use tempfile::tempdir;

    fn config(dir: &Path, shards: u32, concurrency: usize) -> RunConfig {
        RunConfig {
            out_dir: dir.to_path_buf(),
            shards,
            concurrency,
            verbose: false,
        }
    }

    async fn report(config: &RunConfig) -> (u8, String) {
        let mut out = Vec::new();
        let code = run(config, &mut out).await.unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_empty_directory_succeeds() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("foo_test"), b"").unwrap();

        let (code, text) = report(&config(dir.path(), 8, 2)).await;
        assert_eq!(code, 0);
        assert!(text.starts_with("Discovered 0 test suites...\n"));
        assert!(text.ends_with("** SUCCESS - ALL TESTS PASS **\n"));
    }

    #[tokio::test]
    async fn test_all_passing() {
        let dir = tempdir().unwrap();
        passing_suite(dir.path(), "xnnpack_a_test");
        passing_suite(dir.path(), "xnnpack_b_test");

        let (code, text) = report(&config(dir.path(), 2, 4)).await;
        assert_eq!(code, 0);
        assert!(text.starts_with("Discovered 2 test suites...\n"));
        assert_eq!(text.matches("PASS (").count(), 4);
        for label in [
            "xnnpack_a_test (0/2)",
            "xnnpack_a_test (1/2)",
            "xnnpack_b_test (0/2)",
            "xnnpack_b_test (1/2)",
        ] {
            assert_eq!(text.matches(label).count(), 1, "{label}");
        }
        assert!(text.ends_with("** SUCCESS - ALL TESTS PASS **\n"));
    }

    #[tokio::test]
    async fn test_one_failing_shard() {
        let dir = tempdir().unwrap();
        passing_suite(dir.path(), "xnnpack_a_test");
        script_suite(
            dir.path(),
            "xnnpack_b_test",
            "echo \"[ RUN ] Shard$GTEST_SHARD_INDEX\"\n\
             if [ \"$GTEST_SHARD_INDEX\" = 0 ]; then echo 'Expected equality' >&2; exit 1; fi",
        );

        let (code, text) = report(&config(dir.path(), 2, 2)).await;
        assert_eq!(code, 1);
        assert_eq!(text.matches("FAIL").count(), 2);
        assert_eq!(text.matches("xnnpack_b_test - Shard #").count(), 1);
        assert!(text.contains(
            "xnnpack_b_test - Shard #0 stderr:\nExpected equality\n\nstdout:\n[ RUN ] Shard0\n"
        ));
        assert!(text.ends_with("** TEST FAILURES **\n"));
    }

    #[tokio::test]
    async fn test_failure_dump_sorted() {
        let dir = tempdir().unwrap();
        failing_suite(dir.path(), "xnnpack_b_test");
        failing_suite(dir.path(), "xnnpack_a_test");

        let (code, text) = report(&config(dir.path(), 2, 4)).await;
        assert_eq!(code, 1);

        let dump: Vec<_> = text
            .lines()
            .filter(|line| line.contains(" - Shard #"))
            .collect();
        assert_eq!(
            dump,
            vec![
                "xnnpack_a_test - Shard #0 stderr:",
                "xnnpack_a_test - Shard #1 stderr:",
                "xnnpack_b_test - Shard #0 stderr:",
                "xnnpack_b_test - Shard #1 stderr:",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_directory_is_fatal() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let result = run(&config(&dir.path().join("missing"), 8, 1), &mut out).await;
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
