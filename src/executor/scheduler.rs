//! Shard scheduling and result aggregation
//!
//! Fans every suite out into its shards, runs them under the concurrency
//! limiter and hands results back in the order they finish.

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use super::{run_shard, ConcurrencyLimiter};
use crate::models::{TestResult, TestTask};
use crate::utils::Timer;

/// Aggregate of a completed run
#[derive(Clone, Debug, Default)]
pub struct RunOutcome {
    pub total: usize,
    pub passed: usize,
    /// Failed shards, in completion order
    pub failures: Vec<TestResult>,
    pub elapsed: Duration,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs every shard of every suite
pub struct Scheduler {
    limiter: ConcurrencyLimiter,
    shards: u32,
}

impl Scheduler {
    pub fn new(concurrency: usize, shards: u32) -> Self {
        Self {
            limiter: ConcurrencyLimiter::new(concurrency),
            shards,
        }
    }

    pub fn concurrency(&self) -> usize {
        self.limiter.capacity()
    }

    /// Suite-major, shard-minor task list
    pub fn expand(&self, suites: &[PathBuf]) -> Vec<TestTask> {
        suites
            .iter()
            .flat_map(|suite| {
                (0..self.shards).map(move |shard| TestTask::new(suite, shard, self.shards))
            })
            .collect()
    }

    /// Run all shards, calling `on_result` for each one as it completes.
    ///
    /// Returns only once every shard has produced a result. Errors from
    /// `on_result` or fatal shard errors abort the run.
    pub async fn run<F>(&self, suites: &[PathBuf], mut on_result: F) -> Result<RunOutcome>
    where
        F: FnMut(&TestResult) -> Result<()>,
    {
        let tasks = self.expand(suites);
        info!(
            "Running {} shards across {} suites (max {} concurrent)",
            tasks.len(),
            suites.len(),
            self.limiter.capacity()
        );

        let timer = Timer::start("run");
        let mut pending: FuturesUnordered<_> = tasks
            .iter()
            .map(|task| run_shard(task, &self.limiter))
            .collect();

        let mut outcome = RunOutcome {
            total: tasks.len(),
            ..Default::default()
        };

        while let Some(result) = pending.next().await {
            let result = result?;
            debug!(
                "Finished {} shard {} (success: {})",
                result.suite, result.shard, result.success
            );
            on_result(&result)?;

            if result.success {
                outcome.passed += 1;
            } else {
                outcome.failures.push(result);
            }
        }

        outcome.elapsed = timer.stop();
        info!(
            "Run completed in {:.2}s - Pass: {}/{}",
            outcome.elapsed.as_secs_f64(),
            outcome.passed,
            outcome.total
        );

        Ok(outcome)
    }
}
