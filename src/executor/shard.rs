//! Shard runner
//!
//! Runs one gtest executable restricted to one shard and captures what it
//! printed.

use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::AcquireError;
use tracing::{debug, warn};

use super::ConcurrencyLimiter;
use crate::models::{TestResult, TestTask};
use crate::utils::Timer;

/// Output hints passed to every suite: brief output, no color.
/// Dashed `--gtest_*` spelling is required; gtest ignores bare `gtest_brief=1`.
pub const GTEST_FLAGS: [&str; 2] = ["--gtest_brief=1", "--gtest_color=no"];

pub const TOTAL_SHARDS_ENV: &str = "GTEST_TOTAL_SHARDS";
pub const SHARD_INDEX_ENV: &str = "GTEST_SHARD_INDEX";

/// Errors that abort the whole run
#[derive(Error, Debug)]
pub enum ShardError {
    #[error("Concurrency limiter closed: {0}")]
    LimiterClosed(#[from] AcquireError),

    #[error("{suite} (shard {shard}) wrote non-ASCII bytes to {stream}")]
    Decode {
        suite: String,
        shard: u32,
        stream: &'static str,
    },
}

/// Run a single shard, holding a limiter slot from spawn until exit.
///
/// A process that cannot be spawned yields a failed result rather than an
/// error, so sibling shards keep running.
pub async fn run_shard(
    task: &TestTask,
    limiter: &ConcurrencyLimiter,
) -> Result<TestResult, ShardError> {
    let _permit = limiter.acquire().await?;
    debug!("Acquired slot for {} ({} free)", task, limiter.available());

    // Shard variables are added to the inherited environment, not a
    // replacement for it: suites still need loader paths and the like.
    let mut command = Command::new(&task.executable);
    command
        .args(GTEST_FLAGS)
        .env(TOTAL_SHARDS_ENV, task.total_shards.to_string())
        .env(SHARD_INDEX_ENV, task.shard.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let timer = Timer::start(task.to_string());

    let output = match command.output().await {
        Ok(output) => output,
        Err(e) => {
            warn!("Could not run {}: {}", task, e);
            return Ok(TestResult::spawn_failure(task, e));
        }
    };
    let duration = timer.stop();

    let stdout = decode_ascii(output.stdout).ok_or_else(|| decode_error(task, "stdout"))?;
    let stderr = decode_ascii(output.stderr).ok_or_else(|| decode_error(task, "stderr"))?;

    Ok(TestResult::from_exit(
        task,
        output.status.code(),
        duration,
        stdout,
        stderr,
    ))
}

/// Strict ASCII decoding; None if any byte is outside 0..=127
fn decode_ascii(bytes: Vec<u8>) -> Option<String> {
    if !bytes.is_ascii() {
        return None;
    }
    String::from_utf8(bytes).ok()
}

fn decode_error(task: &TestTask, stream: &'static str) -> ShardError {
    ShardError::Decode {
        suite: task.suite(),
        shard: task.shard,
        stream,
    }
}
