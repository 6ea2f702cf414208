//! Test task and result models
//!
//! A task names one shard of one suite; a result is what running it produced.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One shard of one test suite
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestTask {
    pub executable: PathBuf,
    pub shard: u32,
    pub total_shards: u32,
}

impl TestTask {
    pub fn new(executable: impl Into<PathBuf>, shard: u32, total_shards: u32) -> Self {
        Self {
            executable: executable.into(),
            shard,
            total_shards,
        }
    }

    /// Suite name is the executable's file name
    pub fn suite(&self) -> String {
        suite_name(&self.executable)
    }
}

impl fmt::Display for TestTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.suite(), self.shard, self.total_shards)
    }
}

fn suite_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Outcome of a single shard
#[derive(Clone, Debug, PartialEq)]
pub struct TestResult {
    pub suite: String,
    pub shard: u32,
    pub success: bool,
    /// None when the process was killed by a signal or never started
    pub exit_code: Option<i32>,
    pub duration: Duration,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn from_exit(
        task: &TestTask,
        exit_code: Option<i32>,
        duration: Duration,
        stdout: String,
        stderr: String,
    ) -> Self {
        Self {
            suite: task.suite(),
            shard: task.shard,
            success: exit_code == Some(0),
            exit_code,
            duration,
            stdout,
            stderr,
        }
    }

    /// A shard whose process could not be started or awaited
    pub fn spawn_failure(task: &TestTask, error: impl fmt::Display) -> Self {
        Self {
            suite: task.suite(),
            shard: task.shard,
            success: false,
            exit_code: None,
            duration: Duration::ZERO,
            stdout: String::new(),
            stderr: format!("failed to run {}: {error}", task.executable.display()),
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}
