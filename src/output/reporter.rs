//! Console reporter
//!
//! Prints one fixed-width line per finished shard, then a failure dump and
//! a final banner.

use std::io::{self, Write};

use crate::executor::RunOutcome;
use crate::models::TestResult;

/// Width of the left-justified `<suite> (<shard>/<shards>)` column
pub const LABEL_WIDTH: usize = 60;

/// Width of the right-justified outcome column
pub const OUTCOME_WIDTH: usize = 20;

pub const SUCCESS_BANNER: &str = "** SUCCESS - ALL TESTS PASS **";
pub const FAILURE_BANNER: &str = "** TEST FAILURES **";

/// Writes the run report to `out`
pub struct Reporter<W: Write> {
    out: W,
    shards: u32,
    verbose: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, shards: u32) -> Self {
        Self {
            out,
            shards,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn discovered(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.out, "Discovered {count} test suites...")?;
        self.out.flush()
    }

    /// Live line for one completed shard
    pub fn result(&mut self, result: &TestResult) -> io::Result<()> {
        writeln!(self.out, "{}", format_line(result, self.shards))?;

        if self.verbose {
            writeln!(self.out, "{}", result.stdout)?;
            if !result.stderr.is_empty() {
                writeln!(self.out, "**stderr**")?;
                writeln!(self.out, "{}", result.stderr)?;
            }
        }
        self.out.flush()
    }

    /// Failure dump, counts and the final banner
    pub fn finish(&mut self, outcome: &RunOutcome) -> io::Result<()> {
        for failure in sorted_failures(&outcome.failures) {
            writeln!(self.out, "{} - Shard #{} stderr:", failure.suite, failure.shard)?;
            writeln!(self.out, "{}", failure.stderr)?;
            writeln!(self.out, "stdout:")?;
            writeln!(self.out, "{}", failure.stdout)?;
        }

        writeln!(
            self.out,
            "Ran {} shards: {} passed, {} failed in {:.2} s",
            outcome.total,
            outcome.passed,
            outcome.failures.len(),
            outcome.elapsed.as_secs_f64()
        )?;

        let banner = if outcome.is_success() {
            SUCCESS_BANNER
        } else {
            FAILURE_BANNER
        };
        writeln!(self.out, "{banner}")?;
        self.out.flush()
    }
}

/// `<suite> (<shard>/<shards>)....PASS (1.23 s)` padded with dots
pub fn format_line(result: &TestResult, shards: u32) -> String {
    let label = format!("{} ({}/{})", result.suite, result.shard, shards);
    let outcome = if result.success {
        format!("PASS ({:.2} s)", result.duration_secs())
    } else {
        "FAIL".to_string()
    };
    format!(
        "{label:.<lw$}{outcome:.>ow$}",
        lw = LABEL_WIDTH,
        ow = OUTCOME_WIDTH
    )
}

/// Failures ordered by suite name, then shard
pub fn sorted_failures(failures: &[TestResult]) -> Vec<&TestResult> {
    let mut sorted: Vec<_> = failures.iter().collect();
    sorted.sort_by(|a, b| a.suite.cmp(&b.suite).then(a.shard.cmp(&b.shard)));
    sorted
}

/// Process exit status for a finished run: 0 if everything passed, else 1
pub fn exit_code(outcome: &RunOutcome) -> u8 {
    u8::from(!outcome.is_success())
}
