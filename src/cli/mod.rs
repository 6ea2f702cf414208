//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::Parser;
use std::path::PathBuf;

/// Runs the unit tests of a GN build on the current machine and prints a summary
#[derive(Parser, Debug)]
#[command(name = "run-gn-tests")]
#[command(version = "0.1.0")]
#[command(about = "Runs every xnnpack_*_test executable in a build directory with gtest sharding")]
#[command(long_about = None)]
pub struct Args {
    /// Path to a build directory, e.g. out/Default
    pub out_dir: PathBuf,

    /// How many shards each test suite is split into [default: 8]
    #[arg(long)]
    pub shards: Option<u32>,

    /// Maximum number of test shards that can run at once
    #[arg(long, allow_negative_numbers = true)]
    pub cpus: Option<i64>,

    /// Print captured test output as shards complete
    #[arg(short, long)]
    pub verbose: bool,

    /// Diagnostic log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}
