//! Data models for sharded test runs
//!
//! This module contains the data structures passed between discovery,
//! execution and reporting.

mod test_result;

pub use test_result::{TestResult, TestTask};
