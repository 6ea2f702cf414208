//! Output module
//!
//! Renders live progress and the end-of-run summary.

mod reporter;

pub use reporter::{exit_code, Reporter};
