//! Shared utilities
//!
//! Logging setup and timing helpers.

mod logger;
mod timer;

pub use logger::{init_logger, parse_level};
pub use timer::Timer;
