//! Test execution engine
//!
//! Provides the concurrency limiter, the per-shard process runner and the
//! scheduler that drains shard results as they complete.

mod limiter;
mod scheduler;
mod shard;

pub use limiter::ConcurrencyLimiter;
pub use scheduler::{RunOutcome, Scheduler};
pub use shard::run_shard;
