//! Utility modules for common functionality.
//!
//! - logging: tracing subscriber setup
//! - metrics: process-wide pipeline counters
//! - retry: fixed-delay retry helper for provider calls

pub mod logging;
pub mod metrics;
pub mod retry;

pub use retry::{RetryConfig, WithRetry};
