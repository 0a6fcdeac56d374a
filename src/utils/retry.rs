//! Retry mechanism for handling transient failures in async operations.
//!
//! Classification providers and other flaky collaborators get a small,
//! bounded number of attempts with a fixed delay in between. Exhausting the
//! attempts surfaces the last error to the caller, which decides whether to
//! fall through to the next provider.

use std::time::Duration;

/// Configuration for retry behavior
#[derive(Clone, Debug)]
pub struct RetryConfig {
	/// Total attempts, including the first one
	pub max_attempts: u32,

	/// Fixed delay between attempts
	pub delay: Duration,
}

impl Default for RetryConfig {
	/// Two attempts with a 200ms pause, matching the provider contract.
	fn default() -> Self {
		Self {
			max_attempts: 2,
			delay: Duration::from_millis(200),
		}
	}
}

/// Handler for retrying operations with a fixed inter-attempt delay
pub struct WithRetry {
	config: RetryConfig,
}

impl WithRetry {
	pub fn new(config: RetryConfig) -> Self {
		Self { config }
	}

	pub fn with_default_config() -> Self {
		Self {
			config: RetryConfig::default(),
		}
	}

	/// Attempts an async operation with configured retry behavior
	///
	/// # Returns
	/// * `Ok(T)` - If any attempt succeeds
	/// * `Err(E)` - The last error once all attempts are exhausted
	pub async fn attempt<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
	where
		F: Fn() -> Fut + Send + Sync,
		Fut: std::future::Future<Output = Result<T, E>> + Send,
		T: Send,
		E: Send,
	{
		let mut attempt = 0;
		loop {
			match operation().await {
				Ok(value) => return Ok(value),
				Err(e) => {
					attempt += 1;
					if attempt >= self.config.max_attempts.max(1) {
						return Err(e);
					}
					tokio::time::sleep(self.config.delay).await;
				}
			}
		}
	}
}
