//! HTTP transport for chain node JSON-RPC interactions.
//!
//! A single reqwest client behind retry middleware: every call gets a 15s
//! budget and one retried attempt after a fixed 200ms pause. Failures past
//! that are logged at debug level and degraded to `Value::Null`, which the
//! per-family clients surface as empty data.

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::services::blockchain::BlockChainError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const RETRY_DELAY: Duration = Duration::from_millis(200);

/// JSON-RPC 2.0 client over HTTP
///
/// Stateless apart from the connection pool; cheap to clone and safe to
/// share across tasks.
#[derive(Clone, Debug)]
pub struct JsonRpcTransport {
	client: ClientWithMiddleware,
	url: Url,
}

impl JsonRpcTransport {
	/// Creates a transport for the given node endpoint
	///
	/// # Errors
	/// * `BlockChainError::InvalidEndpoint` - the URL does not parse
	/// * `BlockChainError::ClientBuildError` - the HTTP client could not be built
	pub fn new(endpoint: &str) -> Result<Self, BlockChainError> {
		let url = Url::parse(endpoint)
			.map_err(|e| BlockChainError::invalid_endpoint(format!("{}: {}", endpoint, e)))?;

		// Fixed 200ms between the two attempts.
		let retry_policy = ExponentialBackoff::builder()
			.retry_bounds(RETRY_DELAY, RETRY_DELAY)
			.build_with_max_retries(1);

		let http_client = reqwest::ClientBuilder::new()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.map_err(|e| BlockChainError::client_build_error(e.to_string()))?;

		let client = ClientBuilder::new(http_client)
			.with(RetryTransientMiddleware::new_with_policy(retry_policy))
			.build();

		Ok(Self { client, url })
	}

	/// The endpoint this transport talks to
	pub fn endpoint(&self) -> &str {
		self.url.as_str()
	}

	/// Sends a JSON-RPC request and returns the full response document
	///
	/// Any transport failure, non-success status, or undecodable body
	/// yields `Value::Null`.
	pub async fn send_raw_request(&self, method: &str, params: Value) -> Value {
		let body = json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params,
		});

		let response = match self.client.post(self.url.clone()).json(&body).send().await {
			Ok(response) => response,
			Err(e) => {
				debug!(method, error = %e, "rpc request failed");
				return Value::Null;
			}
		};

		if !response.status().is_success() {
			debug!(method, status = %response.status(), "rpc returned non-success status");
			return Value::Null;
		}

		match response.json::<Value>().await {
			Ok(value) => value,
			Err(e) => {
				debug!(method, error = %e, "rpc response was not valid JSON");
				Value::Null
			}
		}
	}

	/// Sends a JSON-RPC request and extracts its `result` member
	pub async fn request_result(&self, method: &str, params: Value) -> Value {
		match self.send_raw_request(method, params).await {
			Value::Object(mut map) => map.remove("result").unwrap_or(Value::Null),
			_ => Value::Null,
		}
	}
}
