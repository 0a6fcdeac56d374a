//! EVM-compatible blockchain client implementation.
//!
//! Block-number polling plus address-filtered log retrieval, with a
//! follow-up block lookup to resolve log timestamps. Results degrade to
//! empty data on node failure, matching the scanner's "no data, not fatal"
//! contract.

use serde_json::{json, Value};

use crate::services::blockchain::{hex_to_u64, u64_to_hex, BlockChainError, JsonRpcTransport};

/// Client for EVM JSON-RPC providers
#[derive(Clone, Debug)]
pub struct EvmClient {
	transport: JsonRpcTransport,
}

impl EvmClient {
	/// Creates a client for the given provider endpoint
	pub fn new(endpoint: &str) -> Result<Self, BlockChainError> {
		Ok(Self {
			transport: JsonRpcTransport::new(endpoint)?,
		})
	}

	/// Creates a client over an existing transport
	pub fn from_transport(transport: JsonRpcTransport) -> Self {
		Self { transport }
	}

	/// Latest block number, or 0 when the provider is unreachable
	pub async fn block_number(&self) -> u64 {
		hex_to_u64(
			&self
				.transport
				.request_result("eth_blockNumber", json!([]))
				.await,
		)
	}

	/// Logs emitted by `address` in the inclusive block range
	pub async fn get_logs(&self, from_block: u64, to_block: u64, address: &str) -> Vec<Value> {
		let params = json!([{
			"fromBlock": u64_to_hex(from_block),
			"toBlock": u64_to_hex(to_block),
			"address": address,
		}]);
		match self.transport.request_result("eth_getLogs", params).await {
			Value::Array(logs) => logs,
			_ => Vec::new(),
		}
	}

	/// Block header for a hex block number (no full transactions)
	pub async fn get_block_by_number(&self, block_number_hex: &str) -> Value {
		self.transport
			.request_result("eth_getBlockByNumber", json!([block_number_hex, false]))
			.await
	}
}
