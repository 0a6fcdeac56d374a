//! Neo N3 client implementation.
//!
//! Covers the three node calls the account-chain scanner needs: chain
//! height, verbose block retrieval, and per-transaction application logs
//! (the notification source). Every accessor degrades to empty data on
//! node failure.

use serde_json::{json, Value};

use crate::services::blockchain::{hex_to_u64, BlockChainError, JsonRpcTransport};

/// Client for Neo N3 nodes
#[derive(Clone, Debug)]
pub struct NeoClient {
	transport: JsonRpcTransport,
}

impl NeoClient {
	/// Creates a client for the given node endpoint
	pub fn new(endpoint: &str) -> Result<Self, BlockChainError> {
		Ok(Self {
			transport: JsonRpcTransport::new(endpoint)?,
		})
	}

	/// Creates a client over an existing transport
	pub fn from_transport(transport: JsonRpcTransport) -> Self {
		Self { transport }
	}

	/// Current chain height, or 0 when the node is unreachable
	pub async fn get_block_count(&self) -> u64 {
		hex_to_u64(
			&self
				.transport
				.request_result("getblockcount", json!([]))
				.await,
		)
	}

	/// Verbose block at `index`; `Value::Null` when unavailable
	pub async fn get_block(&self, index: u64) -> Value {
		self.transport
			.request_result("getblock", json!([index, 1]))
			.await
	}

	/// Application log for a transaction; `Value::Null` when unavailable
	pub async fn get_application_log(&self, txid: &str) -> Value {
		self.transport
			.request_result("getapplicationlog", json!([txid]))
			.await
	}
}
