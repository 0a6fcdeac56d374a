//! Blockchain gateway services.
//!
//! Thin, stateless wrappers around chain node JSON-RPC interfaces. One
//! shared HTTP transport handles timeouts and bounded retries; the
//! per-family clients (`NeoClient`, `EvmClient`) only know method names and
//! result shapes. A call that keeps failing after its retries yields "no
//! data" to the caller, never an error that could stop a scan loop.

mod clients;
mod error;
mod transport;

pub use clients::{EvmClient, NeoClient};
pub use error::BlockChainError;
pub use transport::JsonRpcTransport;

/// Parses a quantity that may arrive as a hex string (`"0x10"`), a decimal
/// string, or a JSON number. Anything unparseable becomes 0, which callers
/// treat as "no data".
pub fn hex_to_u64(value: &serde_json::Value) -> u64 {
	match value {
		serde_json::Value::Number(n) => n.as_u64().unwrap_or(0),
		serde_json::Value::String(s) => {
			let trimmed = s.trim();
			if let Some(hex) = trimmed.strip_prefix("0x") {
				u64::from_str_radix(hex, 16).unwrap_or(0)
			} else {
				trimmed.parse().unwrap_or(0)
			}
		}
		_ => 0,
	}
}

/// Formats a block number the way EVM JSON-RPC expects it.
pub fn u64_to_hex(value: u64) -> String {
	format!("0x{:x}", value)
}
