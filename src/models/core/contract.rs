use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain family a contract lives on.
#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
	#[default]
	Neo,
	Evm,
}

/// Network a contract is deployed to.
#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
	#[default]
	Testnet,
	Mainnet,
}

impl fmt::Display for NetworkKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Testnet => write!(f, "testnet"),
			Self::Mainnet => write!(f, "mainnet"),
		}
	}
}

/// A monitored on-chain contract.
///
/// Created at registration time and read-only to the scanning pipeline:
/// scanners consult the allowlist and contact details but never mutate the
/// record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Contract {
	pub id: String,
	#[serde(default)]
	pub chain: ChainKind,
	#[serde(default)]
	pub network: NetworkKind,
	/// Contract script hash (Neo) or address (EVM), with or without `0x`.
	pub contract_hash: String,
	#[serde(default)]
	pub contract_name: Option<String>,
	#[serde(default = "default_active")]
	pub active: bool,
	pub owner_email: String,
	/// Event names the owner opted to watch. Empty means watch everything.
	#[serde(default)]
	pub monitoring_events: Vec<String>,
	/// Owner-assessed risk, 0 (inert) to 10 (critical).
	#[serde(default)]
	pub risk_level: u8,
	#[serde(default)]
	pub breach_vectors: Vec<String>,
	#[serde(default)]
	pub last_report: Option<String>,
}

fn default_active() -> bool {
	true
}

impl Contract {
	/// Display label for alerts: the human name when present, the hash otherwise.
	pub fn label(&self) -> &str {
		self.contract_name.as_deref().unwrap_or(&self.contract_hash)
	}
}
