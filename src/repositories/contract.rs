//! Contract repository implementation.

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::RwLock;
use uuid::Uuid;

use crate::{
	models::{Contract, ContractEvent, Severity},
	repositories::RepositoryError,
	services::blockchain::hex_to_u64,
};

/// Storage operations the pipeline requires from its surroundings
#[async_trait]
pub trait ContractRepositoryTrait: Send + Sync {
	/// All contracts currently flagged active
	async fn list_active_contracts(&self) -> Result<Vec<Contract>, RepositoryError>;

	/// Persists one classified event and returns the stored record
	#[allow(clippy::too_many_arguments)]
	async fn record_event(
		&self,
		contract_id: &str,
		event_name: &str,
		timestamp: i64,
		payload: Value,
		severity: Severity,
		breach_detected: bool,
		recommended_action: &str,
	) -> Result<ContractEvent, RepositoryError>;
}

/// In-memory contract store, optionally seeded from a JSON file
///
/// The binary seeds it from `CONTRACTS_PATH`; tests seed it directly.
/// Recorded events are retained for inspection, not durably persisted —
/// durable storage lives outside this crate.
pub struct ContractRepository {
	contracts: RwLock<Vec<Contract>>,
	events: RwLock<Vec<ContractEvent>>,
}

impl ContractRepository {
	pub fn new() -> Self {
		Self::with_contracts(Vec::new())
	}

	pub fn with_contracts(contracts: Vec<Contract>) -> Self {
		Self {
			contracts: RwLock::new(contracts),
			events: RwLock::new(Vec::new()),
		}
	}

	/// Loads the contract list from a JSON array file
	pub fn from_file(path: &Path) -> Result<Self, RepositoryError> {
		let raw = std::fs::read_to_string(path).map_err(|e| {
			RepositoryError::load_error(format!("failed to read {}: {}", path.display(), e))
		})?;
		let contracts: Vec<Contract> = serde_json::from_str(&raw).map_err(|e| {
			RepositoryError::load_error(format!("failed to parse {}: {}", path.display(), e))
		})?;
		Ok(Self::with_contracts(contracts))
	}

	pub fn add_contract(&self, contract: Contract) {
		self.contracts
			.write()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.push(contract);
	}

	/// Fills in the owner contact for contracts registered without one
	pub fn apply_default_owner(&self, default_owner_email: &str) {
		let mut contracts = self
			.contracts
			.write()
			.unwrap_or_else(|poisoned| poisoned.into_inner());
		for contract in contracts.iter_mut() {
			if contract.owner_email.is_empty() {
				contract.owner_email = default_owner_email.to_string();
			}
		}
	}

	/// Snapshot of every event recorded so far
	pub fn events(&self) -> Vec<ContractEvent> {
		self.events
			.read()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.clone()
	}
}

impl Default for ContractRepository {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl ContractRepositoryTrait for ContractRepository {
	async fn list_active_contracts(&self) -> Result<Vec<Contract>, RepositoryError> {
		Ok(self
			.contracts
			.read()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.iter()
			.filter(|c| c.active)
			.cloned()
			.collect())
	}

	async fn record_event(
		&self,
		contract_id: &str,
		event_name: &str,
		timestamp: i64,
		payload: Value,
		severity: Severity,
		breach_detected: bool,
		recommended_action: &str,
	) -> Result<ContractEvent, RepositoryError> {
		let block = payload.get("block").map(hex_to_u64).unwrap_or(0);
		let txid = payload
			.get("txid")
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_string();

		let event = ContractEvent {
			id: Uuid::new_v4().to_string(),
			contract_id: contract_id.to_string(),
			event_name: event_name.to_string(),
			timestamp,
			block,
			txid,
			payload,
			severity,
			breach_detected,
			recommended_action: recommended_action.to_string(),
		};

		self.events
			.write()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.push(event.clone());
		Ok(event)
	}
}
