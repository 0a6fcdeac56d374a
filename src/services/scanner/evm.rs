//! EVM scanner.
//!
//! Same shape as the account-chain scanner, specialized to block-number
//! polling and address-filtered `eth_getLogs` windows: every log the
//! provider returns for a monitored address is a match, with no name
//! filtering. Log timestamps are resolved with a follow-up block-header
//! lookup, falling back to wall-clock time when the header is unavailable.
//! The scanner is only constructed when a provider URL is configured.

use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::{
	models::{ChainKind, ClassificationResult, Contract, EvmScanConfig},
	repositories::ContractRepositoryTrait,
	services::{
		blockchain::{hex_to_u64, EvmClient},
		bus::EventBus,
		classifier::ClassificationService,
		notification::{breach_body, breach_subject, AlertNotifier},
		scanner::{ScanCursorStore, ScannerError, ScannerHealth},
	},
	utils::metrics,
};

/// Polling scanner for an EVM provider
pub struct EvmScanner {
	config: EvmScanConfig,
	repository: Arc<dyn ContractRepositoryTrait>,
	classifier: Arc<ClassificationService>,
	notifier: Arc<dyn AlertNotifier>,
	bus: Arc<EventBus>,
	client: EvmClient,
}

impl EvmScanner {
	/// Builds the scanner, or `None` when no provider URL is configured
	pub fn new(
		config: EvmScanConfig,
		repository: Arc<dyn ContractRepositoryTrait>,
		classifier: Arc<ClassificationService>,
		notifier: Arc<dyn AlertNotifier>,
		bus: Arc<EventBus>,
	) -> Result<Option<Self>, ScannerError> {
		let Some(provider_url) = config.provider_url.clone() else {
			return Ok(None);
		};
		let client = EvmClient::new(&provider_url)
			.map_err(|e| ScannerError::client_error(e.to_string()))?;
		Ok(Some(Self {
			config,
			repository,
			classifier,
			notifier,
			bus,
			client,
		}))
	}

	/// Runs until process shutdown, one pass per polling interval
	pub async fn run(&self, health: ScannerHealth) {
		info!(
			interval_secs = self.config.interval.as_secs(),
			scan_back = self.config.scan_back,
			"evm scanner started"
		);
		let mut cursors = ScanCursorStore::new();
		loop {
			match self.run_iteration(&mut cursors).await {
				Ok(events) => {
					if events > 0 {
						info!(events, "evm scan pass recorded events");
					}
				}
				Err(e) => error!(error = %e, "evm scan pass failed"),
			}
			health.beat();
			tokio::time::sleep(self.config.interval).await;
		}
	}

	/// One pass over every active EVM contract
	pub async fn run_iteration(
		&self,
		cursors: &mut ScanCursorStore,
	) -> Result<u64, ScannerError> {
		let latest = self.client.block_number().await;
		let contracts: Vec<Contract> = self
			.repository
			.list_active_contracts()
			.await
			.map_err(|e| ScannerError::repository_error(e.to_string()))?
			.into_iter()
			.filter(|c| c.chain == ChainKind::Evm && !c.contract_hash.is_empty())
			.collect();

		let mut events_recorded = 0;
		for contract in &contracts {
			let address = contract.contract_hash.to_lowercase();
			let start = cursors.start_for(&address, latest, self.config.scan_back);
			let logs = self.client.get_logs(start, latest, &address).await;
			for log in &logs {
				events_recorded += self.process_log(contract, &address, log).await;
			}
			cursors.advance(&address, latest);
		}
		Ok(events_recorded)
	}

	/// Classifies, records, and alerts for one provider log.
	/// Returns 1 when an event was recorded.
	async fn process_log(&self, contract: &Contract, address: &str, log: &Value) -> u64 {
		let block_number_hex = log.get("blockNumber").cloned().unwrap_or(Value::Null);
		let block_number = hex_to_u64(&block_number_hex);

		let timestamp = match block_number_hex.as_str() {
			Some(hex) => {
				let header = self.client.get_block_by_number(hex).await;
				let block_time = header.get("timestamp").map(hex_to_u64).unwrap_or(0);
				if block_time > 0 {
					block_time as i64
				} else {
					Utc::now().timestamp()
				}
			}
			None => Utc::now().timestamp(),
		};

		let txid = log
			.get("transactionHash")
			.and_then(Value::as_str)
			.unwrap_or("");
		let payload = json!({
			"event_name": "Log",
			"address": address,
			"block": block_number,
			"txid": txid,
			"topics": log.get("topics").cloned().unwrap_or_else(|| json!([])),
			"data": log.get("data").cloned().unwrap_or_else(|| json!("")),
		});

		let decision = self.classifier.classify(&payload, contract).await;

		if let Err(e) = self
			.repository
			.record_event(
				&contract.id,
				"Log",
				timestamp,
				payload.clone(),
				decision.severity,
				decision.breach_detected,
				&decision.recommended_action,
			)
			.await
		{
			debug!(contract = %contract.id, error = %e, "event persistence failed");
		}
		metrics::EVENTS_RECORDED.inc();

		self.bus.publish(json!({
			"type": "event",
			"network": contract.network.to_string(),
			"contract_id": contract.id,
			"event_name": "Log",
			"severity": decision.severity,
			"breach_detected": decision.breach_detected,
			"txid": txid,
			"block": block_number,
		}));

		if decision.breach_detected {
			metrics::BREACHES_DETECTED.inc();
			self.dispatch_alert(contract, &decision).await;
		}

		1
	}

	async fn dispatch_alert(&self, contract: &Contract, decision: &ClassificationResult) {
		let subject = breach_subject(contract, "Log");
		let body = breach_body(contract, "Log", decision);
		let outcome = self
			.notifier
			.send(&contract.owner_email, &subject, &body)
			.await;
		if !outcome.success {
			warn!(
				to = %contract.owner_email,
				error = outcome.error.as_deref().unwrap_or("unknown"),
				"breach alert delivery failed"
			);
		}
	}
}
