//! Account-chain (Neo N3) scanner.
//!
//! Polls testnet and mainnet nodes for application-log notifications
//! emitted by monitored contracts, walking every block in the window
//! `[cursor_or(height - scan_back), height)`. A notification is relevant
//! when its contract address matches in either byte order, or when its
//! name is governance-flavored (those bypass per-contract allowlists).
//! Matches flow through classification, the bus, persistence, and — on a
//! breach — owner alerting with a best-effort voice explanation.
//!
//! The loop is supervised from inside: any pass error is logged and the
//! scanner sleeps until the next tick. Cursors advance to the observed
//! height even when individual blocks failed, so one bad block cannot
//! wedge a contract forever.

use chrono::Utc;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::{
	models::{ChainKind, ClassificationResult, Contract, NetworkKind, NeoScanConfig},
	repositories::ContractRepositoryTrait,
	services::{
		blockchain::NeoClient,
		bus::EventBus,
		classifier::ClassificationService,
		notification::{breach_body, breach_subject, voice_script, AlertNotifier, VoiceSynthesizer},
		scanner::{
			is_governance_event, normalize_address, reverse_hex_pairs, ScanCursorStore,
			ScanSummary, ScannerError, ScannerHealth,
		},
	},
	utils::metrics,
};

/// Polling scanner for Neo N3 networks
pub struct NeoScanner {
	config: NeoScanConfig,
	repository: Arc<dyn ContractRepositoryTrait>,
	classifier: Arc<ClassificationService>,
	notifier: Arc<dyn AlertNotifier>,
	voice: Arc<VoiceSynthesizer>,
	bus: Arc<EventBus>,
	clients: HashMap<NetworkKind, NeoClient>,
}

impl NeoScanner {
	pub fn new(
		config: NeoScanConfig,
		repository: Arc<dyn ContractRepositoryTrait>,
		classifier: Arc<ClassificationService>,
		notifier: Arc<dyn AlertNotifier>,
		voice: Arc<VoiceSynthesizer>,
		bus: Arc<EventBus>,
	) -> Result<Self, ScannerError> {
		let mut clients = HashMap::new();
		clients.insert(
			NetworkKind::Testnet,
			NeoClient::new(&config.rpc_url_testnet)
				.map_err(|e| ScannerError::client_error(e.to_string()))?,
		);
		clients.insert(
			NetworkKind::Mainnet,
			NeoClient::new(&config.rpc_url_mainnet)
				.map_err(|e| ScannerError::client_error(e.to_string()))?,
		);
		Ok(Self {
			config,
			repository,
			classifier,
			notifier,
			voice,
			bus,
			clients,
		})
	}

	/// Runs until process shutdown, one pass per polling interval
	pub async fn run(&self, health: ScannerHealth) {
		info!(
			interval_secs = self.config.interval.as_secs(),
			scan_back = self.config.scan_back,
			"neo scanner started"
		);
		let mut cursors: HashMap<NetworkKind, ScanCursorStore> = HashMap::new();
		loop {
			for network in [NetworkKind::Testnet, NetworkKind::Mainnet] {
				let store = cursors.entry(network).or_default();
				match self.scan_network(network, store).await {
					Ok(summary) => {
						if summary.events_recorded > 0 {
							info!(
								network = %network,
								events = summary.events_recorded,
								blocks = summary.scanned_blocks,
								"neo scan pass recorded events"
							);
						}
					}
					Err(e) => error!(network = %network, error = %e, "neo scan pass failed"),
				}
			}
			health.beat();
			tokio::time::sleep(self.config.interval).await;
		}
	}

	/// One pass over both networks with fresh cursors.
	///
	/// With no active contracts this returns all-zero totals. Pass errors
	/// are swallowed into the totals, mirroring the loop's containment.
	pub async fn run_once(&self) -> ScanSummary {
		let mut total = ScanSummary::default();
		for network in [NetworkKind::Testnet, NetworkKind::Mainnet] {
			let mut store = ScanCursorStore::new();
			match self.scan_network(network, &mut store).await {
				Ok(summary) => total.merge(&summary),
				Err(e) => error!(network = %network, error = %e, "neo scan pass failed"),
			}
		}
		total
	}

	/// Scans every active Neo contract on one network
	async fn scan_network(
		&self,
		network: NetworkKind,
		store: &mut ScanCursorStore,
	) -> Result<ScanSummary, ScannerError> {
		let mut summary = ScanSummary::default();

		let contracts: Vec<Contract> = self
			.repository
			.list_active_contracts()
			.await
			.map_err(|e| ScannerError::repository_error(e.to_string()))?
			.into_iter()
			.filter(|c| c.chain == ChainKind::Neo && c.network == network)
			.collect();
		if contracts.is_empty() {
			return Ok(summary);
		}

		let client = self
			.clients
			.get(&network)
			.ok_or_else(|| ScannerError::client_error(format!("no client for {}", network)))?;
		let height = client.get_block_count().await;

		for contract in &contracts {
			let normalized = normalize_address(&contract.contract_hash);
			let start = store.start_for(&normalized, height, self.config.scan_back);
			for index in start..height {
				summary.scanned_blocks += 1;
				let block = client.get_block(index).await;
				let Some(txs) = block.get("tx").and_then(Value::as_array) else {
					continue;
				};
				for tx in txs {
					let Some(txid) = tx.get("hash").and_then(Value::as_str) else {
						continue;
					};
					let app_log = client.get_application_log(txid).await;
					let Some(executions) = app_log.get("executions").and_then(Value::as_array)
					else {
						continue;
					};
					for execution in executions {
						let Some(notifications) =
							execution.get("notifications").and_then(Value::as_array)
						else {
							continue;
						};
						for notification in notifications {
							summary.events_recorded += self
								.process_notification(
									network,
									contract,
									&normalized,
									txid,
									index,
									notification,
								)
								.await;
						}
					}
				}
			}
			// Advanced even when blocks inside the window errored: a
			// permanently failing block is skipped, not retried forever.
			store.advance(&normalized, height);
		}

		Ok(summary)
	}

	/// Filters, classifies, records, and alerts for one notification.
	/// Returns 1 when an event was recorded.
	async fn process_notification(
		&self,
		network: NetworkKind,
		contract: &Contract,
		contract_normalized: &str,
		txid: &str,
		block_index: u64,
		notification: &Value,
	) -> u64 {
		let event_name = notification
			.get("eventname")
			.and_then(Value::as_str)
			.unwrap_or("");
		if event_name.is_empty() {
			return 0;
		}

		let notification_address = normalize_address(
			notification
				.get("contract")
				.and_then(Value::as_str)
				.unwrap_or(""),
		);
		let governance_hit = is_governance_event(event_name);
		let address_hit = notification_address == contract_normalized
			|| notification_address == reverse_hex_pairs(contract_normalized);
		if !address_hit && !governance_hit {
			return 0;
		}
		// The owner's allowlist filters ordinary events; governance events
		// always pass through.
		if !contract.monitoring_events.is_empty()
			&& !contract.monitoring_events.iter().any(|e| e == event_name)
			&& !governance_hit
		{
			return 0;
		}

		let mut payload = json!({
			"event_name": event_name,
			"txid": txid,
			"block": block_index,
			"notification": notification,
		});
		if governance_hit {
			payload["governance"] = json!(true);
		}

		let decision = self.classifier.classify(&payload, contract).await;

		if let Err(e) = self
			.repository
			.record_event(
				&contract.id,
				event_name,
				Utc::now().timestamp(),
				payload.clone(),
				decision.severity,
				decision.breach_detected,
				&decision.recommended_action,
			)
			.await
		{
			// Fire-and-forget: a persistence outage must not stall the scan.
			debug!(contract = %contract.id, error = %e, "event persistence failed");
		}
		metrics::EVENTS_RECORDED.inc();

		self.bus.publish(json!({
			"type": "event",
			"network": network.to_string(),
			"contract_id": contract.id,
			"event_name": event_name,
			"severity": decision.severity,
			"breach_detected": decision.breach_detected,
			"txid": txid,
			"block": block_index,
		}));

		if decision.breach_detected {
			metrics::BREACHES_DETECTED.inc();
			self.dispatch_alert(contract, event_name, &decision).await;
		}

		1
	}

	/// Emails the owner, folding in a voice explanation when synthesis works
	async fn dispatch_alert(
		&self,
		contract: &Contract,
		event_name: &str,
		decision: &ClassificationResult,
	) {
		let subject = breach_subject(contract, event_name);
		let mut body = breach_body(contract, event_name, decision);
		if let Some(audio_path) = self
			.voice
			.synthesize(&voice_script(contract, event_name, decision))
			.await
		{
			body.push_str(&format!(
				"\nVoice explanation saved: {}\n",
				audio_path.display()
			));
		}
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
