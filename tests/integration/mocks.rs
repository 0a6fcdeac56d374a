//! Shared mocks and builders for integration tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

use chain_sentinel::{
	models::{
		ChainKind, Contract, ContractEvent, EvmScanConfig, GeminiConfig, NeoScanConfig,
		NetworkKind, Severity, SpoonAgentConfig, VoiceConfig,
	},
	repositories::{ContractRepositoryTrait, RepositoryError},
	services::notification::{AlertNotifier, AlertOutcome},
};

mock! {
	pub ContractRepo {}

	#[async_trait]
	impl ContractRepositoryTrait for ContractRepo {
		async fn list_active_contracts(&self) -> Result<Vec<Contract>, RepositoryError>;

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
}

/// Notifier that records every send attempt and always succeeds
#[derive(Default)]
pub struct CaptureNotifier {
	pub sends: Mutex<Vec<(String, String, String)>>,
}

impl CaptureNotifier {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn sent(&self) -> Vec<(String, String, String)> {
		self.sends.lock().unwrap().clone()
	}
}

#[async_trait]
impl AlertNotifier for CaptureNotifier {
	async fn send(&self, to: &str, subject: &str, body: &str) -> AlertOutcome {
		self.sends
			.lock()
			.unwrap()
			.push((to.to_string(), subject.to_string(), body.to_string()));
		AlertOutcome::ok()
	}
}

pub fn create_test_contract(id: &str, hash: &str) -> Contract {
	Contract {
		id: id.to_string(),
		chain: ChainKind::Neo,
		network: NetworkKind::Testnet,
		contract_hash: hash.to_string(),
		contract_name: Some(format!("contract-{}", id)),
		active: true,
		owner_email: "owner@example.com".to_string(),
		monitoring_events: vec![],
		risk_level: 5,
		breach_vectors: vec!["ownership takeover".to_string()],
		last_report: None,
	}
}

pub fn create_test_evm_contract(id: &str, address: &str) -> Contract {
	Contract {
		chain: ChainKind::Evm,
		..create_test_contract(id, address)
	}
}

/// Neo scanner config pointed at a mock node, with a one-block lookback so
/// tests only serve the windows they mean to.
pub fn neo_config(rpc_url: &str, scan_back: u64) -> NeoScanConfig {
	NeoScanConfig {
		interval: Duration::from_millis(10),
		scan_back,
		rpc_url_testnet: rpc_url.to_string(),
		rpc_url_mainnet: rpc_url.to_string(),
	}
}

pub fn evm_config(provider_url: &str, scan_back: u64) -> EvmScanConfig {
	EvmScanConfig {
		interval: Duration::from_millis(10),
		scan_back,
		provider_url: Some(provider_url.to_string()),
	}
}

/// Spoon tier with no runner endpoint: always skipped.
pub fn unconfigured_spoon() -> SpoonAgentConfig {
	SpoonAgentConfig {
		endpoint: None,
		llm_provider: "google".to_string(),
		model: "gemini-2.5-pro".to_string(),
	}
}

/// Gemini tier with no API key: always skipped.
pub fn unconfigured_gemini() -> GeminiConfig {
	GeminiConfig {
		provider: "gemini".to_string(),
		model: "gemini-2.5-pro".to_string(),
		api_key: None,
		max_tokens: 20000,
		api_base: "https://generativelanguage.googleapis.com".to_string(),
	}
}

/// Voice synthesis with no API key: always yields no audio.
pub fn unconfigured_voice() -> VoiceConfig {
	VoiceConfig {
		api_key: None,
		voice_id: "test-voice".to_string(),
		model_id: "test-model".to_string(),
		api_base: "https://api.elevenlabs.io".to_string(),
		output_dir: std::env::temp_dir().join("chain-sentinel-test-alerts"),
	}
}

/// Mounts a `getblockcount` response on a mock node.
pub async fn mock_block_count(server: &mut mockito::ServerGuard, height: u64) -> mockito::Mock {
	server
		.mock("POST", "/")
		.match_body(mockito::Matcher::PartialJson(
			json!({"method": "getblockcount"}),
		))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(json!({"jsonrpc": "2.0", "id": 1, "result": height}).to_string())
		.create_async()
		.await
}

/// Mounts a verbose `getblock` response for one block index.
pub async fn mock_block(
	server: &mut mockito::ServerGuard,
	index: u64,
	txs: Value,
) -> mockito::Mock {
	server
		.mock("POST", "/")
		.match_body(mockito::Matcher::PartialJson(
			json!({"method": "getblock", "params": [index, 1]}),
		))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			json!({"jsonrpc": "2.0", "id": 1, "result": {"index": index, "tx": txs}}).to_string(),
		)
		.create_async()
		.await
}

/// Mounts a `getapplicationlog` response for one transaction.
pub async fn mock_application_log(
	server: &mut mockito::ServerGuard,
	txid: &str,
	notifications: Value,
) -> mockito::Mock {
	server
		.mock("POST", "/")
		.match_body(mockito::Matcher::PartialJson(
			json!({"method": "getapplicationlog", "params": [txid]}),
		))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			json!({
				"jsonrpc": "2.0",
				"id": 1,
				"result": {
					"txid": txid,
					"executions": [{"trigger": "Application", "notifications": notifications}],
				},
			})
			.to_string(),
		)
		.create_async()
		.await
}
