//! Account-chain scanner integration tests against a mock Neo node.

use serde_json::json;
use std::sync::Arc;

use chain_sentinel::{
	models::{NeoScanConfig, Severity},
	repositories::{ContractRepository, ContractRepositoryTrait},
	services::{
		bus::EventBus,
		classifier::ClassificationService,
		notification::VoiceSynthesizer,
		scanner::{NeoScanner, ScanSummary},
	},
};

use crate::integration::mocks::{
	create_test_contract, mock_application_log, mock_block, mock_block_count, neo_config,
	unconfigured_gemini, unconfigured_spoon, unconfigured_voice, CaptureNotifier,
	MockContractRepo,
};

fn build_scanner(
	config: NeoScanConfig,
	repository: Arc<dyn ContractRepositoryTrait>,
	notifier: Arc<CaptureNotifier>,
	bus: Arc<EventBus>,
) -> NeoScanner {
	let classifier = Arc::new(ClassificationService::from_config(
		&unconfigured_spoon(),
		&unconfigured_gemini(),
	));
	let voice = Arc::new(VoiceSynthesizer::new(unconfigured_voice()));
	NeoScanner::new(config, repository, classifier, notifier, voice, bus).unwrap()
}

#[tokio::test]
async fn paused_notification_records_high_severity_event_and_alerts() {
	let mut server = mockito::Server::new_async().await;
	mock_block_count(&mut server, 101).await;
	mock_block(&mut server, 100, json!([{"hash": "0xtx1"}])).await;
	mock_application_log(
		&mut server,
		"0xtx1",
		json!([
			{"contract": "0xaaa111", "eventname": "", "state": []},
			{"contract": "0xaaa111", "eventname": "Paused", "state": []},
		]),
	)
	.await;

	let repository = Arc::new(ContractRepository::with_contracts(vec![create_test_contract(
		"c1", "0xAAA111",
	)]));
	let notifier = Arc::new(CaptureNotifier::new());
	let bus = Arc::new(EventBus::new());
	let mut subscription = bus.subscribe();

	let scanner = build_scanner(
		neo_config(&server.url(), 1),
		repository.clone(),
		notifier.clone(),
		bus,
	);
	let summary = scanner.run_once().await;

	assert_eq!(
		summary,
		ScanSummary {
			scanned_blocks: 1,
			events_recorded: 1,
		}
	);

	let events = repository.events();
	assert_eq!(events.len(), 1);
	assert_eq!(events[0].event_name, "Paused");
	assert_eq!(events[0].severity, Severity::High);
	assert!(events[0].breach_detected);
	assert_eq!(events[0].txid, "0xtx1");
	assert_eq!(events[0].block, 100);

	// Exactly one alert attempt for the breach-positive event.
	let sent = notifier.sent();
	assert_eq!(sent.len(), 1);
	assert_eq!(sent[0].0, "owner@example.com");
	assert!(sent[0].1.contains("Paused"));
	assert!(sent[0].2.contains("Severity: high"));

	// Pipeline activity was broadcast on the bus.
	let message = subscription.try_recv().expect("bus message");
	assert_eq!(message["type"], "event");
	assert_eq!(message["event_name"], "Paused");
	assert_eq!(message["severity"], "high");
	assert_eq!(message["breach_detected"], true);
}

#[tokio::test]
async fn plain_transfer_records_routine_event_without_alert() {
	let mut server = mockito::Server::new_async().await;
	mock_block_count(&mut server, 51).await;
	mock_block(&mut server, 50, json!([{"hash": "0xtx2"}])).await;
	mock_application_log(
		&mut server,
		"0xtx2",
		json!([{"contract": "0xbbb222", "eventname": "Transfer", "state": []}]),
	)
	.await;

	let repository = Arc::new(ContractRepository::with_contracts(vec![create_test_contract(
		"c2", "0xBBB222",
	)]));
	let notifier = Arc::new(CaptureNotifier::new());

	let scanner = build_scanner(
		neo_config(&server.url(), 1),
		repository.clone(),
		notifier.clone(),
		Arc::new(EventBus::new()),
	);
	let summary = scanner.run_once().await;

	assert_eq!(summary.events_recorded, 1);
	let events = repository.events();
	assert_eq!(events[0].severity, Severity::Low);
	assert!(!events[0].breach_detected);
	assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn byte_reversed_notification_address_still_matches() {
	let mut server = mockito::Server::new_async().await;
	mock_block_count(&mut server, 11).await;
	mock_block(&mut server, 10, json!([{"hash": "0xtx3"}])).await;
	// Registered hash aabbcc reported by the node in reversed byte order.
	mock_application_log(
		&mut server,
		"0xtx3",
		json!([{"contract": "ccbbaa", "eventname": "Paused", "state": []}]),
	)
	.await;

	let repository = Arc::new(ContractRepository::with_contracts(vec![create_test_contract(
		"c3", "aabbcc",
	)]));
	let notifier = Arc::new(CaptureNotifier::new());

	let scanner = build_scanner(
		neo_config(&server.url(), 1),
		repository.clone(),
		notifier.clone(),
		Arc::new(EventBus::new()),
	);
	let summary = scanner.run_once().await;

	assert_eq!(summary.events_recorded, 1);
	assert_eq!(repository.events()[0].event_name, "Paused");
}

#[tokio::test]
async fn governance_event_bypasses_the_allowlist() {
	let mut server = mockito::Server::new_async().await;
	mock_block_count(&mut server, 21).await;
	mock_block(&mut server, 20, json!([{"hash": "0xtx4"}])).await;
	// Different emitting contract and a name outside the allowlist: the
	// governance rule lets it through anyway.
	mock_application_log(
		&mut server,
		"0xtx4",
		json!([{"contract": "0xffff00", "eventname": "ProposalExecuted", "state": []}]),
	)
	.await;

	let mut contract = create_test_contract("c4", "0xccc333");
	contract.monitoring_events = vec!["Transfer".to_string()];
	let repository = Arc::new(ContractRepository::with_contracts(vec![contract]));
	let notifier = Arc::new(CaptureNotifier::new());

	let scanner = build_scanner(
		neo_config(&server.url(), 1),
		repository.clone(),
		notifier.clone(),
		Arc::new(EventBus::new()),
	);
	let summary = scanner.run_once().await;

	assert_eq!(summary.events_recorded, 1);
	let events = repository.events();
	assert_eq!(events[0].event_name, "ProposalExecuted");
	assert_eq!(events[0].payload["governance"], true);
}

#[tokio::test]
async fn allowlisted_contract_drops_unlisted_events() {
	let mut server = mockito::Server::new_async().await;
	mock_block_count(&mut server, 31).await;
	mock_block(&mut server, 30, json!([{"hash": "0xtx5"}])).await;
	mock_application_log(
		&mut server,
		"0xtx5",
		json!([{"contract": "0xddd444", "eventname": "Approval", "state": []}]),
	)
	.await;

	let mut contract = create_test_contract("c5", "0xddd444");
	contract.monitoring_events = vec!["Transfer".to_string()];
	let repository = Arc::new(ContractRepository::with_contracts(vec![contract]));
	let notifier = Arc::new(CaptureNotifier::new());

	let scanner = build_scanner(
		neo_config(&server.url(), 1),
		repository.clone(),
		notifier.clone(),
		Arc::new(EventBus::new()),
	);
	let summary = scanner.run_once().await;

	assert_eq!(summary.events_recorded, 0);
	assert!(repository.events().is_empty());
	assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn run_once_with_no_active_contracts_returns_zeros() {
	// Unreachable node: with nothing to scan, no RPC call is even made.
	let repository = Arc::new(ContractRepository::new());
	let notifier = Arc::new(CaptureNotifier::new());

	let scanner = build_scanner(
		neo_config("http://127.0.0.1:9", 2000),
		repository,
		notifier,
		Arc::new(EventBus::new()),
	);
	let summary = scanner.run_once().await;

	assert_eq!(summary, ScanSummary::default());
}

#[tokio::test]
async fn default_owner_contact_backfills_empty_registrations() {
	let mut contract = create_test_contract("c7", "0xeee777");
	contract.owner_email = String::new();
	let repository = ContractRepository::with_contracts(vec![contract]);
	repository.apply_default_owner("fallback@example.com");

	let contracts = repository.list_active_contracts().await.unwrap();
	assert_eq!(contracts[0].owner_email, "fallback@example.com");
}

#[tokio::test]
async fn repository_failure_is_contained() {
	use chain_sentinel::repositories::RepositoryError;

	let mut repository = MockContractRepo::new();
	repository
		.expect_list_active_contracts()
		.returning(|| Err(RepositoryError::internal_error("store offline")));

	let notifier = Arc::new(CaptureNotifier::new());
	let scanner = build_scanner(
		neo_config("http://127.0.0.1:9", 2000),
		Arc::new(repository),
		notifier,
		Arc::new(EventBus::new()),
	);

	// Both network passes fail; the summary degrades to zeros, no panic.
	let summary = scanner.run_once().await;
	assert_eq!(summary, ScanSummary::default());
}
