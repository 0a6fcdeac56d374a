//! Classification chain integration tests against mock provider endpoints.

use serde_json::json;
use std::sync::Arc;

use chain_sentinel::{
	models::{Severity, SpoonAgentConfig},
	services::classifier::ClassificationService,
	utils::metrics,
};

use crate::integration::mocks::{create_test_contract, unconfigured_gemini, unconfigured_spoon};

fn spoon_config(endpoint: &str) -> SpoonAgentConfig {
	SpoonAgentConfig {
		endpoint: Some(endpoint.to_string()),
		llm_provider: "google".to_string(),
		model: "gemini-2.5-pro".to_string(),
	}
}

#[tokio::test]
async fn spoon_tier_wins_when_it_answers_well() {
	let mut server = mockito::Server::new_async().await;
	let verdict = json!({
		"breach_detected": false,
		"severity": "low",
		"reason": "Scheduled upgrade announced by the team",
		"recommended_action": "No action needed",
	});
	let agent = server
		.mock("POST", "/")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(json!({"output": verdict.to_string()}).to_string())
		.expect(1)
		.create_async()
		.await;

	let before = metrics::SPOON_CALLS.get();
	let service =
		ClassificationService::from_config(&spoon_config(&server.url()), &unconfigured_gemini());
	let result = service
		.classify(
			&json!({"event_name": "UpgradeTo"}),
			&create_test_contract("c1", "0xaaa"),
		)
		.await;

	agent.assert_async().await;
	assert!(!result.breach_detected);
	assert_eq!(result.reason, "Scheduled upgrade announced by the team");
	assert!(metrics::SPOON_CALLS.get() >= before + 1);
}

#[tokio::test]
async fn unusable_agent_output_falls_through_to_the_heuristic() {
	let mut server = mockito::Server::new_async().await;
	// Two attempts per tier: the agent is consulted twice before demotion.
	let agent = server
		.mock("POST", "/")
		.with_status(200)
		.with_body("I could not decide, sorry.")
		.expect(2)
		.create_async()
		.await;

	let service =
		ClassificationService::from_config(&spoon_config(&server.url()), &unconfigured_gemini());
	let result = service
		.classify(
			&json!({"event_name": "Paused"}),
			&create_test_contract("c2", "0xbbb"),
		)
		.await;

	agent.assert_async().await;
	assert!(result.breach_detected);
	assert_eq!(result.severity, Severity::High);
	assert_eq!(result.reason, "Contract paused unexpectedly.");
}

#[tokio::test]
async fn non_boolean_breach_flag_counts_as_a_miss() {
	let mut server = mockito::Server::new_async().await;
	server
		.mock("POST", "/")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(json!({"output": "{\"breach_detected\": \"yes\"}"}).to_string())
		.create_async()
		.await;

	let service =
		ClassificationService::from_config(&spoon_config(&server.url()), &unconfigured_gemini());
	let result = service
		.classify(
			&json!({"event_name": "TokensMinted"}),
			&create_test_contract("c3", "0xccc"),
		)
		.await;

	// Heuristic verdict, not the malformed provider one.
	assert!(result.breach_detected);
	assert_eq!(result.severity, Severity::Medium);
}

#[tokio::test]
async fn failing_agent_endpoint_degrades_to_the_heuristic() {
	let mut server = mockito::Server::new_async().await;
	server
		.mock("POST", "/")
		.with_status(503)
		.create_async()
		.await;

	let before = metrics::HEURISTIC_CALLS.get();
	let service =
		ClassificationService::from_config(&spoon_config(&server.url()), &unconfigured_gemini());
	let result = service
		.classify(
			&json!({"event_name": "Transfer"}),
			&create_test_contract("c4", "0xddd"),
		)
		.await;

	assert!(!result.breach_detected);
	assert_eq!(result.reason, "Routine event");
	assert!(metrics::HEURISTIC_CALLS.get() >= before + 1);
}

#[tokio::test]
async fn bare_classification_object_from_the_agent_is_accepted() {
	let mut server = mockito::Server::new_async().await;
	// Runner replying with the classification object directly, no envelope.
	server
		.mock("POST", "/")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			json!({
				"breach_detected": true,
				"severity": "high",
				"reason": "Pause from a non-admin caller",
				"recommended_action": "Rotate admin keys",
			})
			.to_string(),
		)
		.create_async()
		.await;

	let service =
		ClassificationService::from_config(&spoon_config(&server.url()), &unconfigured_gemini());
	let result = service
		.classify(
			&json!({"event_name": "Paused"}),
			&create_test_contract("c5", "0xeee"),
		)
		.await;

	assert!(result.breach_detected);
	assert_eq!(result.severity, Severity::High);
	assert_eq!(result.recommended_action, "Rotate admin keys");
}

#[tokio::test]
async fn fully_unconfigured_chain_still_returns_a_result() {
	let service =
		ClassificationService::from_config(&unconfigured_spoon(), &unconfigured_gemini());
	let result = service
		.classify(
			&json!({"event_name": "OwnershipTransferred"}),
			&create_test_contract("c6", "0xfff"),
		)
		.await;
	assert!(result.breach_detected);
	assert_eq!(result.severity, Severity::Critical);
}
