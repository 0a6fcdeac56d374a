//! Owner notification services.
//!
//! The scan loops talk to one [`AlertNotifier`] contract: send a subject
//! and body to an address and report the outcome. Failures are outcomes,
//! not errors — nothing here may propagate into a scan loop. Email is the
//! delivery channel; voice synthesis is a best-effort garnish whose result
//! is folded into the email body when it works.

mod email;
mod voice;

pub use email::EmailNotifier;
pub use voice::VoiceSynthesizer;

use async_trait::async_trait;

use crate::models::{ClassificationResult, Contract};

/// Result of one notification attempt
#[derive(Debug, Clone)]
pub struct AlertOutcome {
	pub success: bool,
	pub error: Option<String>,
}

impl AlertOutcome {
	pub fn ok() -> Self {
		Self {
			success: true,
			error: None,
		}
	}

	pub fn failed(error: impl Into<String>) -> Self {
		Self {
			success: false,
			error: Some(error.into()),
		}
	}
}

/// Outbound notification contract consumed by the scanners
#[async_trait]
pub trait AlertNotifier: Send + Sync {
	async fn send(&self, to: &str, subject: &str, body: &str) -> AlertOutcome;
}

/// Subject line for a breach alert.
pub fn breach_subject(contract: &Contract, event_name: &str) -> String {
	format!("Sentinel Alert: {} - {}", contract.label(), event_name)
}

/// Plain-text body for a breach alert.
pub fn breach_body(contract: &Contract, event_name: &str, result: &ClassificationResult) -> String {
	format!(
		"Breach detected on contract {}\nEvent: {}\nSeverity: {}\nReason: {}\nRecommended Action: {}\n",
		contract.contract_hash,
		event_name,
		result.severity,
		result.reason,
		result.recommended_action,
	)
}

/// Spoken-alert script handed to voice synthesis.
pub fn voice_script(contract: &Contract, event_name: &str, result: &ClassificationResult) -> String {
	format!(
		"Alert. Contract {} emitted {}. Severity {}. {}. Recommended action: {}",
		contract.label(),
		event_name,
		result.severity,
		result.reason,
		result.recommended_action,
	)
}
