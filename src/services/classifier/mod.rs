//! Event classification services.
//!
//! Every detected event is scored against its contract by an ordered chain
//! of providers behind one [`Classifier`] interface: the Spoon agent first,
//! the Gemini HTTP API next, and a deterministic heuristic last. Each tier
//! gets two attempts with a fixed pause; a tier that is unconfigured is
//! skipped silently. The heuristic cannot fail, so `classify` is total —
//! the scan loops never see a classification error.

mod error;
mod gemini;
pub mod heuristic;
mod spoon;

pub use error::ClassifierError;
pub use gemini::GeminiClassifier;
pub use heuristic::HeuristicClassifier;
pub use spoon::SpoonClassifier;

use async_trait::async_trait;
use prometheus::IntCounter;
use serde_json::Value;
use tracing::debug;

use crate::{
	models::{ClassificationResult, Contract, GeminiConfig, SpoonAgentConfig},
	utils::{metrics, WithRetry},
};

/// Builds the provider prompt from contract metadata and the event payload.
pub fn build_prompt(payload: &Value, contract: &Contract) -> String {
	format!(
		"You are a breach-detection agent for smart contracts. Given the contract metadata \
		 and a single emitted event, decide if it indicates a malicious or risky action. \
		 Return a JSON with keys: breach_detected (bool), severity (low/medium/high/critical), \
		 reason (string), recommended_action (string).\n\nContract: {}\nEvent: {}\n",
		serde_json::to_string(contract).unwrap_or_default(),
		payload,
	)
}

/// One tier in the classification chain
#[async_trait]
pub trait Classifier: Send + Sync {
	/// Short provider name for logs
	fn name(&self) -> &'static str;

	/// Whether the provider has enough configuration to be worth calling.
	/// Unavailable providers are skipped without consuming retry attempts.
	fn is_available(&self) -> bool {
		true
	}

	/// Counter bumped when this tier produces the final result
	fn calls_counter(&self) -> &'static IntCounter;

	/// Scores one event against its contract
	async fn classify(
		&self,
		payload: &Value,
		contract: &Contract,
	) -> Result<ClassificationResult, ClassifierError>;
}

/// First-success-wins composition of classification tiers
pub struct ClassificationService {
	providers: Vec<Box<dyn Classifier>>,
	retry: WithRetry,
}

impl ClassificationService {
	pub fn new(providers: Vec<Box<dyn Classifier>>) -> Self {
		Self {
			providers,
			retry: WithRetry::with_default_config(),
		}
	}

	/// Builds the standard chain: Spoon agent, Gemini, heuristic.
	pub fn from_config(spoon: &SpoonAgentConfig, gemini: &GeminiConfig) -> Self {
		Self::new(vec![
			Box::new(SpoonClassifier::new(spoon.clone())),
			Box::new(GeminiClassifier::new(gemini.clone())),
			Box::new(HeuristicClassifier),
		])
	}

	/// Classifies one event. Total: some tier always answers.
	pub async fn classify(&self, payload: &Value, contract: &Contract) -> ClassificationResult {
		for provider in &self.providers {
			if !provider.is_available() {
				continue;
			}
			match self
				.retry
				.attempt(|| provider.classify(payload, contract))
				.await
			{
				Ok(result) => {
					provider.calls_counter().inc();
					return result;
				}
				Err(e) => {
					debug!(provider = provider.name(), error = %e, "classification tier missed");
				}
			}
		}

		// Terminal guarantee for provider lists without a heuristic tier.
		metrics::HEURISTIC_CALLS.inc();
		heuristic::evaluate(payload)
	}
}
