//! Spoon agent classification tier.
//!
//! Primary provider: posts the prompt to a SpoonOS agent runner and expects
//! the classification JSON back. The runner wraps its reply either as
//! `{"output": "..."}` or as the bare classification object; both shapes
//! are accepted. Without a configured runner endpoint this tier is skipped
//! entirely.

use async_trait::async_trait;
use prometheus::IntCounter;
use serde_json::{json, Value};
use std::time::Duration;

use crate::{
	models::{ClassificationResult, Contract, SpoonAgentConfig},
	services::classifier::{build_prompt, Classifier, ClassifierError},
	utils::metrics,
};

const AGENT_TIMEOUT: Duration = Duration::from_secs(20);

/// Spoon agent runner client
pub struct SpoonClassifier {
	config: SpoonAgentConfig,
	client: reqwest::Client,
}

impl SpoonClassifier {
	pub fn new(config: SpoonAgentConfig) -> Self {
		Self {
			config,
			client: reqwest::Client::new(),
		}
	}
}

#[async_trait]
impl Classifier for SpoonClassifier {
	fn name(&self) -> &'static str {
		"spoon"
	}

	fn is_available(&self) -> bool {
		self.config.endpoint.is_some()
	}

	fn calls_counter(&self) -> &'static IntCounter {
		&metrics::SPOON_CALLS
	}

	async fn classify(
		&self,
		payload: &Value,
		contract: &Contract,
	) -> Result<ClassificationResult, ClassifierError> {
		let endpoint = self
			.config
			.endpoint
			.as_deref()
			.ok_or(ClassifierError::NotConfigured("spoon"))?;

		let body = json!({
			"llm_provider": self.config.llm_provider,
			"model_name": self.config.model,
			"prompt": build_prompt(payload, contract),
		});

		let response = self
			.client
			.post(endpoint)
			.timeout(AGENT_TIMEOUT)
			.json(&body)
			.send()
			.await
			.map_err(|e| ClassifierError::RequestError(e.to_string()))?;

		if !response.status().is_success() {
			return Err(ClassifierError::RequestError(format!(
				"agent runner status {}",
				response.status()
			)));
		}

		let text = response
			.text()
			.await
			.map_err(|e| ClassifierError::RequestError(e.to_string()))?;

		// Unwrap an {"output": "..."} envelope when present.
		let output = match serde_json::from_str::<Value>(&text) {
			Ok(value) => value
				.get("output")
				.and_then(Value::as_str)
				.map(str::to_string)
				.unwrap_or(text),
			Err(_) => text,
		};

		if output.trim().is_empty() {
			return Err(ClassifierError::EmptyResponse);
		}

		ClassificationResult::from_provider_text(&output)
			.ok_or(ClassifierError::UnparseableResponse)
	}
}
