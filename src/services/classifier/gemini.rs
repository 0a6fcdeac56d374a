//! Gemini HTTP classification tier.
//!
//! Secondary provider: a direct `generateContent` call against the Gemini
//! REST API. Only consulted when the configured default provider is
//! `gemini` and an API key is present; anything less is a silent skip, not
//! a retry-consuming failure.

use async_trait::async_trait;
use prometheus::IntCounter;
use serde_json::{json, Value};
use std::time::Duration;

use crate::{
	models::{ClassificationResult, Contract, GeminiConfig},
	services::classifier::{build_prompt, Classifier, ClassifierError},
	utils::metrics,
};

const GEMINI_TIMEOUT: Duration = Duration::from_secs(20);

/// Gemini REST API client
pub struct GeminiClassifier {
	config: GeminiConfig,
	client: reqwest::Client,
}

impl GeminiClassifier {
	pub fn new(config: GeminiConfig) -> Self {
		Self {
			config,
			client: reqwest::Client::new(),
		}
	}
}

#[async_trait]
impl Classifier for GeminiClassifier {
	fn name(&self) -> &'static str {
		"gemini"
	}

	fn is_available(&self) -> bool {
		self.config.provider == "gemini" && self.config.api_key.is_some()
	}

	fn calls_counter(&self) -> &'static IntCounter {
		&metrics::GEMINI_CALLS
	}

	async fn classify(
		&self,
		payload: &Value,
		contract: &Contract,
	) -> Result<ClassificationResult, ClassifierError> {
		let api_key = self
			.config
			.api_key
			.as_deref()
			.ok_or(ClassifierError::NotConfigured("gemini"))?;

		let url = format!(
			"{}/v1beta/models/{}:generateContent?key={}",
			self.config.api_base, self.config.model, api_key
		);

		let body = json!({
			"contents": [{"role": "user", "parts": [{"text": build_prompt(payload, contract)}]}],
			"generationConfig": {
				"maxOutputTokens": self.config.max_tokens,
				"temperature": 0.2,
			},
		});

		let response = self
			.client
			.post(&url)
			.timeout(GEMINI_TIMEOUT)
			.json(&body)
			.send()
			.await
			.map_err(|e| ClassifierError::RequestError(e.to_string()))?;

		if !response.status().is_success() {
			return Err(ClassifierError::RequestError(format!(
				"gemini status {}",
				response.status()
			)));
		}

		let data: Value = response
			.json()
			.await
			.map_err(|e| ClassifierError::RequestError(e.to_string()))?;

		let text = data
			.pointer("/candidates/0/content/parts/0/text")
			.and_then(Value::as_str)
			.ok_or(ClassifierError::EmptyResponse)?;

		ClassificationResult::from_provider_text(text).ok_or(ClassifierError::UnparseableResponse)
	}
}
