use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Severity assigned to a classified event.
#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	#[default]
	Low,
	Medium,
	High,
	Critical,
}

impl Severity {
	/// Parses a provider-supplied severity string, defaulting to `Low` for
	/// anything unrecognized.
	pub fn parse(value: &str) -> Self {
		match value.trim().to_lowercase().as_str() {
			"medium" => Self::Medium,
			"high" => Self::High,
			"critical" => Self::Critical,
			_ => Self::Low,
		}
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Low => write!(f, "low"),
			Self::Medium => write!(f, "medium"),
			Self::High => write!(f, "high"),
			Self::Critical => write!(f, "critical"),
		}
	}
}

/// Outcome of running one detected event through the classification chain.
///
/// Produced fresh per event and never mutated afterwards.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ClassificationResult {
	pub breach_detected: bool,
	pub severity: Severity,
	pub reason: String,
	pub recommended_action: String,
}

impl ClassificationResult {
	/// Coerces a raw provider response into the canonical result shape.
	///
	/// The response must be a JSON object carrying a boolean
	/// `breach_detected`; everything else is coerced with defaults (missing
	/// severity becomes `low`, missing strings become empty). Returns `None`
	/// when the text is not such an object, which the caller treats as a
	/// provider miss.
	pub fn from_provider_text(text: &str) -> Option<Self> {
		let value: Value = serde_json::from_str(text).ok()?;
		let object = value.as_object()?;
		let breach_detected = object.get("breach_detected")?.as_bool()?;
		let severity = object
			.get("severity")
			.and_then(Value::as_str)
			.map(Severity::parse)
			.unwrap_or_default();
		let reason = object
			.get("reason")
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_string();
		let recommended_action = object
			.get("recommended_action")
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_string();
		Some(Self {
			breach_detected,
			severity,
			reason,
			recommended_action,
		})
	}
}

/// One detected on-chain occurrence, classified and ready for persistence.
///
/// Created exactly once per detection and immutable after creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractEvent {
	pub id: String,
	pub contract_id: String,
	pub event_name: String,
	/// Unix timestamp of detection (block time when resolvable).
	pub timestamp: i64,
	pub block: u64,
	pub txid: String,
	/// Chain-specific raw payload, opaque to the pipeline.
	pub payload: Value,
	pub severity: Severity,
	pub breach_detected: bool,
	pub recommended_action: String,
}
