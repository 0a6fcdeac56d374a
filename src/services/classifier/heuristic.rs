//! Deterministic fallback classification.
//!
//! The terminal tier of the chain: an ordered rule table over the
//! lower-cased event name. First matching rule wins; no rule means a
//! routine, low-severity event. This tier has no external dependencies and
//! never fails, which is what makes the whole chain total.

use async_trait::async_trait;
use prometheus::IntCounter;
use serde_json::Value;

use crate::{
	models::{ClassificationResult, Contract, Severity},
	services::classifier::{Classifier, ClassifierError},
	utils::metrics,
};

struct HeuristicRule {
	/// Every fragment must appear in the lower-cased event name
	name_fragments: &'static [&'static str],
	severity: Severity,
	reason: &'static str,
	recommended_action: &'static str,
}

/// Ordered: the first matching rule decides the outcome.
const BREACH_RULES: &[HeuristicRule] = &[
	HeuristicRule {
		name_fragments: &["ownership", "transfer"],
		severity: Severity::Critical,
		reason: "Ownership transferred; potential takeover risk.",
		recommended_action: "Pause contract and verify owner keys.",
	},
	HeuristicRule {
		name_fragments: &["pause"],
		severity: Severity::High,
		reason: "Contract paused unexpectedly.",
		recommended_action: "Investigate caller; restore operations if safe.",
	},
	HeuristicRule {
		name_fragments: &["mint"],
		severity: Severity::Medium,
		reason: "Mint operation detected; check limits and roles.",
		recommended_action: "Audit recent mints and role assignments.",
	},
];

/// Applies the rule table to an event payload.
pub fn evaluate(payload: &Value) -> ClassificationResult {
	let name = payload
		.get("event_name")
		.or_else(|| payload.get("event"))
		.and_then(Value::as_str)
		.unwrap_or("")
		.to_lowercase();

	for rule in BREACH_RULES {
		if rule.name_fragments.iter().all(|part| name.contains(part)) {
			return ClassificationResult {
				breach_detected: true,
				severity: rule.severity,
				reason: rule.reason.to_string(),
				recommended_action: rule.recommended_action.to_string(),
			};
		}
	}

	ClassificationResult {
		breach_detected: false,
		severity: Severity::Low,
		reason: "Routine event".to_string(),
		recommended_action: "Monitor".to_string(),
	}
}

/// Rule-table classification tier
pub struct HeuristicClassifier;

#[async_trait]
impl Classifier for HeuristicClassifier {
	fn name(&self) -> &'static str {
		"heuristic"
	}

	fn calls_counter(&self) -> &'static IntCounter {
		&metrics::HEURISTIC_CALLS
	}

	async fn classify(
		&self,
		payload: &Value,
		_contract: &Contract,
	) -> Result<ClassificationResult, ClassifierError> {
		Ok(evaluate(payload))
	}
}
