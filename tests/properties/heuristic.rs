//! Determinism properties of the heuristic classification tier.

use proptest::prelude::*;
use serde_json::json;

use chain_sentinel::services::classifier::heuristic::evaluate;

proptest! {
	// Total: any event name yields a verdict, and the heuristic only
	// breaches with an elevated severity.
	#[test]
	fn any_event_name_gets_a_consistent_verdict(name in ".{0,64}") {
		let result = evaluate(&json!({"event_name": name}));
		prop_assert_eq!(
			result.breach_detected,
			result.severity != chain_sentinel::models::Severity::Low
		);
	}

	// The letters a-n cannot spell "ownership", "transfer", or "mint", so
	// any name built this way hits exactly the pause rule.
	#[test]
	fn pause_names_are_always_high_severity(
		prefix in "[a-n]{0,8}",
		suffix in "[a-n]{0,8}",
	) {
		let name = format!("{}pause{}", prefix, suffix);
		let result = evaluate(&json!({"event_name": name}));
		prop_assert!(result.breach_detected);
		prop_assert_eq!(result.severity, chain_sentinel::models::Severity::High);
	}

	// Same input, same verdict: the tier is deterministic.
	#[test]
	fn evaluation_is_deterministic(name in ".{0,64}") {
		let payload = json!({"event_name": name});
		prop_assert_eq!(evaluate(&payload), evaluate(&payload));
	}
}
