//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the pipeline counters incremented by the scanners and the
//!   classification chain; the HTTP surface that exposes them lives outside
//!   this crate and reads `snapshot()`.

use lazy_static::lazy_static;
use prometheus::{IntCounter, Registry};
use std::collections::HashMap;

lazy_static! {
	// Global Prometheus registry.
	pub static ref REGISTRY: Registry = Registry::new();

	// Events recorded across all scanners.
	pub static ref EVENTS_RECORDED: IntCounter = {
		let counter = IntCounter::new("events_recorded", "Detected events recorded").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Events classified as breaches.
	pub static ref BREACHES_DETECTED: IntCounter = {
		let counter =
			IntCounter::new("breaches_detected", "Events classified as breaches").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Classifications produced by the Spoon agent tier.
	pub static ref SPOON_CALLS: IntCounter = {
		let counter =
			IntCounter::new("spoon_calls", "Classifications produced by the Spoon agent").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Classifications produced by the Gemini HTTP tier.
	pub static ref GEMINI_CALLS: IntCounter = {
		let counter =
			IntCounter::new("gemini_calls", "Classifications produced by Gemini").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Classifications that fell through to the deterministic heuristic.
	pub static ref HEURISTIC_CALLS: IntCounter = {
		let counter =
			IntCounter::new("heuristic_calls", "Classifications from the heuristic tier").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};
}

/// Current value of every registered counter, keyed by metric name.
///
/// Read by the external snapshot endpoint; also convenient in tests.
pub fn snapshot() -> HashMap<String, u64> {
	REGISTRY
		.gather()
		.iter()
		.filter_map(|family| {
			let metric = family.get_metric().first()?;
			Some((
				family.get_name().to_string(),
				metric.get_counter().value() as u64,
			))
		})
		.collect()
}
