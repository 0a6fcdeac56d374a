//! Chain scanning services.
//!
//! Two long-lived polling loops — one per chain family — that compose the
//! RPC gateways, the classification chain, the event bus, and the alert
//! dispatcher. Shared here: address normalization (tolerant of the two
//! byte orders a script hash shows up in), the governance event allowlist
//! that bypasses per-contract filters, cursor bookkeeping, and the health
//! beat used for supervision.

mod cursor;
mod error;
mod evm;
mod neo;

pub use cursor::ScanCursorStore;
pub use error::ScannerError;
pub use evm::EvmScanner;
pub use neo::NeoScanner;

use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Event names that are always relevant, whatever a contract's
/// monitored-event allowlist says. Matched as lower-cased substrings.
const GOVERNANCE_EVENTS: [&str; 5] = [
	"upgrade",
	"upgradeto",
	"proposalcreated",
	"proposalexecuted",
	"contractupdated",
];

/// Whether an event name is governance-relevant.
pub fn is_governance_event(event_name: &str) -> bool {
	let lowered = event_name.to_lowercase();
	GOVERNANCE_EVENTS.iter().any(|name| lowered.contains(name))
}

/// Lower-cases an address-ish string and strips any `0x` prefix.
pub fn normalize_address(address: &str) -> String {
	address.trim().to_lowercase().replace("0x", "")
}

/// Reverses a hex string byte-wise (pairs of digits), the other endianness
/// a Neo script hash can be reported in. Odd-length or non-hex input falls
/// back to pair-chunk reversal so the function never fails.
pub fn reverse_hex_pairs(value: &str) -> String {
	if let Ok(mut bytes) = hex::decode(value) {
		bytes.reverse();
		return hex::encode(bytes);
	}
	value
		.as_bytes()
		.chunks(2)
		.rev()
		.filter_map(|pair| std::str::from_utf8(pair).ok())
		.collect()
}

/// Totals for one scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
	pub scanned_blocks: u64,
	pub events_recorded: u64,
}

impl ScanSummary {
	pub fn merge(&mut self, other: &ScanSummary) {
		self.scanned_blocks += other.scanned_blocks;
		self.events_recorded += other.events_recorded;
	}
}

/// Liveness signal updated once per scanner iteration.
///
/// The supervising side keeps a clone and checks recency; a scanner that
/// stops beating is wedged even though its task is still alive.
#[derive(Clone, Debug, Default)]
pub struct ScannerHealth {
	last_beat: Arc<AtomicI64>,
}

impl ScannerHealth {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn beat(&self) {
		self.last_beat.store(Utc::now().timestamp(), Ordering::Relaxed);
	}

	/// Unix timestamp of the last completed iteration, if any
	pub fn last_beat(&self) -> Option<i64> {
		let value = self.last_beat.load(Ordering::Relaxed);
		(value != 0).then_some(value)
	}

	/// Whether an iteration completed within `window`
	pub fn is_live_within(&self, window: Duration) -> bool {
		self.last_beat()
			.map(|beat| Utc::now().timestamp() - beat <= window.as_secs() as i64)
			.unwrap_or(false)
	}
}
