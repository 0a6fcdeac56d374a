//! Live pipeline activity bus.
//!
//! A bounded ring buffer plus fan-out broadcast: scanners publish one
//! message per pipeline outcome, and observers subscribe to a stream that
//! starts with a snapshot of recent history before going live. The ring and
//! the subscriber list live behind one lock, so a subscriber's snapshot is
//! consistent with the publishes around it. There is no back-pressure: a
//! slow subscriber accumulates in its own queue, and a dropped one is
//! pruned on the next publish.

use futures::Stream;
use serde_json::Value;
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Messages retained for late subscribers
const RING_CAPACITY: usize = 200;

/// Messages replayed to a new subscriber
const SNAPSHOT_SIZE: usize = 50;

struct BusState {
	ring: VecDeque<Value>,
	subscribers: Vec<mpsc::UnboundedSender<Value>>,
}

/// Fan-out broadcast of pipeline activity
///
/// Safe for concurrent publishes from both scanners; the lock is only held
/// for queue pushes, never across an await point.
pub struct EventBus {
	state: Mutex<BusState>,
}

impl EventBus {
	pub fn new() -> Self {
		Self {
			state: Mutex::new(BusState {
				ring: VecDeque::with_capacity(RING_CAPACITY),
				subscribers: Vec::new(),
			}),
		}
	}

	/// Appends to the ring (dropping the oldest entry on overflow) and
	/// forwards to every live subscriber. A closed subscriber never blocks
	/// or fails delivery to the others.
	pub fn publish(&self, message: Value) {
		let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
		if state.ring.len() == RING_CAPACITY {
			state.ring.pop_front();
		}
		state.ring.push_back(message.clone());
		state
			.subscribers
			.retain(|subscriber| subscriber.send(message.clone()).is_ok());
	}

	/// Registers a subscriber and returns its stream: up to the last
	/// [`SNAPSHOT_SIZE`] buffered messages first, then live messages until
	/// the subscription is dropped.
	pub fn subscribe(&self) -> BusSubscription {
		let (sender, receiver) = mpsc::unbounded_channel();
		let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
		let start = state.ring.len().saturating_sub(SNAPSHOT_SIZE);
		for message in state.ring.iter().skip(start) {
			// Receiver is in hand, so sends cannot fail here.
			let _ = sender.send(message.clone());
		}
		state.subscribers.push(sender);
		BusSubscription { receiver }
	}

	/// Number of currently buffered messages
	pub fn buffered(&self) -> usize {
		self.state
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.ring
			.len()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new()
	}
}

/// One subscriber's message stream
pub struct BusSubscription {
	receiver: mpsc::UnboundedReceiver<Value>,
}

impl BusSubscription {
	/// Next message, or `None` once the bus is gone
	pub async fn recv(&mut self) -> Option<Value> {
		self.receiver.recv().await
	}

	/// Non-blocking variant for drain-style consumers
	pub fn try_recv(&mut self) -> Option<Value> {
		self.receiver.try_recv().ok()
	}
}

impl Stream for BusSubscription {
	type Item = Value;

	fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		self.receiver.poll_recv(cx)
	}
}
