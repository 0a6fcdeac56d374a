//! Error types for classification providers.
//!
//! Provider errors never escape the chain; they only decide demotion to
//! the next tier, so a lightweight `thiserror` enum is enough here.

use thiserror::Error;

/// Reasons a classification tier can miss
#[derive(Debug, Error)]
pub enum ClassifierError {
	/// Provider lacks configuration and cannot attempt a call
	#[error("{0} provider is not configured")]
	NotConfigured(&'static str),

	/// HTTP request failed or returned a non-success status
	#[error("provider request failed: {0}")]
	RequestError(String),

	/// Provider answered with nothing usable
	#[error("provider returned an empty response")]
	EmptyResponse,

	/// Provider text did not decode into a classification object
	#[error("provider response was not a classification object")]
	UnparseableResponse,
}
