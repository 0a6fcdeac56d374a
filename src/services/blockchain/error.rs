//! Error types for blockchain gateway operations.
//!
//! These only surface during client construction (bad endpoint URL, HTTP
//! client build failure). Request-time failures are retried and then
//! degraded to empty results instead of errors.

use log::error;
use std::error::Error;
use std::fmt;

/// Represents possible errors while building or using a chain gateway
#[derive(Debug)]
pub enum BlockChainError {
	/// Malformed or unsupported endpoint URL
	InvalidEndpoint(String),
	/// Underlying HTTP client could not be constructed
	ClientBuildError(String),
}

impl BlockChainError {
	fn format_message(&self) -> String {
		match self {
			Self::InvalidEndpoint(msg) => format!("Invalid endpoint: {}", msg),
			Self::ClientBuildError(msg) => format!("Client build error: {}", msg),
		}
	}

	/// Creates a new invalid-endpoint error with logging
	pub fn invalid_endpoint(msg: impl Into<String>) -> Self {
		let error = Self::InvalidEndpoint(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new client-build error with logging
	pub fn client_build_error(msg: impl Into<String>) -> Self {
		let error = Self::ClientBuildError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for BlockChainError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for BlockChainError {}
