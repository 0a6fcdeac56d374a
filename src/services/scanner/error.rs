//! Error types for scanner operations.
//!
//! Scan-pass failures never terminate a scanner: the loop logs them and
//! waits for the next tick. The variants here exist so those log lines say
//! which collaborator fell over.

use log::error;
use std::error::Error;
use std::fmt;

/// Represents possible errors during a scan pass
#[derive(Debug)]
pub enum ScannerError {
	/// Chain gateway could not be built
	ClientError(String),
	/// Persistence collaborator failed
	RepositoryError(String),
}

impl ScannerError {
	fn format_message(&self) -> String {
		match self {
			Self::ClientError(msg) => format!("Client error: {}", msg),
			Self::RepositoryError(msg) => format!("Repository error: {}", msg),
		}
	}

	/// Creates a new client error with logging
	pub fn client_error(msg: impl Into<String>) -> Self {
		let error = Self::ClientError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new repository error with logging
	pub fn repository_error(msg: impl Into<String>) -> Self {
		let error = Self::RepositoryError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for ScannerError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for ScannerError {}
