//! Domain models and data structures for contract surveillance.
//!
//! This module contains all the core data structures used throughout the application:
//!
//! - `config`: Environment-derived runtime configuration
//! - `core`: Core domain models (Contract, ContractEvent, ClassificationResult)

mod config;
mod core;

// Re-export core types
pub use core::{
	ChainKind, ClassificationResult, Contract, ContractEvent, NetworkKind, Severity,
};

// Re-export config types
pub use config::{
	AppConfig, EvmScanConfig, GeminiConfig, NeoScanConfig, SmtpSettings, SpoonAgentConfig,
	VoiceConfig,
};
