//! Core domain models for the contract surveillance system.
//!
//! This module contains the fundamental data structures that represent:
//! - Contracts: Registered on-chain entities being watched
//! - Events: Detected on-chain occurrences and their classification

mod contract;
mod event;

pub use contract::{ChainKind, Contract, NetworkKind};
pub use event::{ClassificationResult, ContractEvent, Severity};
