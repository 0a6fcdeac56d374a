//! Core services implementing the surveillance pipeline.
//!
//! - `blockchain`: JSON-RPC gateways to chain nodes
//! - `bus`: live pipeline activity broadcast
//! - `classifier`: tiered breach classification
//! - `notification`: owner alerting (email, voice)
//! - `scanner`: per-chain polling loops composing the rest

pub mod blockchain;
pub mod bus;
pub mod classifier;
pub mod notification;
pub mod scanner;
