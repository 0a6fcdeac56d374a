//! Contract surveillance pipeline.
//!
//! Watches registered smart contracts on two chain families — Neo N3
//! (application-log notifications) and EVM (event logs) — classifies every
//! detected event as benign or a breach, and alerts contract owners when
//! risk crosses the line.
//!
//! # Architecture
//! - Scanners: per-chain polling loops over node JSON-RPC
//! - Classifier: tiered provider chain (Spoon agent, Gemini, heuristic)
//!   that always produces a result
//! - Event Bus: bounded ring + fan-out broadcast of live pipeline activity
//! - Notification: owner email with best-effort voice explanation
//! - Repositories: the seam to whatever persistence engine surrounds the
//!   pipeline
//!
//! # Flow
//! 1. A scanner polls its nodes for blocks or logs since its cursor
//! 2. Matching notifications/logs are normalized into canonical payloads
//! 3. The classification chain scores each payload against its contract
//! 4. The outcome is recorded, broadcast on the bus, and counted
//! 5. Breach-positive outcomes trigger exactly one owner alert attempt

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
