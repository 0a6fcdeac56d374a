//! Per-family blockchain clients.

mod evm;
mod neo;

pub use evm::EvmClient;
pub use neo::NeoClient;
