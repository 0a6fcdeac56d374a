//! Contract surveillance service entry point.
//!
//! Initializes configuration from the environment, wires the shared
//! services around a contract registry, and runs the chain scanners until
//! an interrupt arrives. With `--once` it performs a single account-chain
//! scan pass and prints the summary instead of looping.

use std::env::{set_var, var};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::{Arg, Command};
use dotenvy::dotenv;
use tracing::{debug, error, info, warn};

use chain_sentinel::{
	bootstrap::{build_neo_scanner, initialize_services, spawn_scanners},
	models::AppConfig,
	repositories::ContractRepository,
	utils::logging::setup_logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let matches = Command::new("chain-sentinel")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"A contract surveillance service that watches on-chain activity for registered \
			 contracts, classifies detected events, and alerts owners on breaches.",
		)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL"),
		)
		.arg(
			Arg::new("contracts")
				.long("contracts")
				.help("Path to the contract registry JSON file (default: config/contracts.json)")
				.value_name("PATH"),
		)
		.arg(
			Arg::new("once")
				.long("once")
				.help("Run a single account-chain scan pass and print the summary")
				.action(clap::ArgAction::SetTrue),
		)
		.get_matches();

	// Load environment variables from .env file
	dotenv().ok();

	// CLI log level only applies when the environment does not already set one
	if let Some(level) = matches.get_one::<String>("log-level") {
		if var("RUST_LOG").is_err() {
			set_var("RUST_LOG", level);
		}
	}

	setup_logging().unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
	});

	let config = AppConfig::from_env();

	let contracts_path = matches
		.get_one::<String>("contracts")
		.cloned()
		.or_else(|| var("CONTRACTS_PATH").ok())
		.unwrap_or_else(|| "config/contracts.json".to_string());
	let repository = if Path::new(&contracts_path).exists() {
		Arc::new(ContractRepository::from_file(Path::new(&contracts_path)).map_err(|e| {
			anyhow::anyhow!("Failed to load contract registry {}: {}", contracts_path, e)
		})?)
	} else {
		info!(path = %contracts_path, "no contract registry file; starting with an empty registry");
		Arc::new(ContractRepository::new())
	};
	if let Some(default_owner) = &config.default_owner_email {
		repository.apply_default_owner(default_owner);
	}

	let services = initialize_services(&config, repository);

	if matches.get_flag("once") {
		let scanner = build_neo_scanner(&config, &services)?;
		let summary = scanner.run_once().await;
		info!(
			scanned_blocks = summary.scanned_blocks,
			events_recorded = summary.events_recorded,
			"scan pass complete"
		);
		println!("{}", serde_json::to_string(&summary)?);
		return Ok(());
	}

	// Mirror bus traffic into the logs so live pipeline activity is
	// observable without the external streaming surface.
	let mut bus_subscription = services.bus.subscribe();
	tokio::spawn(async move {
		while let Some(message) = bus_subscription.recv().await {
			debug!(target: "chain_sentinel::bus", %message, "pipeline activity");
		}
	});

	let supervisor = spawn_scanners(&config, &services)?;

	// Liveness watchdog: a scanner never crashes, but it can wedge on a
	// stuck collaborator. Surface that in the logs.
	{
		let neo_health = supervisor.neo_health.clone();
		let evm_health = supervisor.evm_health.clone();
		let neo_window = config.neo.interval * 3 + Duration::from_secs(30);
		let evm_window = config.evm.interval * 3 + Duration::from_secs(30);
		tokio::spawn(async move {
			loop {
				tokio::time::sleep(Duration::from_secs(60)).await;
				if neo_health.last_beat().is_some() && !neo_health.is_live_within(neo_window) {
					warn!("neo scanner has not completed an iteration recently");
				}
				if let Some(health) = &evm_health {
					if health.last_beat().is_some() && !health.is_live_within(evm_window) {
						warn!("evm scanner has not completed an iteration recently");
					}
				}
			}
		});
	}

	info!("Service started. Press Ctrl+C to shutdown");

	if let Err(e) = tokio::signal::ctrl_c().await {
		error!("Error waiting for Ctrl+C: {}", e);
	}
	info!("Shutdown signal received, stopping services...");

	for handle in supervisor.handles {
		handle.abort();
	}

	info!("Shutdown complete");
	Ok(())
}
