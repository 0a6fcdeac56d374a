//! Bootstrap module for the contract surveillance service.
//!
//! The composition root: builds the shared services (bus, classification
//! chain, alert dispatcher, voice synthesis) around an injected persistence
//! collaborator, and spawns the chain scanners as supervised background
//! tasks. Scanners contain their own errors per pass; the supervision layer
//! adds a liveness signal so an external health check can notice a wedged
//! loop that never crashes.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::{
	models::AppConfig,
	repositories::ContractRepositoryTrait,
	services::{
		bus::EventBus,
		classifier::ClassificationService,
		notification::{AlertNotifier, EmailNotifier, VoiceSynthesizer},
		scanner::{EvmScanner, NeoScanner, ScannerError, ScannerHealth},
	},
};

/// Shared service handles for the pipeline
pub struct Services {
	pub repository: Arc<dyn ContractRepositoryTrait>,
	pub classifier: Arc<ClassificationService>,
	pub notifier: Arc<dyn AlertNotifier>,
	pub voice: Arc<VoiceSynthesizer>,
	pub bus: Arc<EventBus>,
}

/// Builds every shared service from configuration
pub fn initialize_services(
	config: &AppConfig,
	repository: Arc<dyn ContractRepositoryTrait>,
) -> Services {
	Services {
		repository,
		classifier: Arc::new(ClassificationService::from_config(
			&config.spoon,
			&config.gemini,
		)),
		notifier: Arc::new(EmailNotifier::from_settings(&config.smtp)),
		voice: Arc::new(VoiceSynthesizer::new(config.voice.clone())),
		bus: Arc::new(EventBus::new()),
	}
}

/// Builds the account-chain scanner over the shared services
pub fn build_neo_scanner(
	config: &AppConfig,
	services: &Services,
) -> Result<NeoScanner, ScannerError> {
	NeoScanner::new(
		config.neo.clone(),
		services.repository.clone(),
		services.classifier.clone(),
		services.notifier.clone(),
		services.voice.clone(),
		services.bus.clone(),
	)
}

/// Handles to the spawned scanner tasks and their liveness signals
pub struct ScannerSupervisor {
	pub neo_health: ScannerHealth,
	pub evm_health: Option<ScannerHealth>,
	pub handles: Vec<JoinHandle<()>>,
}

/// Spawns the scanners as long-lived background tasks
///
/// The EVM scanner is skipped (not an error) when no provider URL is
/// configured.
pub fn spawn_scanners(
	config: &AppConfig,
	services: &Services,
) -> anyhow::Result<ScannerSupervisor> {
	let mut handles = Vec::new();

	let neo_scanner = Arc::new(build_neo_scanner(config, services)?);
	let neo_health = ScannerHealth::new();
	{
		let health = neo_health.clone();
		handles.push(tokio::spawn(async move {
			neo_scanner.run(health).await;
		}));
	}

	let evm_health = match EvmScanner::new(
		config.evm.clone(),
		services.repository.clone(),
		services.classifier.clone(),
		services.notifier.clone(),
		services.bus.clone(),
	)? {
		Some(scanner) => {
			let scanner = Arc::new(scanner);
			let health = ScannerHealth::new();
			let spawned_health = health.clone();
			handles.push(tokio::spawn(async move {
				scanner.run(spawned_health).await;
			}));
			Some(health)
		}
		None => {
			info!("WEB3_PROVIDER_URL not set; evm scanner disabled");
			None
		}
	};

	Ok(ScannerSupervisor {
		neo_health,
		evm_health,
		handles,
	})
}
