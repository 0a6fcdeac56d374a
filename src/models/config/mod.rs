//! Environment-derived runtime configuration.
//!
//! All knobs come from environment variables (loaded from `.env` by the
//! binary via `dotenvy` before this module is consulted). Variable names
//! are stable deployment surface; renaming one breaks existing
//! environments.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn env_string(key: &str, default: &str) -> String {
	env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
	env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
	env::var(key)
		.ok()
		.and_then(|v| v.parse().ok())
		.unwrap_or(default)
}

/// Neo scanner settings.
#[derive(Debug, Clone)]
pub struct NeoScanConfig {
	/// Delay between polling passes.
	pub interval: Duration,
	/// Blocks to rescan when no cursor exists for a contract.
	pub scan_back: u64,
	pub rpc_url_testnet: String,
	pub rpc_url_mainnet: String,
}

impl NeoScanConfig {
	pub fn from_env() -> Self {
		let rpc_default = env_string("NEO_RPC_URL", "https://mainnet1.neo.coz.io:443");
		Self {
			interval: Duration::from_secs(env_u64("MONITOR_INTERVAL_SECONDS", 30)),
			scan_back: env_u64("MONITOR_SCAN_BACK_BLOCKS", 2000),
			rpc_url_testnet: env_string("NEO_RPC_URL_TESTNET", &rpc_default),
			rpc_url_mainnet: env_string("NEO_RPC_URL_MAINNET", &rpc_default),
		}
	}
}

/// EVM scanner settings. The scanner is not started at all without a
/// provider URL.
#[derive(Debug, Clone)]
pub struct EvmScanConfig {
	pub interval: Duration,
	pub scan_back: u64,
	pub provider_url: Option<String>,
}

impl EvmScanConfig {
	pub fn from_env() -> Self {
		let fallback_interval = env_u64("MONITOR_INTERVAL_SECONDS", 30);
		Self {
			interval: Duration::from_secs(env_u64(
				"EVM_MONITOR_INTERVAL_SECONDS",
				fallback_interval,
			)),
			scan_back: env_u64("EVM_SCAN_BACK_BLOCKS", 100),
			provider_url: env_opt("WEB3_PROVIDER_URL"),
		}
	}
}

/// Spoon agent classification provider. Skipped entirely when no runner
/// endpoint is configured.
#[derive(Debug, Clone)]
pub struct SpoonAgentConfig {
	pub endpoint: Option<String>,
	pub llm_provider: String,
	pub model: String,
}

impl SpoonAgentConfig {
	pub fn from_env() -> Self {
		let default_provider = env_string("DEFAULT_LLM_PROVIDER", "google");
		let default_model = env_string("DEFAULT_MODEL", "gemini-2.5-pro");
		Self {
			endpoint: env_opt("SPOON_AGENT_URL"),
			llm_provider: env_string("SPOON_LLM_PROVIDER", &default_provider),
			model: env_string("SPOON_MODEL", &default_model),
		}
	}
}

/// Gemini HTTP classification provider. Only consulted when the configured
/// default provider is `gemini` and an API key is present.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
	pub provider: String,
	pub model: String,
	pub api_key: Option<String>,
	pub max_tokens: u64,
	pub api_base: String,
}

impl GeminiConfig {
	pub fn from_env() -> Self {
		Self {
			provider: env_string("DEFAULT_LLM_PROVIDER", "gemini").to_lowercase(),
			model: env_string("DEFAULT_MODEL", "gemini-2.5-pro"),
			api_key: env_opt("GEMINI_API_KEY").or_else(|| env_opt("GOOGLE_API_KEY")),
			max_tokens: env_u64("GEMINI_MAX_TOKENS", 20000),
			api_base: env_string(
				"GEMINI_API_BASE",
				"https://generativelanguage.googleapis.com",
			),
		}
	}
}

/// SMTP settings for owner alerts. An empty host or sender leaves the
/// dispatcher in an unconfigured state where sends report failure without
/// attempting delivery.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
	pub host: String,
	pub port: u16,
	pub username: String,
	pub password: String,
	pub from: String,
}

impl SmtpSettings {
	pub fn from_env() -> Self {
		let username = env_string("SMTP_USER", "");
		Self {
			host: env_string("SMTP_HOST", ""),
			port: env_u64("SMTP_PORT", 587) as u16,
			password: env_string("SMTP_PASSWORD", ""),
			from: env_string("SMTP_FROM", &username),
			username,
		}
	}
}

/// Voice synthesis settings. Best-effort: absent key disables synthesis.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
	pub api_key: Option<String>,
	pub voice_id: String,
	pub model_id: String,
	pub api_base: String,
	pub output_dir: PathBuf,
}

impl VoiceConfig {
	pub fn from_env() -> Self {
		Self {
			api_key: env_opt("ELEVENLABS_API_KEY"),
			voice_id: env_string("ELEVENLABS_VOICE_ID", "21m00Tcm4TlvDq8ikWAM"),
			model_id: env_string("ELEVENLABS_MODEL_ID", "eleven_multilingual_v2"),
			api_base: env_string("ELEVENLABS_API_BASE", "https://api.elevenlabs.io"),
			output_dir: PathBuf::from(env_string("ALERT_AUDIO_DIR", "alerts")),
		}
	}
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
	pub neo: NeoScanConfig,
	pub evm: EvmScanConfig,
	pub spoon: SpoonAgentConfig,
	pub gemini: GeminiConfig,
	pub smtp: SmtpSettings,
	pub voice: VoiceConfig,
	pub default_owner_email: Option<String>,
}

impl AppConfig {
	pub fn from_env() -> Self {
		Self {
			neo: NeoScanConfig::from_env(),
			evm: EvmScanConfig::from_env(),
			spoon: SpoonAgentConfig::from_env(),
			gemini: GeminiConfig::from_env(),
			smtp: SmtpSettings::from_env(),
			voice: VoiceConfig::from_env(),
			default_owner_email: env_opt("DEFAULT_OWNER_EMAIL"),
		}
	}
}
