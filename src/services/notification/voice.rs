//! Voice synthesis for breach alerts.
//!
//! Best-effort text-to-speech through an ElevenLabs-style HTTP API. The
//! synthesized MPEG clip is written under the alerts directory and its path
//! returned so the email body can point at it. Every failure mode — no API
//! key, HTTP error, filesystem error — collapses to `None` and the alert
//! goes out without audio.

use chrono::Utc;
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::models::VoiceConfig;

const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);

/// ElevenLabs-style text-to-speech client
pub struct VoiceSynthesizer {
	config: VoiceConfig,
	client: reqwest::Client,
}

impl VoiceSynthesizer {
	pub fn new(config: VoiceConfig) -> Self {
		Self {
			config,
			client: reqwest::Client::new(),
		}
	}

	/// Synthesizes `text` to an MPEG file, returning its path on success
	pub async fn synthesize(&self, text: &str) -> Option<PathBuf> {
		let api_key = self.config.api_key.as_deref()?;

		let url = format!(
			"{}/v1/text-to-speech/{}",
			self.config.api_base, self.config.voice_id
		);
		let body = json!({
			"text": text,
			"model_id": self.config.model_id,
			"voice_settings": {"stability": 0.4, "similarity_boost": 0.7},
		});

		let response = self
			.client
			.post(&url)
			.timeout(SYNTHESIS_TIMEOUT)
			.header("xi-api-key", api_key)
			.header("Accept", "audio/mpeg")
			.json(&body)
			.send()
			.await
			.map_err(|e| debug!(error = %e, "voice synthesis request failed"))
			.ok()?;

		if !response.status().is_success() {
			debug!(status = %response.status(), "voice synthesis returned non-success status");
			return None;
		}

		let audio = response
			.bytes()
			.await
			.map_err(|e| debug!(error = %e, "voice synthesis body read failed"))
			.ok()?;

		tokio::fs::create_dir_all(&self.config.output_dir)
			.await
			.map_err(|e| debug!(error = %e, "could not create alert audio directory"))
			.ok()?;

		let path = self
			.config
			.output_dir
			.join(format!("alert_{}.mp3", Utc::now().timestamp()));
		tokio::fs::write(&path, &audio)
			.await
			.map_err(|e| debug!(error = %e, "could not write alert audio file"))
			.ok()?;

		Some(path)
	}
}
