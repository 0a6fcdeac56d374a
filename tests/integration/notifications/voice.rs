//! Voice synthesis integration tests with a mock text-to-speech API.

use chain_sentinel::{models::VoiceConfig, services::notification::VoiceSynthesizer};

fn voice_config(api_base: &str, output_dir: std::path::PathBuf) -> VoiceConfig {
	VoiceConfig {
		api_key: Some("test-key".to_string()),
		voice_id: "test-voice".to_string(),
		model_id: "test-model".to_string(),
		api_base: api_base.to_string(),
		output_dir,
	}
}

#[tokio::test]
async fn synthesized_audio_is_written_under_the_alerts_dir() {
	let mut server = mockito::Server::new_async().await;
	let audio_bytes = vec![0xffu8, 0xfb, 0x90, 0x00];
	server
		.mock(
			"POST",
			mockito::Matcher::Regex(r"^/v1/text-to-speech/.+$".to_string()),
		)
		.match_header("xi-api-key", "test-key")
		.with_status(200)
		.with_header("content-type", "audio/mpeg")
		.with_body(audio_bytes.clone())
		.create_async()
		.await;

	let dir = tempfile::tempdir().unwrap();
	let synthesizer =
		VoiceSynthesizer::new(voice_config(&server.url(), dir.path().to_path_buf()));

	let path = synthesizer
		.synthesize("Alert. Contract Vault emitted Paused.")
		.await
		.expect("audio path");

	assert!(path.starts_with(dir.path()));
	assert_eq!(std::fs::read(&path).unwrap(), audio_bytes);
}

#[tokio::test]
async fn synthesis_http_failure_yields_none() {
	let mut server = mockito::Server::new_async().await;
	server
		.mock(
			"POST",
			mockito::Matcher::Regex(r"^/v1/text-to-speech/.+$".to_string()),
		)
		.with_status(500)
		.create_async()
		.await;

	let dir = tempfile::tempdir().unwrap();
	let synthesizer =
		VoiceSynthesizer::new(voice_config(&server.url(), dir.path().to_path_buf()));

	assert!(synthesizer.synthesize("Alert.").await.is_none());
	// Nothing was written on the failure path.
	assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
