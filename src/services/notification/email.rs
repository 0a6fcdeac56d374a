//! Email notification implementation.
//!
//! Delivers breach alerts to contract owners via SMTP. An instance built
//! from empty SMTP settings stays in an unconfigured state where every send
//! reports failure without attempting delivery, so the pipeline behaves
//! identically with and without a mail relay.

use async_trait::async_trait;
use email_address::EmailAddress;
use lettre::{
	message::{header::ContentType, Mailbox},
	transport::smtp::authentication::Credentials,
	Message, SmtpTransport, Transport,
};
use std::fmt;
use tracing::warn;

use crate::{
	models::SmtpSettings,
	services::notification::{AlertNotifier, AlertOutcome},
};

/// SMTP-backed alert delivery
///
/// Generic over the lettre transport so tests can substitute a mock.
pub struct EmailNotifier<T: Transport + Send + Sync = SmtpTransport> {
	transport: Option<T>,
	sender: String,
}

impl EmailNotifier<SmtpTransport> {
	/// Builds the notifier from SMTP settings
	///
	/// Missing host or sender yields an unconfigured notifier rather than
	/// an error; the scan loops treat failed sends as outcomes to log.
	pub fn from_settings(settings: &SmtpSettings) -> Self {
		if settings.host.is_empty() || settings.from.is_empty() {
			return Self {
				transport: None,
				sender: settings.from.clone(),
			};
		}

		let transport = match SmtpTransport::relay(&settings.host) {
			Ok(relay) => {
				let mut builder = relay.port(settings.port);
				if !settings.username.is_empty() {
					builder = builder.credentials(Credentials::new(
						settings.username.clone(),
						settings.password.clone(),
					));
				}
				Some(builder.build())
			}
			Err(e) => {
				warn!(host = %settings.host, error = %e, "failed to build SMTP relay");
				None
			}
		};

		Self {
			transport,
			sender: settings.from.clone(),
		}
	}
}

impl<T: Transport + Send + Sync> EmailNotifier<T>
where
	T::Error: fmt::Display,
{
	/// Creates a notifier over an explicit transport
	pub fn with_transport(transport: T, sender: impl Into<String>) -> Self {
		Self {
			transport: Some(transport),
			sender: sender.into(),
		}
	}
}

#[async_trait]
impl<T: Transport + Send + Sync> AlertNotifier for EmailNotifier<T>
where
	T::Error: fmt::Display,
{
	async fn send(&self, to: &str, subject: &str, body: &str) -> AlertOutcome {
		let Some(transport) = &self.transport else {
			return AlertOutcome::failed("SMTP not configured");
		};

		if !EmailAddress::is_valid(to) {
			return AlertOutcome::failed(format!("invalid recipient address: {}", to));
		}

		let from: Mailbox = match self.sender.parse() {
			Ok(mailbox) => mailbox,
			Err(e) => return AlertOutcome::failed(format!("invalid sender address: {}", e)),
		};
		let recipient: Mailbox = match to.parse() {
			Ok(mailbox) => mailbox,
			Err(e) => return AlertOutcome::failed(format!("invalid recipient address: {}", e)),
		};

		let message = match Message::builder()
			.from(from)
			.to(recipient)
			.subject(subject)
			.header(ContentType::TEXT_PLAIN)
			.body(body.to_string())
		{
			Ok(message) => message,
			Err(e) => return AlertOutcome::failed(format!("failed to build message: {}", e)),
		};

		match transport.send(&message) {
			Ok(_) => AlertOutcome::ok(),
			Err(e) => {
				warn!(to, error = %e, "alert email delivery failed");
				AlertOutcome::failed(e.to_string())
			}
		}
	}
}
