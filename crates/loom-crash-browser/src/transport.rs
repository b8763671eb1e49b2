// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Delivery of assembled events to a collector.

use loom_crash_core::{ExceptionEvent, ReportOptions};
use reqwest::Client;
use tokio::runtime::Handle;
use tracing::{debug, error, warn};

use crate::error::TransportError;

/// Fire-and-forget hand-off of an assembled event.
///
/// Implementations must not block the caller; delivery failures are theirs
/// to log.
pub trait Transport: Send + Sync {
	fn send(&self, event: ExceptionEvent, options: &ReportOptions);
}

/// Transport that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTransport;

impl Transport for NoopTransport {
	fn send(&self, event: ExceptionEvent, _options: &ReportOptions) {
		debug!(culprit = %event.culprit, "No transport configured, dropping exception event");
	}
}

/// Posts events as JSON to a collector endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: Client,
	endpoint: String,
	auth_token: Option<String>,
}

impl HttpTransport {
	pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
		Self {
			client,
			endpoint: endpoint.into(),
			auth_token: None,
		}
	}

	/// Sends `Authorization: Bearer <token>` with every request.
	pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
		self.auth_token = Some(token.into());
		self
	}

	/// Posts one event and waits for the collector's answer.
	pub async fn post(&self, event: &ExceptionEvent) -> Result<(), TransportError> {
		let mut request = self.client.post(&self.endpoint).json(event);
		if let Some(token) = &self.auth_token {
			request = request.header("Authorization", format!("Bearer {token}"));
		}

		let response = request.send().await?;

		if response.status().is_success() {
			debug!(culprit = %event.culprit, "Exception event delivered");
			Ok(())
		} else {
			let status = response.status().as_u16();
			let message = response.text().await.unwrap_or_default();
			Err(TransportError::ServerError { status, message })
		}
	}
}

impl Transport for HttpTransport {
	fn send(&self, event: ExceptionEvent, _options: &ReportOptions) {
		let Ok(handle) = Handle::try_current() else {
			warn!(error = %TransportError::NoRuntime, "Dropping exception event");
			return;
		};

		let transport = self.clone();
		handle.spawn(async move {
			if let Err(e) = transport.post(&event).await {
				error!(
					error = %e,
					endpoint = %transport.endpoint,
					"Failed to deliver exception event"
				);
			}
		});
	}
}
