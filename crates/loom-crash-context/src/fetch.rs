// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fetching of script sources.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;

/// Fetches the text of a script by URL.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
	async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches sources over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpSourceFetcher {
	client: Client,
}

impl HttpSourceFetcher {
	pub fn new(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
	async fn fetch(&self, url: &str) -> Result<String, FetchError> {
		let response = self.client.get(url).send().await?;

		if !response.status().is_success() {
			return Err(FetchError::Status {
				url: url.to_string(),
				status: response.status().as_u16(),
			});
		}

		let body = response.text().await?;
		debug!(url = %url, bytes = body.len(), "Fetched script source");
		Ok(body)
	}
}
