// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The page an exception was raised on.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CrashError, Result};

/// Location and document state of the current page.
///
/// Passed explicitly into normalization and assembly instead of being read
/// from browser globals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
	/// Full URL of the page (`location.href`).
	pub href: String,
	/// `scheme://host[:port]` of the page (`location.origin`).
	pub origin: String,
	/// `document.referrer`, empty when the page was opened directly.
	pub referrer: String,
	/// `document.domain`.
	pub domain: String,
}

impl PageContext {
	/// Builds a page context from the page URL, deriving origin and domain.
	///
	/// Default ports are omitted from the origin, matching `location.origin`.
	pub fn from_url(href: &str) -> Result<Self> {
		let url = Url::parse(href).map_err(|e| CrashError::InvalidPageUrl(format!("{href}: {e}")))?;

		Ok(Self {
			href: href.to_string(),
			origin: url.origin().ascii_serialization(),
			referrer: String::new(),
			domain: url.host_str().unwrap_or_default().to_string(),
		})
	}

	pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
		self.referrer = referrer.into();
		self
	}
}
