// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Context types for exception events (browser environment, caller options).

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::page::PageContext;

/// Snapshot of the browser environment at exception time.
///
/// Serialized verbatim under `extra.environment`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserMetadata {
	/// Hours east of UTC (negated `getTimezoneOffset() / 60`).
	pub utc_offset: f64,
	pub browser_width: u32,
	pub browser_height: u32,
	pub screen_width: u32,
	pub screen_height: u32,
	/// "en-US"
	pub language: String,
	pub user_agent: String,
	/// "MacIntel", "Win32", "Linux x86_64"
	pub platform: String,
}

/// Source of environment snapshots.
pub trait MetadataProvider: Send + Sync {
	fn snapshot(&self) -> BrowserMetadata;
}

/// Provider returning a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata(pub BrowserMetadata);

impl MetadataProvider for StaticMetadata {
	fn snapshot(&self) -> BrowserMetadata {
		self.0.clone()
	}
}

/// Builds the `extra` object: `environment` from the snapshot and `page` from
/// the page context.
pub fn browser_specific_metadata(
	metadata: &BrowserMetadata,
	page: &PageContext,
) -> Map<String, Value> {
	let mut extra = Map::new();
	extra.insert(
		"environment".to_string(),
		json!({
			"utcOffset": metadata.utc_offset,
			"browserWidth": metadata.browser_width,
			"browserHeight": metadata.browser_height,
			"screenWidth": metadata.screen_width,
			"screenHeight": metadata.screen_height,
			"language": metadata.language,
			"userAgent": metadata.user_agent,
			"platform": metadata.platform,
		}),
	);
	extra.insert(
		"page".to_string(),
		json!({
			"referer": page.referrer,
			"host": page.domain,
			"location": page.href,
		}),
	);
	extra
}

/// Shallow merge of two objects into a new map. Keys from `overrides` win.
pub fn merge_object(
	base: &Map<String, Value>,
	overrides: &Map<String, Value>,
) -> Map<String, Value> {
	let mut merged = base.clone();
	for (key, value) in overrides {
		merged.insert(key.clone(), value.clone());
	}
	merged
}

/// Caller-supplied context attached to a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportContext {
	/// Free-form user object (`{ id, email, ... }`).
	#[serde(default)]
	pub user: Option<Value>,
	/// Extra key/values merged over the environment metadata.
	#[serde(default)]
	pub extra: Option<Map<String, Value>>,
}

/// Options accepted by the report entry points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
	#[serde(default)]
	pub context: ReportContext,
}

impl ReportOptions {
	pub fn with_user(mut self, user: Value) -> Self {
		self.context.user = Some(user);
		self
	}

	pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
		self.context.extra = Some(extra);
		self
	}
}
