// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reporter configuration.

use std::time::Duration;

use loom_crash_context::DEFAULT_CONTEXT_LINES;
use loom_crash_core::DEFAULT_LIBRARY_PATH_PATTERN;
use serde::{Deserialize, Serialize};

/// Configuration for the exception reporter.
///
/// Hosts load this however they like (it deserializes from any serde format);
/// every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
	/// Regular expression marking library (not in-app) paths.
	pub library_path_pattern: String,
	/// Whether frames are enriched with source maps or context lines.
	pub enrich_frames: bool,
	/// Context lines fetched before and after the failing line.
	pub context_lines: usize,
	/// Timeout for source fetches and collector requests, in milliseconds.
	/// Must be non-zero.
	pub request_timeout_ms: u64,
}

impl ReporterConfig {
	pub fn request_timeout(&self) -> Duration {
		Duration::from_millis(self.request_timeout_ms)
	}
}

impl Default for ReporterConfig {
	fn default() -> Self {
		Self {
			library_path_pattern: DEFAULT_LIBRARY_PATH_PATTERN.to_string(),
			enrich_frames: true,
			context_lines: DEFAULT_CONTEXT_LINES,
			request_timeout_ms: 30_000,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_config_defaults() {
		let config = ReporterConfig::default();
		assert_eq!(config.library_path_pattern, DEFAULT_LIBRARY_PATH_PATTERN);
		assert!(config.enrich_frames);
		assert_eq!(config.context_lines, 5);
		assert_eq!(config.request_timeout(), Duration::from_secs(30));
	}

	#[test]
	fn test_partial_config_fills_defaults() {
		let config: ReporterConfig =
			serde_json::from_str(r#"{"library_path_pattern": "/vendor/", "context_lines": 2}"#)
				.unwrap();

		assert_eq!(config.library_path_pattern, "/vendor/");
		assert_eq!(config.context_lines, 2);
		assert!(config.enrich_frames);
		assert_eq!(config.request_timeout_ms, 30_000);
	}

	#[test]
	fn test_timeout_keeps_millisecond_precision() {
		let config: ReporterConfig =
			serde_json::from_str(r#"{"request_timeout_ms": 250}"#).unwrap();
		assert_eq!(config.request_timeout(), Duration::from_millis(250));
	}
}
