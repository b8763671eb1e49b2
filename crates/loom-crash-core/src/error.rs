// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the crash core.

use thiserror::Error;

/// Errors raised while setting up the pipeline.
///
/// Frame and event processing itself never fails; these only come from
/// invalid configuration.
#[derive(Debug, Error)]
pub enum CrashError {
	#[error("invalid library path pattern {pattern:?}: {source}")]
	InvalidLibraryPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("invalid page URL: {0}")]
	InvalidPageUrl(String),
}

/// Result type for crash core operations.
pub type Result<T> = std::result::Result<T, CrashError>;
