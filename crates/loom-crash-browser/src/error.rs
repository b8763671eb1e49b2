// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the browser reporting SDK.

use loom_crash_core::CrashError;
use thiserror::Error;

/// Result type alias for reporter setup.
pub type Result<T> = std::result::Result<T, ReporterError>;

/// Errors that can occur while building an [`crate::ExceptionReporter`].
///
/// Once built, the reporter never fails a report.
#[derive(Debug, Error)]
pub enum ReporterError {
	/// The page URL was not provided.
	#[error("page URL is required")]
	MissingPageUrl,

	/// The request timeout is zero.
	#[error("request timeout must be greater than zero")]
	InvalidTimeout,

	/// Invalid collector URL.
	#[error("invalid collector URL: {0}")]
	InvalidCollectorUrl(String),

	/// Invalid page URL or library path pattern.
	#[error(transparent)]
	Core(#[from] CrashError),

	/// The HTTP client could not be built.
	#[error("HTTP client setup failed: {0}")]
	HttpClient(#[from] reqwest::Error),
}

/// Errors raised while delivering an event to the collector.
#[derive(Debug, Error)]
pub enum TransportError {
	/// HTTP request failed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Collector returned an error.
	#[error("collector error (status {status}): {message}")]
	ServerError {
		/// HTTP status code.
		status: u16,
		/// Error message from the collector.
		message: String,
	},

	/// No async runtime was available to run the send.
	#[error("no tokio runtime available for sending")]
	NoRuntime,
}
