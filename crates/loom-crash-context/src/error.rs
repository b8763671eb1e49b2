// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for context resolution.

use thiserror::Error;

/// Why a source fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
	#[error("HTTP request failed: {0}")]
	Request(#[from] reqwest::Error),

	#[error("fetching {url} returned status {status}")]
	Status { url: String, status: u16 },
}

/// Why a source map or context lookup produced nothing.
///
/// These are soft failures: the frame enricher falls back to the next
/// strategy or keeps the frame unenriched.
#[derive(Debug, Error)]
pub enum ResolveError {
	#[error("frame has no file path")]
	EmptyPath,

	#[error("frame has no line number")]
	MissingLine,

	#[error("no sourceMappingURL found in {0}")]
	SourceMapNotFound(String),

	#[error("line {line} is outside {path} ({lines} lines)")]
	LineOutOfRange {
		path: String,
		line: u32,
		lines: usize,
	},

	#[error("invalid URL: {0}")]
	InvalidUrl(#[from] url::ParseError),

	#[error("source fetch failed: {0}")]
	Fetch(#[from] FetchError),

	#[error("context resolution is disabled")]
	Disabled,
}

pub type Result<T> = std::result::Result<T, ResolveError>;
