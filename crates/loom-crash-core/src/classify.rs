// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-app vs library classification of frame paths.

use regex::Regex;

use crate::error::{CrashError, Result};

/// Library path pattern used when none is configured.
pub const DEFAULT_LIBRARY_PATH_PATTERN: &str = "(node_modules|bower_components|webpack)";

/// Classifies file paths as application code or third-party library code.
#[derive(Debug, Clone)]
pub struct LibraryPathClassifier {
	pattern: Regex,
}

impl LibraryPathClassifier {
	/// Compiles the configured library path pattern.
	pub fn new(pattern: &str) -> Result<Self> {
		let pattern = Regex::new(pattern).map_err(|e| CrashError::InvalidLibraryPattern {
			pattern: pattern.to_string(),
			source: e,
		})?;
		Ok(Self { pattern })
	}

	/// True unless the path matches the library path pattern.
	pub fn is_in_app(&self, path: &str) -> bool {
		!self.pattern.is_match(path)
	}
}

impl Default for LibraryPathClassifier {
	fn default() -> Self {
		Self::new(DEFAULT_LIBRARY_PATH_PATTERN).expect("default library path pattern compiles")
	}
}
