// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stack frame types: raw frames as captured in the browser and the canonical
//! frame shape sent to the collector.

use serde::{Deserialize, Serialize};

/// Display name used for frames and culprits that point at inline `<script>` code.
pub const INLINE_SCRIPT: &str = "(inline script)";

/// Default function name for frames produced by the stack-capture utility.
pub const ANONYMOUS_FUNCTION: &str = "<anonymous>";

/// Default function name used by the legacy TraceKit normalizer.
pub const LEGACY_ANONYMOUS_FUNCTION: &str = "[anonymous]";

/// A stack frame as reported by the browser's stack-capture utility.
///
/// Any field may be missing depending on the browser. Empty strings and zero
/// line/column numbers are treated as missing, the same way the capture
/// utility's consumers always have.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFrame {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub file_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub line_number: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub column_number: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub function_name: Option<String>,
}

impl RawFrame {
	/// Creates a raw frame with a file and position and no function name.
	pub fn at(file_name: impl Into<String>, line: u32, column: u32) -> Self {
		Self {
			file_name: Some(file_name.into()),
			line_number: Some(line),
			column_number: Some(column),
			function_name: None,
		}
	}

	/// Sets the function name.
	pub fn with_function(mut self, name: impl Into<String>) -> Self {
		self.function_name = Some(name.into());
		self
	}

	pub fn has_file_name(&self) -> bool {
		self.file_name.as_deref().is_some_and(|f| !f.is_empty())
	}

	pub fn has_line_number(&self) -> bool {
		self.line_number.is_some_and(|l| l != 0)
	}

	pub fn has_column_number(&self) -> bool {
		self.column_number.is_some_and(|c| c != 0)
	}
}

/// A stack frame in the shape produced by TraceKit, the secondary capture source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceKitFrame {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub line: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub column: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub func: Option<String>,
}

/// Source lines surrounding the failing line of a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceContext {
	pub pre_context: Vec<String>,
	pub context_line: String,
	pub post_context: Vec<String>,
}

/// Source-level enrichment attached to a canonical frame.
///
/// A frame carries at most one kind: a source map reference, or the context
/// lines around the failing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Enrichment {
	SourceMap {
		sourcemap_url: String,
	},
	Context {
		pre_context: Vec<String>,
		context_line: String,
		post_context: Vec<String>,
	},
}

impl Enrichment {
	pub fn source_map(url: impl Into<String>) -> Self {
		Self::SourceMap {
			sourcemap_url: url.into(),
		}
	}

	pub fn sourcemap_url(&self) -> Option<&str> {
		match self {
			Self::SourceMap { sourcemap_url } => Some(sourcemap_url),
			Self::Context { .. } => None,
		}
	}
}

impl From<SourceContext> for Enrichment {
	fn from(ctx: SourceContext) -> Self {
		Self::Context {
			pre_context: ctx.pre_context,
			context_line: ctx.context_line,
			post_context: ctx.post_context,
		}
	}
}

/// The normalized, transport-ready frame.
///
/// Absent fields are omitted from the wire format. A frame with no fields at
/// all is the placeholder for an unusable raw frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalFrame {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filename: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lineno: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub colno: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub function: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub abs_path: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub in_app: Option<bool>,
	#[serde(flatten)]
	pub enrichment: Option<Enrichment>,
}

impl CanonicalFrame {
	/// A minimal frame carrying only a location, used when an exception has no
	/// stack but does know where it was thrown.
	pub fn location(filename: impl Into<String>, lineno: Option<u32>) -> Self {
		Self {
			filename: Some(filename.into()),
			lineno,
			..Self::default()
		}
	}

	/// True for the placeholder left behind by an unusable raw frame.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}

	pub fn sourcemap_url(&self) -> Option<&str> {
		self.enrichment.as_ref().and_then(Enrichment::sourcemap_url)
	}

	pub fn context(&self) -> Option<SourceContext> {
		match &self.enrichment {
			Some(Enrichment::Context {
				pre_context,
				context_line,
				post_context,
			}) => Some(SourceContext {
				pre_context: pre_context.clone(),
				context_line: context_line.clone(),
				post_context: post_context.clone(),
			}),
			_ => None,
		}
	}
}

/// Ordered frames of an exception, oldest call first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stacktrace {
	pub frames: Vec<CanonicalFrame>,
}
