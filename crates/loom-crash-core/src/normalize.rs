// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Conversion of raw stack frames into canonical frames.
//!
//! Unusable frames are not errors: the normalizers return `None` and the
//! caller decides whether to keep an empty slot or drop the frame.

use crate::classify::LibraryPathClassifier;
use crate::frame::{
	CanonicalFrame, RawFrame, TraceKitFrame, ANONYMOUS_FUNCTION, INLINE_SCRIPT,
	LEGACY_ANONYMOUS_FUNCTION,
};
use crate::page::PageContext;
use crate::path::{clean_file_path, clean_file_url, file_path_to_file_name, is_file_inline};

/// Normalizes a frame from the stack-capture utility.
///
/// Returns `None` when the frame has no usable location:
/// - neither a file name nor a line number (older IE stacks),
/// - neither a column nor a line number,
/// - a display name that is only a line number such as `":329"`.
pub fn normalize(
	raw: &RawFrame,
	page: &PageContext,
	classifier: &LibraryPathClassifier,
) -> Option<CanonicalFrame> {
	if !raw.has_file_name() && !raw.has_line_number() {
		return None;
	}

	if !raw.has_column_number() && !raw.has_line_number() {
		return None;
	}

	let file_path = clean_file_path(raw.file_name.as_deref());
	let file_name = if is_file_inline(&file_path, page) {
		INLINE_SCRIPT
	} else {
		file_path_to_file_name(&file_path, page)
	};

	if file_name.starts_with(':') {
		return None;
	}

	Some(CanonicalFrame {
		filename: Some(file_name.to_string()),
		lineno: raw.line_number,
		colno: raw.column_number,
		function: Some(
			raw.function_name
				.clone()
				.filter(|f| !f.is_empty())
				.unwrap_or_else(|| ANONYMOUS_FUNCTION.to_string()),
		),
		abs_path: raw.file_name.clone(),
		in_app: Some(classifier.is_in_app(&file_path)),
		enrichment: None,
	})
}

/// Normalizes a TraceKit frame. Frames without a URL yield `None`.
pub fn normalize_tracekit_frame(
	frame: &TraceKitFrame,
	page: &PageContext,
) -> Option<CanonicalFrame> {
	let url = frame.url.as_deref().filter(|u| !u.is_empty())?;

	Some(CanonicalFrame {
		filename: Some(clean_file_url(Some(url), page)),
		lineno: frame.line,
		colno: frame.column,
		function: Some(
			frame
				.func
				.clone()
				.filter(|f| !f.is_empty())
				.unwrap_or_else(|| LEGACY_ANONYMOUS_FUNCTION.to_string()),
		),
		..CanonicalFrame::default()
	})
}
