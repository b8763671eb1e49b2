// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! File path cleaning for frame and culprit display.

use crate::page::PageContext;

/// Normalizes a missing, empty or `"<anonymous>"` path to the empty string.
pub fn clean_file_path(path: Option<&str>) -> String {
	match path {
		None | Some("") | Some("<anonymous>") => String::new(),
		Some(path) => path.to_string(),
	}
}

/// Strips the page origin (and the slash after it) from a same-origin path.
///
/// Paths from other origins are returned unchanged.
pub fn file_path_to_file_name<'a>(path: &'a str, page: &PageContext) -> &'a str {
	if page.origin.is_empty() {
		return path;
	}

	match path.strip_prefix(page.origin.as_str()) {
		Some("") => "",
		Some(rest) => rest.strip_prefix('/').unwrap_or(path),
		None => path,
	}
}

/// True when the path is a prefix of the page URL, i.e. code from an inline
/// `<script>` block on the page itself.
pub fn is_file_inline(path: &str, page: &PageContext) -> bool {
	!path.is_empty() && page.href.starts_with(path)
}

/// Legacy cleaning used by the TraceKit pipeline.
///
/// Removes the first occurrence of the page URL from the path; an empty
/// result becomes `"/"`.
pub fn clean_file_url(url: Option<&str>, page: &PageContext) -> String {
	let mut url = url.unwrap_or_default().to_string();

	if !page.href.is_empty() && url.contains(page.href.as_str()) {
		url = url.replacen(page.href.as_str(), "", 1);
	}

	if url.is_empty() {
		url.push('/');
	}

	url
}
