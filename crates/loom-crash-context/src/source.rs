// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Parsing of fetched script sources.

use std::sync::LazyLock;

use loom_crash_core::SourceContext;
use regex::Regex;

static SOURCE_MAPPING_URL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?m)^[ \t]*//[#@][ \t]*sourceMappingURL=([^\s'\x22]+)[ \t]*\r?$")
		.expect("valid sourceMappingURL pattern")
});

/// Finds the `sourceMappingURL` advertised by a script.
///
/// Accepts both `//# sourceMappingURL=` and the deprecated `//@` form. When a
/// bundle contains several (concatenated files), the last one applies.
pub fn find_source_map_url(source: &str) -> Option<&str> {
	SOURCE_MAPPING_URL
		.captures_iter(source)
		.last()
		.and_then(|caps| caps.get(1))
		.map(|m| m.as_str())
}

/// Extracts `context_lines` lines before and after a 1-based `line`.
///
/// Returns `None` when the line is outside the source.
pub fn extract_context(source: &str, line: usize, context_lines: usize) -> Option<SourceContext> {
	let lines: Vec<&str> = source.lines().collect();

	if line == 0 || line > lines.len() {
		return None;
	}

	let line_idx = line - 1;
	let pre_start = line_idx.saturating_sub(context_lines);
	let post_end = (line_idx + 1 + context_lines).min(lines.len());

	Some(SourceContext {
		pre_context: lines[pre_start..line_idx].iter().map(|s| s.to_string()).collect(),
		context_line: lines[line_idx].to_string(),
		post_context: lines[(line_idx + 1)..post_end]
			.iter()
			.map(|s| s.to_string())
			.collect(),
	})
}

pub(crate) fn line_count(source: &str) -> usize {
	source.lines().count()
}
