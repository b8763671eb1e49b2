// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-frame enrichment with source maps or source context.

use std::fmt;
use std::sync::Arc;

use loom_crash_context::ContextResolver;
use loom_crash_core::{
	clean_file_path, normalize, CanonicalFrame, Enrichment, LibraryPathClassifier, PageContext,
	RawFrame,
};
use tracing::{debug, trace};

/// A way of attaching debugging information to a normalized frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentStrategy {
	/// Locate the script's `sourceMappingURL`.
	SourceMap,
	/// Fetch the lines around the failing line.
	ContextLines,
}

impl EnrichmentStrategy {
	/// Strategies in the order they are tried. The first success wins.
	pub const ORDER: [Self; 2] = [Self::SourceMap, Self::ContextLines];

	pub async fn attempt(
		self,
		resolver: &dyn ContextResolver,
		frame: &CanonicalFrame,
	) -> loom_crash_context::Result<Enrichment> {
		let path = clean_file_path(frame.abs_path.as_deref());
		match self {
			Self::SourceMap => resolver.source_map_url(&path).await.map(Enrichment::source_map),
			Self::ContextLines => resolver
				.exception_contexts(&path, frame.lineno)
				.await
				.map(Enrichment::from),
		}
	}
}

impl fmt::Display for EnrichmentStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::SourceMap => write!(f, "source_map"),
			Self::ContextLines => write!(f, "context_lines"),
		}
	}
}

/// Turns one raw frame into a canonical frame.
///
/// Enrichment never fails the frame: when every strategy fails the normalized
/// frame is returned as is.
#[derive(Clone)]
pub struct FrameEnricher {
	resolver: Arc<dyn ContextResolver>,
	page: Arc<PageContext>,
	classifier: LibraryPathClassifier,
}

impl FrameEnricher {
	pub fn new(
		resolver: Arc<dyn ContextResolver>,
		page: Arc<PageContext>,
		classifier: LibraryPathClassifier,
	) -> Self {
		Self {
			resolver,
			page,
			classifier,
		}
	}

	/// Normalizes and enriches a frame.
	///
	/// Unusable frames come back as an empty [`CanonicalFrame`] so the caller
	/// keeps one output slot per input frame.
	pub async fn enrich(&self, raw: &RawFrame) -> CanonicalFrame {
		let Some(mut frame) = normalize(raw, &self.page, &self.classifier) else {
			trace!(file_name = ?raw.file_name, line = ?raw.line_number, "Skipping unusable frame");
			return CanonicalFrame::default();
		};

		for strategy in EnrichmentStrategy::ORDER {
			match strategy.attempt(self.resolver.as_ref(), &frame).await {
				Ok(enrichment) => {
					frame.enrichment = Some(enrichment);
					break;
				}
				Err(e) => {
					debug!(
						strategy = %strategy,
						abs_path = ?frame.abs_path,
						error = %e,
						"Frame enrichment failed"
					);
				}
			}
		}

		frame
	}
}
