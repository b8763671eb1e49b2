// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Concurrent enrichment of a whole stack.

use futures::future::join_all;
use loom_crash_core::{CanonicalFrame, ExceptionDescriptor, RawFrame};
use tracing::{debug, instrument};

use crate::enrich::FrameEnricher;

/// Enriches every frame of a stack concurrently.
///
/// Output order always matches input order, whatever order the lookups
/// complete in.
#[derive(Clone)]
pub struct FrameAggregator {
	enricher: FrameEnricher,
}

impl FrameAggregator {
	pub fn new(enricher: FrameEnricher) -> Self {
		Self { enricher }
	}

	/// Returns one canonical frame per raw frame, empty frames included.
	#[instrument(skip_all, fields(frame_count = raw_frames.len()))]
	pub async fn aggregate(&self, raw_frames: &[RawFrame]) -> Vec<CanonicalFrame> {
		let frames = join_all(raw_frames.iter().map(|raw| self.enricher.enrich(raw))).await;

		debug!(
			enriched = frames.iter().filter(|f| f.enrichment.is_some()).count(),
			skipped = frames.iter().filter(|f| f.is_empty()).count(),
			"Aggregated stack frames"
		);
		frames
	}

	/// Resolves the raw stack of an exception into `frames`.
	///
	/// When the stack is present and non-empty, the resolved frames replace any
	/// existing `frames` and `stack` is cleared. Otherwise the descriptor is
	/// returned unchanged.
	pub async fn stack_info_to_exception(
		&self,
		mut exception: ExceptionDescriptor,
	) -> ExceptionDescriptor {
		match exception.stack.take() {
			Some(stack) if !stack.is_empty() => {
				exception.frames = Some(self.aggregate(&stack).await);
			}
			stack => exception.stack = stack,
		}
		exception
	}
}
