// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The context resolver seam consumed by the frame enricher.

use async_trait::async_trait;
use loom_crash_core::SourceContext;

use crate::error::{ResolveError, Result};

/// Asynchronous source lookups for a frame's file.
///
/// Both lookups are best-effort; an `Err` means "nothing available" and is
/// never fatal to a report.
#[async_trait]
pub trait ContextResolver: Send + Sync {
	/// Resolves the source map URL advertised by the file at `path`.
	async fn source_map_url(&self, path: &str) -> Result<String>;

	/// Returns the source lines around `line` (1-based) of the file at `path`.
	async fn exception_contexts(&self, path: &str, line: Option<u32>) -> Result<SourceContext>;
}

/// Resolver that never finds anything, for hosts that disable enrichment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopContextResolver;

#[async_trait]
impl ContextResolver for NoopContextResolver {
	async fn source_map_url(&self, _path: &str) -> Result<String> {
		Err(ResolveError::Disabled)
	}

	async fn exception_contexts(&self, _path: &str, _line: Option<u32>) -> Result<SourceContext> {
		Err(ResolveError::Disabled)
	}
}
