// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Context resolver backed by fetching the frame's script.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use loom_crash_core::SourceContext;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ResolveError, Result};
use crate::fetch::SourceFetcher;
use crate::resolver::ContextResolver;
use crate::source::{extract_context, find_source_map_url, line_count};

/// Number of context lines to include before and after the error line.
pub const DEFAULT_CONTEXT_LINES: usize = 5;

/// Number of script sources kept in memory.
pub const DEFAULT_MAX_CACHED_SOURCES: usize = 64;

type SourceCell = Arc<OnceCell<Arc<str>>>;

/// Source cells by URL, evicted oldest first.
struct SourceCache {
	cells: HashMap<String, SourceCell>,
	order: VecDeque<String>,
	capacity: usize,
}

impl SourceCache {
	fn new(capacity: usize) -> Self {
		Self {
			cells: HashMap::new(),
			order: VecDeque::new(),
			capacity: capacity.max(1),
		}
	}

	fn cell(&mut self, path: &str) -> SourceCell {
		if let Some(cell) = self.cells.get(path) {
			return Arc::clone(cell);
		}

		while self.cells.len() >= self.capacity {
			let Some(oldest) = self.order.pop_front() else {
				break;
			};
			self.cells.remove(&oldest);
		}

		let cell = SourceCell::default();
		self.cells.insert(path.to_string(), Arc::clone(&cell));
		self.order.push_back(path.to_string());
		cell
	}
}

/// Resolves source maps and context lines by fetching the script itself.
///
/// Concurrent lookups for the same script share a single fetch. At most
/// `max_cached_sources` scripts are kept; the oldest is dropped first. A
/// failed fetch is not cached.
pub struct FetchingContextResolver<F: SourceFetcher> {
	fetcher: F,
	context_lines: usize,
	cache: Mutex<SourceCache>,
}

impl<F: SourceFetcher> FetchingContextResolver<F> {
	pub fn new(fetcher: F) -> Self {
		Self::with_context_lines(fetcher, DEFAULT_CONTEXT_LINES)
	}

	pub fn with_context_lines(fetcher: F, context_lines: usize) -> Self {
		Self {
			fetcher,
			context_lines,
			cache: Mutex::new(SourceCache::new(DEFAULT_MAX_CACHED_SOURCES)),
		}
	}

	pub fn with_max_cached_sources(mut self, max: usize) -> Self {
		self.cache = Mutex::new(SourceCache::new(max));
		self
	}

	async fn source(&self, path: &str) -> Result<Arc<str>> {
		if path.is_empty() {
			return Err(ResolveError::EmptyPath);
		}

		let cell = self
			.cache
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.cell(path);

		let body = cell
			.get_or_try_init(|| async { self.fetcher.fetch(path).await.map(Arc::<str>::from) })
			.await?;

		Ok(Arc::clone(body))
	}
}

#[async_trait]
impl<F: SourceFetcher> ContextResolver for FetchingContextResolver<F> {
	#[instrument(skip(self))]
	async fn source_map_url(&self, path: &str) -> Result<String> {
		let source = self.source(path).await?;

		let found = find_source_map_url(&source)
			.ok_or_else(|| ResolveError::SourceMapNotFound(path.to_string()))?;

		// Relative references resolve against the script URL.
		let resolved = Url::parse(path)?.join(found)?;
		debug!(sourcemap_url = %resolved, "Found source map");
		Ok(resolved.to_string())
	}

	#[instrument(skip(self))]
	async fn exception_contexts(&self, path: &str, line: Option<u32>) -> Result<SourceContext> {
		let line = line.filter(|l| *l != 0).ok_or(ResolveError::MissingLine)?;
		let source = self.source(path).await?;

		extract_context(&source, line as usize, self.context_lines).ok_or_else(|| {
			ResolveError::LineOutOfRange {
				path: path.to_string(),
				line,
				lines: line_count(&source),
			}
		})
	}
}
