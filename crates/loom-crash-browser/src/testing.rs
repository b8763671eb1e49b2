// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared test doubles.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use loom_crash_context::{ContextResolver, ResolveError};
use loom_crash_core::{ExceptionEvent, PageContext, ReportOptions, SourceContext};

use crate::transport::Transport;

pub(crate) const PAGE_URL: &str = "https://example.com/shop/index.html";

pub(crate) fn page() -> PageContext {
	PageContext::from_url(PAGE_URL).unwrap()
}

/// Which resolver operation was called, and for which path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup {
	SourceMap(String),
	Context(String),
}

/// Resolver answering from fixed tables, with optional per-path latency.
#[derive(Default)]
pub(crate) struct MockResolver {
	source_maps: HashMap<String, String>,
	contexts: HashMap<String, SourceContext>,
	delays: HashMap<String, Duration>,
	lookups: Mutex<Vec<Lookup>>,
}

impl MockResolver {
	pub(crate) fn with_source_map(mut self, path: &str, url: &str) -> Self {
		self.source_maps.insert(path.to_string(), url.to_string());
		self
	}

	pub(crate) fn with_context(mut self, path: &str, context: SourceContext) -> Self {
		self.contexts.insert(path.to_string(), context);
		self
	}

	pub(crate) fn with_delay(mut self, path: &str, delay: Duration) -> Self {
		self.delays.insert(path.to_string(), delay);
		self
	}

	pub(crate) fn lookups(&self) -> Vec<Lookup> {
		self.lookups.lock().unwrap().clone()
	}

	async fn wait(&self, path: &str) {
		if let Some(delay) = self.delays.get(path) {
			tokio::time::sleep(*delay).await;
		}
	}
}

#[async_trait]
impl ContextResolver for MockResolver {
	async fn source_map_url(&self, path: &str) -> loom_crash_context::Result<String> {
		self.lookups
			.lock()
			.unwrap()
			.push(Lookup::SourceMap(path.to_string()));
		self.wait(path).await;
		self.source_maps
			.get(path)
			.cloned()
			.ok_or_else(|| ResolveError::SourceMapNotFound(path.to_string()))
	}

	async fn exception_contexts(
		&self,
		path: &str,
		line: Option<u32>,
	) -> loom_crash_context::Result<SourceContext> {
		self.lookups
			.lock()
			.unwrap()
			.push(Lookup::Context(path.to_string()));
		self.wait(path).await;
		self.contexts
			.get(path)
			.cloned()
			.ok_or_else(|| ResolveError::LineOutOfRange {
				path: path.to_string(),
				line: line.unwrap_or_default(),
				lines: 0,
			})
	}
}

/// Transport that keeps every event it is handed.
#[derive(Default)]
pub(crate) struct RecordingTransport {
	events: Mutex<Vec<ExceptionEvent>>,
}

impl RecordingTransport {
	pub(crate) fn events(&self) -> Vec<ExceptionEvent> {
		self.events.lock().unwrap().clone()
	}
}

impl Transport for RecordingTransport {
	fn send(&self, event: ExceptionEvent, _options: &ReportOptions) {
		self.events.lock().unwrap().push(event);
	}
}

pub(crate) fn sample_context() -> SourceContext {
	SourceContext {
		pre_context: vec!["function go() {".to_string()],
		context_line: "  undefinedFn();".to_string(),
		post_context: vec!["}".to_string()],
	}
}
