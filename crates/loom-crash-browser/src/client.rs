// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Exception reporting client.

use std::sync::Arc;
use std::time::Duration;

use loom_crash_context::{
	ContextResolver, FetchingContextResolver, HttpSourceFetcher, NoopContextResolver,
};
use loom_crash_core::{
	ExceptionDescriptor, ExceptionEvent, LibraryPathClassifier, MetadataProvider, PageContext,
	ReportOptions, StaticMetadata, TraceKitFrame,
};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::aggregate::FrameAggregator;
use crate::assemble::{AssembleFromRawStack, AssembleFromResolvedFrames};
use crate::config::ReporterConfig;
use crate::enrich::FrameEnricher;
use crate::error::{ReporterError, Result};
use crate::transport::{HttpTransport, NoopTransport, Transport};

/// SDK name for identification.
const SDK_NAME: &str = "loom-crash-browser";
/// SDK version for identification.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builder for constructing an [`ExceptionReporter`].
pub struct ExceptionReporterBuilder {
	page_url: Option<String>,
	referrer: Option<String>,
	config: ReporterConfig,
	resolver: Option<Arc<dyn ContextResolver>>,
	metadata: Option<Arc<dyn MetadataProvider>>,
	transport: Option<Arc<dyn Transport>>,
	collector_url: Option<String>,
	auth_token: Option<String>,
}

impl ExceptionReporterBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			page_url: None,
			referrer: None,
			config: ReporterConfig::default(),
			resolver: None,
			metadata: None,
			transport: None,
			collector_url: None,
			auth_token: None,
		}
	}

	/// Sets the URL of the page the reporter runs on. Required.
	pub fn page_url(mut self, url: impl Into<String>) -> Self {
		self.page_url = Some(url.into());
		self
	}

	/// Sets the page referrer reported under `extra.page.referer`.
	pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
		self.referrer = Some(referrer.into());
		self
	}

	/// Replaces the whole configuration.
	pub fn config(mut self, config: ReporterConfig) -> Self {
		self.config = config;
		self
	}

	/// Sets the pattern marking library paths.
	///
	/// Example: `(node_modules|bower_components|webpack)`
	pub fn library_path_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.config.library_path_pattern = pattern.into();
		self
	}

	/// Enables or disables source map and context line lookups.
	pub fn enrich_frames(mut self, enabled: bool) -> Self {
		self.config.enrich_frames = enabled;
		self
	}

	/// Sets the number of context lines around the failing line.
	pub fn context_lines(mut self, lines: usize) -> Self {
		self.config.context_lines = lines;
		self
	}

	/// Sets the timeout for source fetches and collector requests.
	///
	/// Rounded up to whole milliseconds. A zero timeout fails [`Self::build`].
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		let millis = timeout.as_nanos().div_ceil(1_000_000);
		self.config.request_timeout_ms = u64::try_from(millis).unwrap_or(u64::MAX);
		self
	}

	/// Uses a custom context resolver instead of fetching sources over HTTP.
	pub fn context_resolver(mut self, resolver: impl ContextResolver + 'static) -> Self {
		self.resolver = Some(Arc::new(resolver));
		self
	}

	/// Sets the source of environment snapshots.
	pub fn metadata_provider(mut self, provider: impl MetadataProvider + 'static) -> Self {
		self.metadata = Some(Arc::new(provider));
		self
	}

	/// Uses a custom transport. Takes precedence over [`Self::collector_url`].
	pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
		self.transport = Some(Arc::new(transport));
		self
	}

	/// Sets the collector endpoint events are posted to.
	///
	/// Example: `https://collector.example.com/api/errors`
	pub fn collector_url(mut self, url: impl Into<String>) -> Self {
		self.collector_url = Some(url.into());
		self
	}

	/// Sets the bearer token sent to the collector.
	pub fn auth_token(mut self, token: impl Into<String>) -> Self {
		self.auth_token = Some(token.into());
		self
	}

	/// Builds the ExceptionReporter.
	pub fn build(self) -> Result<ExceptionReporter> {
		let page_url = self.page_url.ok_or(ReporterError::MissingPageUrl)?;

		let mut page = PageContext::from_url(&page_url)?;
		if let Some(referrer) = self.referrer {
			page = page.with_referrer(referrer);
		}
		let page = Arc::new(page);

		let classifier = LibraryPathClassifier::new(&self.config.library_path_pattern)?;

		if self.config.request_timeout_ms == 0 {
			return Err(ReporterError::InvalidTimeout);
		}

		let http_client = Client::builder()
			.timeout(self.config.request_timeout())
			.user_agent(format!("{SDK_NAME}/{SDK_VERSION}"))
			.build()?;

		let resolver: Arc<dyn ContextResolver> = match self.resolver {
			Some(resolver) => resolver,
			None if self.config.enrich_frames => {
				Arc::new(FetchingContextResolver::with_context_lines(
					HttpSourceFetcher::new(http_client.clone()),
					self.config.context_lines,
				))
			}
			None => Arc::new(NoopContextResolver),
		};

		let transport: Arc<dyn Transport> = match (self.transport, self.collector_url) {
			(Some(transport), _) => transport,
			(None, Some(url)) => {
				// Normalize collector URL
				let url = url.trim_end_matches('/').to_string();
				Url::parse(&url)
					.map_err(|e| ReporterError::InvalidCollectorUrl(format!("{url}: {e}")))?;

				let mut transport = HttpTransport::new(http_client, url);
				if let Some(token) = self.auth_token {
					transport = transport.with_auth_token(token);
				}
				Arc::new(transport)
			}
			(None, None) => Arc::new(NoopTransport),
		};

		let metadata = self
			.metadata
			.unwrap_or_else(|| Arc::new(StaticMetadata::default()));

		let enricher = FrameEnricher::new(resolver, Arc::clone(&page), classifier);

		info!(
			page = %page.href,
			enrich_frames = self.config.enrich_frames,
			library_path_pattern = %self.config.library_path_pattern,
			"Exception reporter initialized"
		);

		Ok(ExceptionReporter {
			inner: Arc::new(ExceptionReporterInner {
				page,
				aggregator: FrameAggregator::new(enricher),
				metadata,
				transport,
				config: self.config,
			}),
		})
	}
}

impl Default for ExceptionReporterBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct ExceptionReporterInner {
	page: Arc<PageContext>,
	aggregator: FrameAggregator,
	metadata: Arc<dyn MetadataProvider>,
	transport: Arc<dyn Transport>,
	config: ReporterConfig,
}

/// Client turning uncaught browser exceptions into exception events.
///
/// # Example
///
/// ```ignore
/// use loom_crash_browser::ExceptionReporter;
/// use loom_crash_core::{ExceptionDescriptor, RawFrame, ReportOptions};
///
/// let reporter = ExceptionReporter::builder()
///     .page_url("https://shop.example.com/checkout")
///     .collector_url("https://collector.example.com/api/errors")
///     .build()?;
///
/// let exception = ExceptionDescriptor::new("TypeError", "x is undefined")
///     .with_stack(vec![RawFrame::at("https://shop.example.com/app.js", 10, 4)]);
///
/// let event = reporter.capture(exception, &ReportOptions::default()).await;
/// reporter.send(event, &ReportOptions::default());
/// ```
#[derive(Clone)]
pub struct ExceptionReporter {
	inner: Arc<ExceptionReporterInner>,
}

impl ExceptionReporter {
	/// Creates a new builder for configuring the reporter.
	pub fn builder() -> ExceptionReporterBuilder {
		ExceptionReporterBuilder::new()
	}

	pub fn page(&self) -> &PageContext {
		&self.inner.page
	}

	pub fn config(&self) -> &ReporterConfig {
		&self.inner.config
	}

	/// Resolves the raw stack, then assembles the event.
	pub async fn capture(
		&self,
		exception: ExceptionDescriptor,
		options: &ReportOptions,
	) -> ExceptionEvent {
		let exception = self.inner.aggregator.stack_info_to_exception(exception).await;
		self.process_exception(exception, options)
	}

	/// Assembles an event from an exception whose frames are already resolved.
	///
	/// The event is returned, not sent.
	pub fn process_exception(
		&self,
		exception: ExceptionDescriptor,
		options: &ReportOptions,
	) -> ExceptionEvent {
		AssembleFromResolvedFrames::new(&self.inner.page, self.inner.metadata.as_ref())
			.assemble(exception, options)
	}

	/// Assembles an event from a TraceKit exception and hands it to the
	/// transport.
	pub fn report_raw_exception(
		&self,
		exception: ExceptionDescriptor<TraceKitFrame>,
		options: &ReportOptions,
	) {
		let event = AssembleFromRawStack::new(&self.inner.page, self.inner.metadata.as_ref())
			.assemble(exception, options);
		self.send(event, options);
	}

	/// Hands an event to the transport.
	pub fn send(&self, event: ExceptionEvent, options: &ReportOptions) {
		debug!(culprit = %event.culprit, "Sending exception event");
		self.inner.transport.send(event, options);
	}
}
