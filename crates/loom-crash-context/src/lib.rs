// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source context resolution for Loom browser exception reporting.
//!
//! This crate provides:
//! - The [`ContextResolver`] trait the frame enricher consumes
//! - Source map discovery from `//# sourceMappingURL=` comments
//! - Context line extraction around the failing line
//! - A fetching resolver with a per-URL source cache
//!
//! # Example
//!
//! ```ignore
//! use loom_crash_context::{ContextResolver, FetchingContextResolver, HttpSourceFetcher};
//!
//! let resolver = FetchingContextResolver::new(HttpSourceFetcher::default());
//!
//! match resolver.source_map_url("https://example.com/static/app.js").await {
//!     Ok(url) => println!("source map at {url}"),
//!     Err(_) => {
//!         let ctx = resolver
//!             .exception_contexts("https://example.com/static/app.js", Some(42))
//!             .await?;
//!         println!("{}", ctx.context_line);
//!     }
//! }
//! ```

pub mod error;
pub mod fetch;
pub mod fetching;
pub mod resolver;
pub mod source;

pub use error::{FetchError, ResolveError, Result};
pub use fetch::{HttpSourceFetcher, SourceFetcher};
pub use fetching::{FetchingContextResolver, DEFAULT_CONTEXT_LINES, DEFAULT_MAX_CACHED_SOURCES};
pub use resolver::{ContextResolver, NoopContextResolver};
pub use source::{extract_context, find_source_map_url};
