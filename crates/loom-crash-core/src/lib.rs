// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for browser exception reporting.
//!
//! This crate holds everything in the exception pipeline that is pure and
//! synchronous. It is used by the context resolver (`loom-crash-context`) and
//! by the reporting client (`loom-crash-browser`).
//!
//! # Overview
//!
//! - Raw frames from the stack-capture utility and from TraceKit
//! - Canonical frames, the wire shape sent to the collector
//! - Path cleaning against the current page and in-app classification
//! - Frame normalization (unusable frames are skipped, never errors)
//! - Exception descriptors and the assembled exception event
//! - Environment metadata and caller report options

pub mod classify;
pub mod context;
pub mod error;
pub mod event;
pub mod frame;
pub mod js;
pub mod normalize;
pub mod page;
pub mod path;

pub use classify::{LibraryPathClassifier, DEFAULT_LIBRARY_PATH_PATTERN};
pub use context::{
	browser_specific_metadata, merge_object, BrowserMetadata, MetadataProvider, ReportContext,
	ReportOptions, StaticMetadata,
};
pub use error::{CrashError, Result};
pub use event::{
	ExceptionDescriptor, ExceptionEvent, ExceptionInfo, ExceptionValue, HttpInfo, SCRIPT_ERROR,
};
pub use frame::{
	CanonicalFrame, Enrichment, RawFrame, SourceContext, Stacktrace, TraceKitFrame,
	ANONYMOUS_FUNCTION, INLINE_SCRIPT, LEGACY_ANONYMOUS_FUNCTION,
};
pub use normalize::{normalize, normalize_tracekit_frame};
pub use page::PageContext;
pub use path::{clean_file_path, clean_file_url, file_path_to_file_name, is_file_inline};
