// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Browser exception reporting SDK.
//!
//! Turns an uncaught exception and its raw stack into an
//! [`loom_crash_core::ExceptionEvent`] ready for a collector.
//!
//! # Pipeline
//!
//! 1. [`FrameEnricher`] normalizes each raw frame, then tries each
//!    [`EnrichmentStrategy`] in turn (source map, then context lines).
//! 2. [`FrameAggregator`] enriches every frame of a stack concurrently and
//!    keeps the input order.
//! 3. [`AssembleFromResolvedFrames`] or [`AssembleFromRawStack`] builds the
//!    event.
//! 4. A [`Transport`] delivers it.
//!
//! [`ExceptionReporter`] wires these together.
//!
//! # Example
//!
//! ```ignore
//! use loom_crash_browser::ExceptionReporter;
//!
//! let reporter = ExceptionReporter::builder()
//!     .page_url("https://shop.example.com/checkout")
//!     .collector_url("https://collector.example.com/api/errors")
//!     .build()?;
//!
//! let event = reporter.capture(exception, &options).await;
//! reporter.send(event, &options);
//! ```

pub mod aggregate;
pub mod assemble;
pub mod client;
pub mod config;
pub mod enrich;
pub mod error;
pub mod transport;

#[cfg(test)]
mod testing;

pub use aggregate::FrameAggregator;
pub use assemble::{AssembleFromRawStack, AssembleFromResolvedFrames};
pub use client::{ExceptionReporter, ExceptionReporterBuilder};
pub use config::ReporterConfig;
pub use enrich::{EnrichmentStrategy, FrameEnricher};
pub use error::{ReporterError, Result, TransportError};
pub use transport::{HttpTransport, NoopTransport, Transport};
