// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Exception descriptors (pipeline input) and exception events (pipeline output).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::frame::{CanonicalFrame, RawFrame, Stacktrace};

/// Message used when an exception carries no usable message.
pub const SCRIPT_ERROR: &str = "Script error";

/// An uncaught exception as handed over by the capture layer.
///
/// `R` is the raw frame shape of the capture source: [`RawFrame`] for the
/// stack-capture utility, [`crate::TraceKitFrame`] for TraceKit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub struct ExceptionDescriptor<R = RawFrame> {
	/// "TypeError", "ReferenceError"
	#[serde(rename = "type", default)]
	pub exception_type: String,
	/// Whatever was thrown or reported; coerced to a string during assembly.
	#[serde(default)]
	pub message: Option<Value>,
	#[serde(default)]
	pub fileurl: Option<String>,
	#[serde(default)]
	pub lineno: Option<u32>,
	/// Already-resolved frames, newest first.
	#[serde(default)]
	pub frames: Option<Vec<CanonicalFrame>>,
	/// Raw frames awaiting resolution, newest first.
	#[serde(default)]
	pub stack: Option<Vec<R>>,
}

impl<R> Default for ExceptionDescriptor<R> {
	fn default() -> Self {
		Self {
			exception_type: String::new(),
			message: None,
			fileurl: None,
			lineno: None,
			frames: None,
			stack: None,
		}
	}
}

impl<R> ExceptionDescriptor<R> {
	pub fn new(exception_type: impl Into<String>, message: impl Into<Value>) -> Self {
		Self {
			exception_type: exception_type.into(),
			message: Some(message.into()),
			..Self::default()
		}
	}

	pub fn with_location(mut self, fileurl: impl Into<String>, lineno: Option<u32>) -> Self {
		self.fileurl = Some(fileurl.into());
		self.lineno = lineno;
		self
	}

	pub fn with_frames(mut self, frames: Vec<CanonicalFrame>) -> Self {
		self.frames = Some(frames);
		self
	}

	pub fn with_stack(mut self, stack: Vec<R>) -> Self {
		self.stack = Some(stack);
		self
	}
}

/// The `exception.value` field.
///
/// Normally the coerced message text. The TraceKit pipeline can also produce an
/// integer here (see `AssembleFromRawStack` in `loom-crash-browser`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExceptionValue {
	Text(String),
	Integer(i32),
}

impl fmt::Display for ExceptionValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(s) => write!(f, "{s}"),
			Self::Integer(n) => write!(f, "{n}"),
		}
	}
}

/// `exception` object of the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
	#[serde(rename = "type")]
	pub exception_type: String,
	pub value: ExceptionValue,
}

/// `http` object of the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpInfo {
	pub url: String,
}

/// The assembled event sent to the collector.
///
/// `level`, `logger` and `machine` are always `null` here and are filled in
/// downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionEvent {
	pub message: String,
	pub culprit: String,
	pub exception: ExceptionInfo,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub http: Option<HttpInfo>,
	pub stacktrace: Stacktrace,
	pub user: Value,
	pub extra: Map<String, Value>,
	/// Caller extra merged over metadata, written only by the TraceKit pipeline.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<Map<String, Value>>,
	pub level: Option<String>,
	pub logger: Option<String>,
	pub machine: Option<Value>,
	/// Unix seconds, written only by the TraceKit pipeline.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<i64>,
}
