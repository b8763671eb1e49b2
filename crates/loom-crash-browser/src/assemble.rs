// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event assembly.
//!
//! One strategy per capture source. Their events differ in shape:
//!
//! - [`AssembleFromResolvedFrames`] takes frames already enriched by the
//!   [`crate::FrameAggregator`] and returns the event to its caller.
//! - [`AssembleFromRawStack`] takes a TraceKit stack, normalizes it with the
//!   legacy rules and stamps a timestamp. The reporter hands its events to the
//!   transport directly.

use chrono::Utc;
use loom_crash_core::js::{bitwise_or_strings, is_truthy, to_js_string};
use loom_crash_core::{
	browser_specific_metadata, clean_file_path, clean_file_url, file_path_to_file_name,
	is_file_inline, merge_object, normalize_tracekit_frame, CanonicalFrame, ExceptionDescriptor,
	ExceptionEvent, ExceptionInfo, ExceptionValue, HttpInfo, MetadataProvider, PageContext,
	ReportOptions, Stacktrace, TraceKitFrame, INLINE_SCRIPT, SCRIPT_ERROR,
};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// Coerced message, or [`SCRIPT_ERROR`] when the message is absent or falsy.
fn resolved_message(message: Option<&Value>) -> String {
	match message {
		Some(m) if is_truthy(m) => to_js_string(Some(m)),
		_ => SCRIPT_ERROR.to_string(),
	}
}

/// Message value of the TraceKit pipeline.
///
/// The fallback has always been computed as `String(message) | "Script error"`.
/// Both operands coerce to NaN, so every falsy message yields the integer `0`.
// TODO: switch the fallback to `resolved_message` (a logical OR against
// SCRIPT_ERROR) once collectors no longer group TraceKit events on value `0`.
fn legacy_message(message: Option<&Value>) -> ExceptionValue {
	match message {
		Some(m) if is_truthy(m) => ExceptionValue::Text(to_js_string(Some(m))),
		_ => ExceptionValue::Integer(bitwise_or_strings(&to_js_string(message), SCRIPT_ERROR)),
	}
}

fn base_metadata(page: &PageContext, metadata: &dyn MetadataProvider) -> Map<String, Value> {
	browser_specific_metadata(&metadata.snapshot(), page)
}

/// Builds events from pre-resolved frames.
pub struct AssembleFromResolvedFrames<'a> {
	page: &'a PageContext,
	metadata: &'a dyn MetadataProvider,
}

impl<'a> AssembleFromResolvedFrames<'a> {
	pub fn new(page: &'a PageContext, metadata: &'a dyn MetadataProvider) -> Self {
		Self { page, metadata }
	}

	/// Assembles the event. Any raw `stack` left on the descriptor is ignored;
	/// run it through [`crate::FrameAggregator::stack_info_to_exception`] first.
	#[instrument(skip_all, fields(exception_type = %exception.exception_type))]
	pub fn assemble<R>(
		&self,
		exception: ExceptionDescriptor<R>,
		options: &ReportOptions,
	) -> ExceptionEvent {
		let message = resolved_message(exception.message.as_ref());
		let file_path = clean_file_path(exception.fileurl.as_deref());
		let mut file_name = file_path_to_file_name(&file_path, self.page).to_string();

		let mut frames: Vec<CanonicalFrame> = exception
			.frames
			.unwrap_or_default()
			.into_iter()
			.filter(|frame| !frame.is_empty())
			.collect();

		if !frames.is_empty() {
			frames.reverse();
		} else if !file_name.is_empty() {
			frames.push(CanonicalFrame::location(file_name.clone(), exception.lineno));
		}

		if file_name.is_empty() {
			if let Some(last) = frames.last() {
				file_name = last
					.filename
					.clone()
					.filter(|f| !f.is_empty())
					.unwrap_or_else(|| INLINE_SCRIPT.to_string());
			}
		}

		let culprit = if is_file_inline(&file_path, self.page) {
			INLINE_SCRIPT.to_string()
		} else {
			file_name
		};

		let mut extra = base_metadata(self.page, self.metadata);
		if let Some(caller_extra) = &options.context.extra {
			extra = merge_object(&extra, caller_extra);
		}

		let user = options
			.context
			.user
			.clone()
			.filter(is_truthy)
			.unwrap_or_else(|| Value::Object(Map::new()));

		let event = ExceptionEvent {
			message: format!("{}: {}", exception.exception_type, message),
			culprit,
			exception: ExceptionInfo {
				exception_type: exception.exception_type,
				value: ExceptionValue::Text(message),
			},
			http: Some(HttpInfo {
				url: self.page.href.clone(),
			}),
			stacktrace: Stacktrace { frames },
			user,
			extra,
			data: None,
			level: None,
			logger: None,
			machine: None,
			timestamp: None,
		};

		debug!(
			culprit = %event.culprit,
			frame_count = event.stacktrace.frames.len(),
			"Assembled exception event"
		);
		event
	}
}

/// Builds events from a raw TraceKit stack.
pub struct AssembleFromRawStack<'a> {
	page: &'a PageContext,
	metadata: &'a dyn MetadataProvider,
}

impl<'a> AssembleFromRawStack<'a> {
	pub fn new(page: &'a PageContext, metadata: &'a dyn MetadataProvider) -> Self {
		Self { page, metadata }
	}

	/// Assembles the event stamped with the current time.
	pub fn assemble(
		&self,
		exception: ExceptionDescriptor<TraceKitFrame>,
		options: &ReportOptions,
	) -> ExceptionEvent {
		self.assemble_at(exception, options, Utc::now().timestamp())
	}

	/// Assembles the event stamped with `timestamp` (Unix seconds).
	#[instrument(skip_all, fields(exception_type = %exception.exception_type))]
	pub fn assemble_at(
		&self,
		mut exception: ExceptionDescriptor<TraceKitFrame>,
		options: &ReportOptions,
		timestamp: i64,
	) -> ExceptionEvent {
		let mut frames: Vec<CanonicalFrame> = match exception.stack.take() {
			Some(stack) if !stack.is_empty() => stack
				.iter()
				.filter_map(|frame| normalize_tracekit_frame(frame, self.page))
				.collect(),
			_ => exception.frames.take().unwrap_or_default(),
		};
		frames.reverse();

		let value = legacy_message(exception.message.as_ref());
		let file_url = clean_file_url(exception.fileurl.as_deref(), self.page);

		let culprit = frames
			.first()
			.and_then(|frame| frame.filename.clone())
			.filter(|f| !f.is_empty())
			.unwrap_or_else(|| file_url.clone());

		if frames.is_empty() {
			frames.push(CanonicalFrame::location(file_url, exception.lineno));
		}

		let message = match exception.lineno {
			Some(lineno) if lineno != 0 => format!("{value} at {lineno}"),
			_ => value.to_string(),
		};

		let user = options
			.context
			.user
			.clone()
			.filter(is_truthy)
			.unwrap_or(Value::Null);

		let extra = base_metadata(self.page, self.metadata);
		let data = options
			.context
			.extra
			.as_ref()
			.map(|caller_extra| merge_object(&extra, caller_extra));

		let event = ExceptionEvent {
			message,
			culprit,
			exception: ExceptionInfo {
				exception_type: exception.exception_type,
				value,
			},
			http: None,
			stacktrace: Stacktrace { frames },
			user,
			extra,
			data,
			level: None,
			logger: None,
			machine: None,
			timestamp: Some(timestamp),
		};

		debug!(
			culprit = %event.culprit,
			frame_count = event.stacktrace.frames.len(),
			timestamp,
			"Assembled TraceKit exception event"
		);
		event
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{page, PAGE_URL};
	use loom_crash_core::{BrowserMetadata, StaticMetadata};
	use serde_json::json;

	fn metadata() -> StaticMetadata {
		StaticMetadata(BrowserMetadata {
			utc_offset: 2.0,
			browser_width: 1024,
			browser_height: 768,
			screen_width: 1920,
			screen_height: 1080,
			language: "en-GB".to_string(),
			user_agent: "Mozilla/5.0".to_string(),
			platform: "Linux x86_64".to_string(),
		})
	}

	fn frame(filename: &str, lineno: u32) -> CanonicalFrame {
		CanonicalFrame::location(filename, Some(lineno))
	}

	mod resolved_frames {
		use super::*;

		fn assemble(exception: ExceptionDescriptor, options: &ReportOptions) -> ExceptionEvent {
			let page = page();
			let metadata = metadata();
			AssembleFromResolvedFrames::new(&page, &metadata).assemble(exception, options)
		}

		#[test]
		fn test_frames_are_reversed_and_culprit_is_newest() {
			let exception = ExceptionDescriptor::new("TypeError", "x is undefined")
				.with_frames(vec![frame("app.js", 10), frame("vendor.js", 5)]);

			let event = assemble(exception, &ReportOptions::default());

			let lines: Vec<_> = event.stacktrace.frames.iter().map(|f| f.lineno).collect();
			assert_eq!(lines, vec![Some(5), Some(10)]);
			assert_eq!(event.culprit, "app.js");
			assert_eq!(event.message, "TypeError: x is undefined");
			assert_eq!(
				event.exception.value,
				ExceptionValue::Text("x is undefined".to_string())
			);
		}

		#[test]
		fn test_inline_file_url_without_frames() {
			let exception =
				ExceptionDescriptor::new("ReferenceError", "foo").with_location(PAGE_URL, Some(3));

			let event = assemble(exception, &ReportOptions::default());

			assert_eq!(event.culprit, INLINE_SCRIPT);
			assert_eq!(event.stacktrace.frames.len(), 1);
			assert_eq!(
				event.stacktrace.frames[0].filename.as_deref(),
				Some("shop/index.html")
			);
			assert_eq!(event.stacktrace.frames[0].lineno, Some(3));
		}

		#[test]
		fn test_skipped_frames_are_dropped() {
			let exception = ExceptionDescriptor::new("Error", "boom").with_frames(vec![
				frame("app.js", 42),
				CanonicalFrame::default(),
				frame("lib.js", 1),
			]);

			let event = assemble(exception, &ReportOptions::default());

			assert_eq!(event.stacktrace.frames.len(), 2);
			assert!(event.stacktrace.frames.iter().all(|f| !f.is_empty()));
		}

		#[test]
		fn test_newest_frame_without_filename_is_inline() {
			let newest = CanonicalFrame {
				lineno: Some(8),
				..CanonicalFrame::default()
			};
			let exception = ExceptionDescriptor::new("Error", "boom").with_frames(vec![newest]);

			let event = assemble(exception, &ReportOptions::default());
			assert_eq!(event.culprit, INLINE_SCRIPT);
		}

		#[test]
		fn test_same_origin_file_url_is_culprit() {
			let exception = ExceptionDescriptor::new("Error", "boom")
				.with_location("https://example.com/static/app.js", Some(1))
				.with_frames(vec![frame("static/other.js", 2)]);

			let event = assemble(exception, &ReportOptions::default());
			assert_eq!(event.culprit, "static/app.js");
		}

		#[test]
		fn test_missing_or_falsy_message_is_script_error() {
			for message in [None, Some(json!("")), Some(json!(0)), Some(json!(null))] {
				let exception = ExceptionDescriptor::<TraceKitFrame> {
					exception_type: "Error".to_string(),
					message,
					..ExceptionDescriptor::default()
				};

				let page = page();
				let metadata = metadata();
				let event = AssembleFromResolvedFrames::new(&page, &metadata)
					.assemble(exception, &ReportOptions::default());

				assert_eq!(event.message, "Error: Script error");
				assert_eq!(
					event.exception.value,
					ExceptionValue::Text(SCRIPT_ERROR.to_string())
				);
			}
		}

		#[test]
		fn test_non_string_message_is_coerced() {
			let exception = ExceptionDescriptor::new("Error", json!({"code": 1}));
			let event = assemble(exception, &ReportOptions::default());
			assert_eq!(event.message, "Error: [object Object]");
		}

		#[test]
		fn test_wire_fields() {
			let event = assemble(
				ExceptionDescriptor::new("TypeError", "boom").with_frames(vec![frame("app.js", 1)]),
				&ReportOptions::default(),
			);
			let value = serde_json::to_value(&event).unwrap();

			assert_eq!(value["http"]["url"], PAGE_URL);
			assert_eq!(value["user"], json!({}));
			assert_eq!(value["extra"]["environment"]["userAgent"], "Mozilla/5.0");
			assert_eq!(value["extra"]["environment"]["screenWidth"], 1920);
			assert_eq!(value["extra"]["page"]["location"], PAGE_URL);
			assert_eq!(value["extra"]["page"]["host"], "example.com");
			assert!(value["level"].is_null());
			assert!(value["logger"].is_null());
			assert!(value["machine"].is_null());
			assert!(value.get("timestamp").is_none());
			assert!(value.get("data").is_none());
		}

		#[test]
		fn test_caller_extra_wins_and_user_is_kept() {
			let mut caller_extra = Map::new();
			caller_extra.insert("page".to_string(), json!("checkout"));
			caller_extra.insert("build".to_string(), json!("abc123"));
			let options = ReportOptions::default()
				.with_user(json!({"id": 7}))
				.with_extra(caller_extra);

			let event = assemble(ExceptionDescriptor::new("Error", "boom"), &options);

			assert_eq!(event.extra["page"], json!("checkout"));
			assert_eq!(event.extra["build"], json!("abc123"));
			assert!(event.extra.contains_key("environment"));
			assert_eq!(event.user, json!({"id": 7}));
			assert!(event.data.is_none());
		}
	}

	mod raw_stack {
		use super::*;

		fn tracekit(url: &str, line: u32, func: Option<&str>) -> TraceKitFrame {
			TraceKitFrame {
				url: Some(url.to_string()),
				line: Some(line),
				column: None,
				func: func.map(str::to_string),
			}
		}

		fn assemble(
			exception: ExceptionDescriptor<TraceKitFrame>,
			options: &ReportOptions,
		) -> ExceptionEvent {
			let page = page();
			let metadata = metadata();
			AssembleFromRawStack::new(&page, &metadata).assemble_at(
				exception,
				options,
				1_700_000_000,
			)
		}

		#[test]
		fn test_stack_is_normalized_and_reversed() {
			let exception = ExceptionDescriptor::new("TypeError", "boom")
				.with_location("https://cdn.example.org/app.js", Some(10))
				.with_stack(vec![
					tracekit("https://cdn.example.org/app.js", 10, Some("inner")),
					TraceKitFrame::default(),
					tracekit(PAGE_URL, 2, None),
				]);

			let event = assemble(exception, &ReportOptions::default());

			let frames = &event.stacktrace.frames;
			assert_eq!(frames.len(), 2);
			assert_eq!(frames[0].filename.as_deref(), Some("/"));
			assert_eq!(frames[0].function.as_deref(), Some("[anonymous]"));
			assert_eq!(frames[1].filename.as_deref(), Some("https://cdn.example.org/app.js"));
			assert_eq!(frames[1].function.as_deref(), Some("inner"));
			assert_eq!(event.culprit, "/");
			assert_eq!(event.message, "boom at 10");
			assert_eq!(event.timestamp, Some(1_700_000_000));
		}

		#[test]
		fn test_falsy_message_yields_integer_zero() {
			for message in [None, Some(json!("")), Some(json!(false)), Some(json!(null))] {
				let exception = ExceptionDescriptor::<TraceKitFrame> {
					exception_type: "Error".to_string(),
					message,
					lineno: Some(4),
					..ExceptionDescriptor::default()
				};

				let event = assemble(exception, &ReportOptions::default());

				assert_eq!(event.exception.value, ExceptionValue::Integer(0));
				assert_eq!(event.message, "0 at 4");
				assert_eq!(serde_json::to_value(&event).unwrap()["exception"]["value"], json!(0));
			}
		}

		#[test]
		fn test_no_frames_synthesizes_location_frame() {
			let exception = ExceptionDescriptor::<TraceKitFrame>::new("Error", "boom")
				.with_location("https://cdn.example.org/lib.js", None);

			let event = assemble(exception, &ReportOptions::default());

			assert_eq!(event.culprit, "https://cdn.example.org/lib.js");
			assert_eq!(event.message, "boom");
			assert_eq!(
				event.stacktrace.frames,
				vec![CanonicalFrame::location("https://cdn.example.org/lib.js", None)]
			);
		}

		#[test]
		fn test_pre_existing_frames_used_without_stack() {
			let exception = ExceptionDescriptor::<TraceKitFrame>::new("Error", "boom")
				.with_frames(vec![frame("b.js", 2), frame("a.js", 1)]);

			let event = assemble(exception, &ReportOptions::default());

			assert_eq!(event.stacktrace.frames[0].filename.as_deref(), Some("a.js"));
			assert_eq!(event.culprit, "a.js");
		}

		#[test]
		fn test_caller_extra_goes_to_data() {
			let mut caller_extra = Map::new();
			caller_extra.insert("build".to_string(), json!("abc123"));
			let options = ReportOptions::default().with_extra(caller_extra);

			let event = assemble(ExceptionDescriptor::new("Error", "boom"), &options);

			assert!(!event.extra.contains_key("build"));
			let data = event.data.unwrap();
			assert_eq!(data["build"], json!("abc123"));
			assert!(data.contains_key("environment"));
			assert!(data.contains_key("page"));
		}

		#[test]
		fn test_missing_user_is_null() {
			let event = assemble(
				ExceptionDescriptor::new("Error", "boom"),
				&ReportOptions::default(),
			);
			assert!(event.user.is_null());
			assert!(event.http.is_none());
		}
	}
}
