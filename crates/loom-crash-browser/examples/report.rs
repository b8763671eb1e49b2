// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Assembles an event from a captured stack and prints it.
//!
//! ```sh
//! cargo run -p loom-crash-browser --example report
//! ```

use loom_crash_browser::ExceptionReporter;
use loom_crash_core::{
	BrowserMetadata, ExceptionDescriptor, RawFrame, ReportOptions, StaticMetadata,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter("loom_crash_browser=debug")
		.init();

	let reporter = ExceptionReporter::builder()
		.page_url("https://shop.example.com/checkout")
		.enrich_frames(false)
		.metadata_provider(StaticMetadata(BrowserMetadata {
			utc_offset: 1.0,
			browser_width: 1280,
			browser_height: 800,
			screen_width: 2560,
			screen_height: 1440,
			language: "en-GB".to_string(),
			user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
			platform: "Linux x86_64".to_string(),
		}))
		.build()?;

	let stack = vec![
		RawFrame::at("https://shop.example.com/static/cart.js", 42, 17).with_function("renderCart"),
		RawFrame::at("https://shop.example.com/node_modules/react-dom/index.js", 1203, 9),
	];
	let exception =
		ExceptionDescriptor::new("TypeError", "cart.items is undefined").with_stack(stack);
	let options = ReportOptions::default().with_user(json!({ "id": "customer-17" }));

	let event = reporter.capture(exception, &options).await;
	println!("{}", serde_json::to_string_pretty(&event)?);

	Ok(())
}
