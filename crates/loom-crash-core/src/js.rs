// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JavaScript value semantics needed to build event messages from arbitrary
//! thrown values.

use serde_json::Value;

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

/// `String(value)`. A missing value coerces to `"undefined"`.
pub fn to_js_string(value: Option<&Value>) -> String {
	match value {
		None => "undefined".to_string(),
		Some(value) => value_to_string(value),
	}
}

fn value_to_string(value: &Value) -> String {
	match value {
		Value::Null => "null".to_string(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => n.to_string(),
		Value::String(s) => s.clone(),
		Value::Array(items) => items
			.iter()
			.map(|item| match item {
				Value::Null => String::new(),
				other => value_to_string(other),
			})
			.collect::<Vec<_>>()
			.join(","),
		Value::Object(_) => "[object Object]".to_string(),
	}
}

/// `Number(s)` for a string operand.
pub fn to_js_number(s: &str) -> f64 {
	let trimmed = s.trim();
	if trimmed.is_empty() {
		return 0.0;
	}

	match trimmed {
		"Infinity" | "+Infinity" => return f64::INFINITY,
		"-Infinity" => return f64::NEG_INFINITY,
		_ => {}
	}

	for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
		if let Some(digits) = trimmed.strip_prefix(prefix) {
			return u64::from_str_radix(digits, radix)
				.map(|n| n as f64)
				.unwrap_or(f64::NAN);
		}
	}

	// Rust accepts "inf" and "nan" spellings that JavaScript does not.
	if trimmed
		.chars()
		.any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
	{
		return f64::NAN;
	}

	trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `ToInt32(n)`.
pub fn to_int32(n: f64) -> i32 {
	if !n.is_finite() {
		return 0;
	}

	let modulo = n.trunc().rem_euclid(4_294_967_296.0);
	if modulo >= 2_147_483_648.0 {
		(modulo - 4_294_967_296.0) as i32
	} else {
		modulo as i32
	}
}

/// `a | b` where both operands are strings.
pub fn bitwise_or_strings(a: &str, b: &str) -> i32 {
	to_int32(to_js_number(a)) | to_int32(to_js_number(b))
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	#[test]
	fn test_truthiness() {
		assert!(!is_truthy(&json!(null)));
		assert!(!is_truthy(&json!(false)));
		assert!(!is_truthy(&json!(0)));
		assert!(!is_truthy(&json!(0.0)));
		assert!(!is_truthy(&json!("")));
		assert!(is_truthy(&json!("x")));
		assert!(is_truthy(&json!(-1)));
		assert!(is_truthy(&json!([])));
		assert!(is_truthy(&json!({})));
	}

	#[test]
	fn test_string_coercion() {
		assert_eq!(to_js_string(None), "undefined");
		assert_eq!(to_js_string(Some(&json!(null))), "null");
		assert_eq!(to_js_string(Some(&json!(42))), "42");
		assert_eq!(to_js_string(Some(&json!(true))), "true");
		assert_eq!(to_js_string(Some(&json!("boom"))), "boom");
		assert_eq!(to_js_string(Some(&json!([1, null, "a"]))), "1,,a");
		assert_eq!(to_js_string(Some(&json!({"a": 1}))), "[object Object]");
	}

	#[test]
	fn test_number_coercion() {
		assert_eq!(to_js_number(""), 0.0);
		assert_eq!(to_js_number("  12 "), 12.0);
		assert_eq!(to_js_number("0x1f"), 31.0);
		assert_eq!(to_js_number("1e3"), 1000.0);
		assert_eq!(to_js_number("-Infinity"), f64::NEG_INFINITY);
		assert!(to_js_number("Script error").is_nan());
		assert!(to_js_number("undefined").is_nan());
		assert!(to_js_number("inf").is_nan());
		assert!(to_js_number("nan").is_nan());
	}

	#[test]
	fn test_to_int32_wraps() {
		assert_eq!(to_int32(f64::NAN), 0);
		assert_eq!(to_int32(3.9), 3);
		assert_eq!(to_int32(-3.9), -3);
		assert_eq!(to_int32(2_147_483_648.0), -2_147_483_648);
		assert_eq!(to_int32(4_294_967_297.0), 1);
	}

	#[test]
	fn test_bitwise_or_against_script_error() {
		assert_eq!(bitwise_or_strings("undefined", "Script error"), 0);
		assert_eq!(bitwise_or_strings("", "Script error"), 0);
		assert_eq!(bitwise_or_strings("42", "Script error"), 42);
	}

	proptest! {
		#[test]
		fn int32_matches_i32_for_in_range_integers(n in any::<i32>()) {
			prop_assert_eq!(to_int32(n as f64), n);
		}
	}
}
