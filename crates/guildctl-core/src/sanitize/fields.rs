//! Per-kind value coercion. Every function is total: unusable input yields the default.

use serde_json::Value;

use guildctl_types::utils::truncate_chars;

use crate::prelude::*;
use crate::schema::SelectChoice;

/// Interpret loosely typed input as a boolean
pub fn coerce_bool(value: &Value) -> Option<bool> {
	match value {
		Value::Bool(b) => Some(*b),
		Value::Number(n) => n.as_f64().map(|f| f != 0.0),
		Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
			"true" | "1" | "yes" | "on" => Some(true),
			"false" | "0" | "no" | "off" => Some(false),
			_ => None,
		},
		_ => None,
	}
}

pub fn sanitize_boolean(candidate: Option<&Value>, default: bool) -> bool {
	candidate.and_then(coerce_bool).unwrap_or(default)
}

/// Pick a choice reachable at `tier`.
///
/// A reachable candidate is kept. A known choice above the tier is lowered to the
/// highest reachable one. Anything else gets the default, or the highest reachable
/// choice if the default itself is out of reach.
pub fn sanitize_select(
	candidate: Option<&Value>,
	choices: &[SelectChoice],
	default: &str,
	tier: Tier,
) -> String {
	let reachable = |value: &str| choices.iter().any(|c| c.value == value && c.min_tier <= tier);
	let highest = choices.iter().rev().find(|c| c.min_tier <= tier).map(|c| c.value.as_str());

	match candidate.and_then(Value::as_str) {
		Some(value) if reachable(value) => value.to_string(),
		Some(value) if choices.iter().any(|c| c.value == value) => {
			highest.unwrap_or(default).to_string()
		}
		_ if reachable(default) => default.to_string(),
		_ => highest.unwrap_or(default).to_string(),
	}
}

fn coerce_number(value: &Value) -> Option<f64> {
	let n = match value {
		Value::Number(n) => n.as_f64()?,
		Value::String(s) => s.trim().parse::<f64>().ok()?,
		_ => return None,
	};
	n.is_finite().then_some(n)
}

/// Round and clamp a numeric candidate into `[min, max]`
pub fn sanitize_range(candidate: Option<&Value>, min: i64, max: i64, default: i64) -> i64 {
	match candidate.and_then(coerce_number) {
		Some(n) => (n.round().clamp(min as f64, max as f64) as i64).clamp(min, max),
		None => default,
	}
}

/// Keep vocabulary entries in candidate order, each once
pub fn sanitize_multiselect(
	candidate: Option<&Value>,
	vocabulary: &[String],
	default: &[String],
) -> Vec<String> {
	let Some(entries) = candidate.and_then(Value::as_array) else {
		return default.to_vec();
	};

	let mut result: Vec<String> = Vec::new();
	for entry in entries.iter().filter_map(Value::as_str) {
		if vocabulary.iter().any(|v| v == entry) && !result.iter().any(|r| r == entry) {
			result.push(entry.to_string());
		}
	}
	result
}

pub fn sanitize_text(
	candidate: Option<&Value>,
	max_len: usize,
	default: Option<&str>,
	placeholder: &str,
) -> String {
	let raw = match candidate {
		Some(Value::String(s)) => s.clone(),
		Some(Value::Number(n)) => n.to_string(),
		Some(Value::Bool(b)) => b.to_string(),
		_ => String::new(),
	};

	let text = truncate_chars(raw.trim(), max_len).trim();
	if text.is_empty() {
		default.unwrap_or(placeholder).to_string()
	} else {
		text.to_string()
	}
}

/// `#RRGGBB` in any case to uppercase, `None` for anything else
pub fn normalize_color(raw: &str) -> Option<String> {
	let hex = raw.trim().strip_prefix('#')?;
	if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
		Some(format!("#{}", hex.to_ascii_uppercase()))
	} else {
		None
	}
}

pub fn sanitize_color(candidate: Option<&Value>, default: &str) -> String {
	candidate
		.and_then(Value::as_str)
		.and_then(normalize_color)
		.unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_coerce_bool() {
		assert_eq!(coerce_bool(&json!(true)), Some(true));
		assert_eq!(coerce_bool(&json!("Yes")), Some(true));
		assert_eq!(coerce_bool(&json!(" off ")), Some(false));
		assert_eq!(coerce_bool(&json!(0)), Some(false));
		assert_eq!(coerce_bool(&json!(2.5)), Some(true));
		assert_eq!(coerce_bool(&json!("maybe")), None);
		assert_eq!(coerce_bool(&json!([true])), None);
		assert!(sanitize_boolean(Some(&json!(null)), true));
		assert!(!sanitize_boolean(None, false));
	}

	fn quality() -> Vec<SelectChoice> {
		vec![
			SelectChoice::new("standard", Tier::Free),
			SelectChoice::new("high", Tier::Starter),
			SelectChoice::new("lossless", Tier::Growth),
			SelectChoice::new("studio", Tier::Enterprise),
		]
	}

	#[test]
	fn test_select_reachable_kept() {
		let value = sanitize_select(Some(&json!("high")), &quality(), "high", Tier::Pro);
		assert_eq!(value, "high");
	}

	#[test]
	fn test_select_gated_choice_lowered() {
		let value = sanitize_select(Some(&json!("studio")), &quality(), "standard", Tier::Pro);
		assert_eq!(value, "high");
	}

	#[test]
	fn test_select_unknown_uses_default() {
		let value = sanitize_select(Some(&json!("ultra")), &quality(), "standard", Tier::Scale);
		assert_eq!(value, "standard");
		let value = sanitize_select(Some(&json!(3)), &quality(), "standard", Tier::Scale);
		assert_eq!(value, "standard");
	}

	#[test]
	fn test_select_unreachable_default() {
		let value = sanitize_select(None, &quality(), "high", Tier::Free);
		assert_eq!(value, "standard");
	}

	#[test]
	fn test_range() {
		assert_eq!(sanitize_range(Some(&json!(42.6)), 1, 100, 10), 43);
		assert_eq!(sanitize_range(Some(&json!(" 7 ")), 1, 100, 10), 7);
		assert_eq!(sanitize_range(Some(&json!(-5)), 1, 100, 10), 1);
		assert_eq!(sanitize_range(Some(&json!(1e300)), 1, 100, 10), 100);
		assert_eq!(sanitize_range(Some(&json!("NaN")), 1, 100, 10), 10);
		assert_eq!(sanitize_range(Some(&json!("inf")), 1, 100, 10), 10);
		assert_eq!(sanitize_range(Some(&json!(true)), 1, 100, 10), 10);
		assert_eq!(sanitize_range(None, 1, 100, 10), 10);
	}

	#[test]
	fn test_multiselect() {
		let vocabulary = vec!["a".to_string(), "b".to_string(), "c".to_string()];
		let default = vec!["a".to_string()];
		assert_eq!(
			sanitize_multiselect(Some(&json!(["c", "x", 1, "a", "c"])), &vocabulary, &default),
			vec!["c", "a"]
		);
		assert_eq!(sanitize_multiselect(Some(&json!("a,b")), &vocabulary, &default), vec!["a"]);
		assert!(sanitize_multiselect(Some(&json!(["zzz"])), &vocabulary, &default).is_empty());
	}

	#[test]
	fn test_text() {
		assert_eq!(sanitize_text(Some(&json!("  hey  ")), 10, Some("d"), "p"), "hey");
		assert_eq!(sanitize_text(Some(&json!("abcd efgh")), 5, Some("d"), "p"), "abcd");
		assert_eq!(sanitize_text(Some(&json!(42)), 10, None, "p"), "42");
		assert_eq!(sanitize_text(Some(&json!("   ")), 10, Some("d"), "p"), "d");
		assert_eq!(sanitize_text(Some(&json!({})), 10, None, "p"), "p");
	}

	#[test]
	fn test_color() {
		assert_eq!(normalize_color("#a1b2c3").as_deref(), Some("#A1B2C3"));
		assert_eq!(normalize_color("a1b2c3"), None);
		assert_eq!(normalize_color("#abc"), None);
		assert_eq!(normalize_color("#gggggg"), None);
		assert_eq!(sanitize_color(Some(&json!("not-a-color")), "#5865F2"), "#5865F2");
	}
}

// vim: ts=4
