//! Normalizations that look at more than one field, run after the per-key pass.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::order::{clamp_str, AnalyticsMode, AutomationLevel, Ladder, PlaybackQuality, SourceAccess};
use crate::plan::PlanCapabilities;
use crate::record::{ConfigRecord, OptionValue};
use crate::schema::keys;

static WINDOW_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]-([01][0-9]|2[0-3]):[0-5][0-9]$").ok()
});

/// Bring the queue length under the plan's cap
pub fn clamp_queue_limit(record: &mut ConfigRecord, caps: &PlanCapabilities) {
	if let (Some(value), Some(cap)) = (record.get_int(keys::QUEUE_LIMIT), caps.queue_limit) {
		if value > cap {
			record.set(keys::QUEUE_LIMIT, OptionValue::Int(cap));
		}
	}
}

fn clamp_ladder<L: Ladder>(record: &mut ConfigRecord, key: &str, ceiling: L) {
	if let Some(raw) = record.get_str(key) {
		let clamped = clamp_str(raw, ceiling);
		if clamped.as_str() != raw {
			record.set(key, OptionValue::String(clamped.as_str().to_string()));
		}
	}
}

/// Clamp the four ordered options to the plan's ceilings
pub fn clamp_ladders(record: &mut ConfigRecord, caps: &PlanCapabilities) {
	clamp_ladder::<SourceAccess>(record, keys::SOURCE_ACCESS, caps.source_access);
	clamp_ladder::<PlaybackQuality>(record, keys::PLAYBACK_QUALITY, caps.playback_quality);
	clamp_ladder::<AnalyticsMode>(record, keys::ANALYTICS_MODE, caps.analytics_mode);
	clamp_ladder::<AutomationLevel>(record, keys::AUTOMATION_LEVEL, caps.automation_level);
}

/// `HH:MM-HH:MM` if the plan allows windows, blank otherwise
pub fn automation_window(candidate: Option<&Value>, caps: &PlanCapabilities) -> String {
	if !caps.automation_windows {
		return String::new();
	}

	let Some(window) = candidate.and_then(Value::as_str).map(str::trim) else {
		return String::new();
	};
	match WINDOW_RE.as_ref() {
		Some(re) if re.is_match(window) => window.to_string(),
		_ => String::new(),
	}
}

/// Replace a region the plan does not allow with the plan's fallback
pub fn restrict_region(record: &mut ConfigRecord, caps: &PlanCapabilities) {
	if let Some(region) = record.get_str(keys::ROUTING_REGION) {
		if !caps.allows_region(region) {
			record.set(keys::ROUTING_REGION, OptionValue::String(caps.fallback_region().to_string()));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::plan::capabilities;
	use crate::prelude::*;
	use serde_json::json;

	#[test]
	fn test_window_requires_plan() {
		let window = json!("08:00-17:30");
		assert_eq!(automation_window(Some(&window), capabilities(Tier::Pro)), "");
		assert_eq!(automation_window(Some(&window), capabilities(Tier::Growth)), "08:00-17:30");
	}

	#[test]
	fn test_window_format() {
		let caps = capabilities(Tier::Scale);
		assert_eq!(automation_window(Some(&json!(" 23:59-00:00 ")), caps), "23:59-00:00");
		assert_eq!(automation_window(Some(&json!("24:00-01:00")), caps), "");
		assert_eq!(automation_window(Some(&json!("8:00-17:00")), caps), "");
		assert_eq!(automation_window(Some(&json!("08:60-17:00")), caps), "");
		assert_eq!(automation_window(Some(&json!(800)), caps), "");
		// Non-ASCII digits
		assert_eq!(automation_window(Some(&json!("0\u{663}:00-1\u{660}:00")), caps), "");
		assert_eq!(automation_window(Some(&json!("\u{ff10}8:00-17:00")), caps), "");
		assert_eq!(automation_window(None, caps), "");
	}
}

// vim: ts=4
