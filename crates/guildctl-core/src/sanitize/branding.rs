//! Branding fields: asset URLs and the mail sender address.
//!
//! These have no schema default. A value that fails its format check is blanked.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use url::Url;

pub const URL_MAX: usize = 500;
pub const MAIL_MAX: usize = 254;

static MAIL_RE: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)*\.[A-Za-z]{2,}$").ok());

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
	pub asset_pack_url: String,
	pub embed_logo_url: String,
	pub embed_cta_url: String,
	pub mail_from_address: String,
}

impl Branding {
	pub fn from_fields(fields: &Map<String, Value>) -> Self {
		let text = |key: &str| fields.get(key).and_then(Value::as_str).unwrap_or_default();

		Branding {
			asset_pack_url: normalize_url(text("assetPackUrl")),
			embed_logo_url: normalize_url(text("embedLogoUrl")),
			embed_cta_url: normalize_url(text("embedCtaUrl")),
			mail_from_address: normalize_mail(text("mailFromAddress")),
		}
	}
}

/// Canonical http(s) URL, or blank. A bare host gets `https://`.
pub fn normalize_url(raw: &str) -> String {
	let raw = raw.trim();
	if raw.is_empty() {
		return String::new();
	}

	let with_scheme = if raw.contains("://") { raw.to_string() } else { format!("https://{}", raw) };
	let Ok(url) = Url::parse(&with_scheme) else {
		return String::new();
	};
	if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none_or(str::is_empty) {
		return String::new();
	}

	let canonical = url.to_string();
	if canonical.chars().count() > URL_MAX { String::new() } else { canonical }
}

/// `local@domain.tld`, or blank
pub fn normalize_mail(raw: &str) -> String {
	let raw = raw.trim();
	if raw.chars().count() > MAIL_MAX {
		return String::new();
	}
	match MAIL_RE.as_ref() {
		Some(re) if re.is_match(raw) => raw.to_string(),
		_ => String::new(),
	}
}


// vim: ts=4
