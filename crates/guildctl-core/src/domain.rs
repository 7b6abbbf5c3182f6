//! Custom domain verification fields.
//!
//! The state is re-derived from the candidate on every sanitize call; nothing about
//! previous transitions is stored or trusted. An external verifier asserts progress
//! by writing the status fields, and this module only limits what it may assert.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use guildctl_types::utils::truncate_chars;

pub const HOSTNAME_MAX: usize = 150;
pub const DNS_RECORD_MAX: usize = 255;
pub const VERIFIED_AT_MAX: usize = 64;

pub const KEY_HOSTNAME: &str = "customDomain";
pub const KEY_STATUS: &str = "customDomainStatus";
pub const KEY_DNS_RECORD: &str = "customDomainDnsRecord";
pub const KEY_VERIFIED_AT: &str = "customDomainVerifiedAt";
pub const KEY_TLS_STATUS: &str = "customDomainTlsStatus";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
	Unconfigured,
	PendingDns,
	PendingTls,
	Verified,
	Failed,
}

impl VerificationStatus {
	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"unconfigured" => Some(Self::Unconfigured),
			"pending_dns" => Some(Self::PendingDns),
			"pending_tls" => Some(Self::PendingTls),
			"verified" => Some(Self::Verified),
			"failed" => Some(Self::Failed),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsStatus {
	Pending,
	Active,
	Failed,
}

impl TlsStatus {
	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"pending" => Some(Self::Pending),
			"active" => Some(Self::Active),
			"failed" => Some(Self::Failed),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainState {
	#[serde(rename = "customDomain")]
	pub hostname: String,
	#[serde(rename = "customDomainStatus")]
	pub verification_status: VerificationStatus,
	#[serde(rename = "customDomainDnsRecord")]
	pub dns_record: String,
	#[serde(rename = "customDomainVerifiedAt")]
	pub verified_at: Option<String>,
	#[serde(rename = "customDomainTlsStatus")]
	pub tls_status: TlsStatus,
}

impl DomainState {
	pub fn unconfigured() -> Self {
		DomainState {
			hostname: String::new(),
			verification_status: VerificationStatus::Unconfigured,
			dns_record: String::new(),
			verified_at: None,
			tls_status: TlsStatus::Pending,
		}
	}

	pub fn is_configured(&self) -> bool {
		!self.hostname.is_empty()
	}
}

/// Normalize a user supplied hostname. Returns an empty string if it cannot be used.
///
/// `"HTTPS://Example.COM/path"` becomes `"example.com"`.
pub fn normalize_hostname(raw: &str) -> String {
	let lower = raw.trim().to_ascii_lowercase();

	let without_scheme = match lower.find("://") {
		Some(pos)
			if pos > 0
				&& lower[..pos]
					.chars()
					.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
		{
			&lower[pos + 3..]
		}
		_ => lower.as_str(),
	};

	let host = without_scheme.split('/').next().unwrap_or_default();
	// Checked after the cap so the result normalizes to itself
	let host = truncate_chars(host, HOSTNAME_MAX);
	if !is_valid_host(host) {
		return String::new();
	}

	host.to_string()
}

/// Dot separated labels of `[a-z0-9-]`, each holding at least one letter or digit
fn is_valid_host(host: &str) -> bool {
	!host.is_empty()
		&& host.split('.').all(|label| {
			label.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
				&& label.chars().any(|c| c.is_ascii_alphanumeric())
		})
}

fn opaque_string(value: Option<&Value>, max: usize) -> Option<String> {
	value.and_then(Value::as_str).map(|s| truncate_chars(s, max).to_string())
}

/// Derive the domain fields from a candidate record
pub fn derive_domain(fields: &Map<String, Value>) -> DomainState {
	let hostname = fields
		.get(KEY_HOSTNAME)
		.and_then(Value::as_str)
		.map(normalize_hostname)
		.unwrap_or_default();

	let dns_record = opaque_string(fields.get(KEY_DNS_RECORD), DNS_RECORD_MAX).unwrap_or_default();

	if hostname.is_empty() {
		return DomainState { dns_record, ..DomainState::unconfigured() };
	}

	// With a hostname the state has left `unconfigured` by definition
	let verification_status = fields
		.get(KEY_STATUS)
		.and_then(Value::as_str)
		.and_then(VerificationStatus::parse)
		.filter(|s| *s != VerificationStatus::Unconfigured)
		.unwrap_or(VerificationStatus::PendingDns);

	let tls_status = fields
		.get(KEY_TLS_STATUS)
		.and_then(Value::as_str)
		.and_then(TlsStatus::parse)
		.unwrap_or(TlsStatus::Pending);

	DomainState {
		hostname,
		verification_status,
		dns_record,
		verified_at: opaque_string(fields.get(KEY_VERIFIED_AT), VERIFIED_AT_MAX),
		tls_status,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn derive(value: Value) -> DomainState {
		derive_domain(value.as_object().unwrap())
	}

	#[test]
	fn test_normalize_hostname() {
		assert_eq!(normalize_hostname("HTTPS://Example.COM/path"), "example.com");
		assert_eq!(normalize_hostname("music.example.org"), "music.example.org");
		assert_eq!(normalize_hostname("  http://a-b.example.net/x/y?z=1 "), "a-b.example.net");
		assert_eq!(normalize_hostname("example.com:8080"), "");
		assert_eq!(normalize_hostname("exa mple.com"), "");
		assert_eq!(normalize_hostname("https://"), "");
		assert_eq!(normalize_hostname(""), "");
		assert_eq!(normalize_hostname("ëxample.com"), "");
	}

	#[test]
	fn test_hostname_labels() {
		assert_eq!(normalize_hostname("-"), "");
		assert_eq!(normalize_hostname("."), "");
		assert_eq!(normalize_hostname("a..b"), "");
		assert_eq!(normalize_hostname("example.com."), "");
		assert_eq!(normalize_hostname(".example.com"), "");
		assert_eq!(normalize_hostname("a.-.b"), "");
		assert_eq!(normalize_hostname("my-guild.example.com"), "my-guild.example.com");
		assert_eq!(normalize_hostname("localhost"), "localhost");
	}

	#[test]
	fn test_cap_landing_on_a_dot_is_rejected() {
		// Truncation at 150 chars would leave a trailing empty label
		let host = "a".repeat(HOSTNAME_MAX - 1) + ".example.com";
		assert_eq!(normalize_hostname(&host), "");
	}

	#[test]
	fn test_hostname_capped() {
		let long = "a".repeat(400) + ".com";
		assert_eq!(normalize_hostname(&long).len(), HOSTNAME_MAX);
	}

	#[test]
	fn test_empty_hostname_forces_unconfigured() {
		let state = derive(json!({
			"customDomain": "",
			"customDomainStatus": "verified",
			"customDomainTlsStatus": "active",
			"customDomainVerifiedAt": "2026-01-01T00:00:00Z",
		}));
		assert_eq!(state.verification_status, VerificationStatus::Unconfigured);
		assert_eq!(state.tls_status, TlsStatus::Pending);
		assert_eq!(state.verified_at, None);
	}

	#[test]
	fn test_claimed_status_accepted_when_enumerated() {
		let state = derive(json!({
			"customDomain": "example.com",
			"customDomainStatus": "pending_tls",
			"customDomainTlsStatus": "active",
			"customDomainVerifiedAt": "2026-01-01T00:00:00Z",
			"customDomainDnsRecord": "CNAME play.example.net",
		}));
		assert_eq!(state.verification_status, VerificationStatus::PendingTls);
		assert_eq!(state.tls_status, TlsStatus::Active);
		assert_eq!(state.verified_at.as_deref(), Some("2026-01-01T00:00:00Z"));
		assert_eq!(state.dns_record, "CNAME play.example.net");
	}

	#[test]
	fn test_bogus_status_defaults() {
		let state = derive(json!({
			"customDomain": "example.com",
			"customDomainStatus": "totally_verified",
			"customDomainTlsStatus": 7,
		}));
		assert_eq!(state.verification_status, VerificationStatus::PendingDns);
		assert_eq!(state.tls_status, TlsStatus::Pending);
	}

	#[test]
	fn test_unconfigured_claim_with_hostname() {
		let state = derive(json!({
			"customDomain": "example.com",
			"customDomainStatus": "unconfigured",
		}));
		assert_eq!(state.verification_status, VerificationStatus::PendingDns);
	}

	#[test]
	fn test_rederivation_is_stable() {
		let first = derive(json!({ "customDomain": "HTTPS://Example.COM/path" }));
		let value = serde_json::to_value(&first).unwrap();
		assert_eq!(derive(value), first);
	}
}

// vim: ts=4
