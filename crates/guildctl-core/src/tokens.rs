//! API token lifecycle.
//!
//! Tokens live in the `apiTokens` list of the configuration record. Every operation
//! here works on that list only and takes the current time from the caller, so the
//! module has no clock and no I/O of its own.
//!
//! Only the hash and the last four characters of a secret are kept. The raw secret
//! is handed out exactly once, by [`create`] or [`rotate`].

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;
use std::collections::HashSet;

use guildctl_types::hasher;
use guildctl_types::notify_adapter::AuditAction;
use guildctl_types::utils::{last_chars, random_string, truncate_chars};

use crate::prelude::*;

/// Hard limit of tokens per tenant
pub const MAX_TOKENS: usize = 10;

pub const SECRET_PREFIX: &str = "gk_";
const SECRET_RANDOM_LEN: usize = 40;

pub const LABEL_MAX: usize = 64;
pub const DEFAULT_LABEL: &str = "API token";

/// Scopes a token may carry
pub const SCOPES: &[&str] = &[
	"settings:read",
	"settings:write",
	"queue:read",
	"queue:write",
	"analytics:read",
	"tokens:manage",
];
pub const DEFAULT_SCOPE: &str = "settings:read";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
	Active,
	Disabled,
}

/// Stored form of a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTokenRecord {
	pub id: String,
	pub label: String,
	pub secret_hash: String,
	pub last_four: String,
	pub created_at: String,
	pub rotated_at: Option<String>,
	pub last_used_at: Option<String>,
	pub scopes: Vec<String>,
	pub created_by: Option<String>,
	pub status: TokenStatus,
	pub expires_at: Option<String>,
	pub leak_detected: bool,
}

impl ApiTokenRecord {
	pub fn is_active(&self) -> bool {
		self.status == TokenStatus::Active
	}
}

/// Masked form of a token, safe to return to callers
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenView {
	pub id: String,
	pub label: String,
	pub last_four: String,
	pub created_at: String,
	pub rotated_at: Option<String>,
	pub last_used_at: Option<String>,
	pub scopes: Vec<String>,
	pub created_by: Option<String>,
	pub status: TokenStatus,
	pub expires_at: Option<String>,
	pub leak_detected: bool,
}

impl From<&ApiTokenRecord> for TokenView {
	fn from(token: &ApiTokenRecord) -> Self {
		TokenView {
			id: token.id.clone(),
			label: token.label.clone(),
			last_four: token.last_four.clone(),
			created_at: token.created_at.clone(),
			rotated_at: token.rotated_at.clone(),
			last_used_at: token.last_used_at.clone(),
			scopes: token.scopes.clone(),
			created_by: token.created_by.clone(),
			status: token.status,
			expires_at: token.expires_at.clone(),
			leak_detected: token.leak_detected,
		}
	}
}

/// A token together with its raw secret. Returned once, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
	pub token: TokenView,
	pub secret: String,
}

#[derive(Debug, Default)]
pub struct CreateTokenOpts<'a> {
	pub label: Option<&'a str>,
	pub scopes: Option<&'a [String]>,
	/// Lifetime in days, 0 for no expiry
	pub ttl_days: i64,
	pub created_by: Option<&'a str>,
}

/// Caller requested lifecycle transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenAction {
	Rotate,
	Disable,
	Enable,
	MarkLeak,
	ClearLeak,
	SetExpiry(Option<String>),
}

impl TokenAction {
	/// Parse an action name. `expires_at` is only used by `set_expiry`.
	pub fn parse(name: &str, expires_at: Option<String>) -> ClResult<Self> {
		match name {
			"rotate" => Ok(TokenAction::Rotate),
			"disable" => Ok(TokenAction::Disable),
			"enable" => Ok(TokenAction::Enable),
			"mark_leak" => Ok(TokenAction::MarkLeak),
			"clear_leak" => Ok(TokenAction::ClearLeak),
			"set_expiry" => Ok(TokenAction::SetExpiry(expires_at)),
			other => Err(Error::UnsupportedTokenAction(other.to_string())),
		}
	}

	pub fn audit_action(&self) -> AuditAction {
		match self {
			TokenAction::Rotate => AuditAction::Rotate,
			TokenAction::Disable => AuditAction::Disable,
			TokenAction::Enable => AuditAction::Enable,
			TokenAction::MarkLeak => AuditAction::Leak,
			TokenAction::ClearLeak => AuditAction::ClearLeak,
			TokenAction::SetExpiry(_) => AuditAction::SetExpiry,
		}
	}
}

/// Result of [`apply`]
#[derive(Debug, Clone)]
pub struct ActionOutcome {
	pub token: TokenView,
	pub audit: AuditAction,
	/// Present after a rotation only
	pub secret: Option<String>,
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
	ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(s).ok().map(|ts| ts.with_timezone(&Utc))
}

fn new_secret() -> String {
	format!("{}{}", SECRET_PREFIX, random_string(SECRET_RANDOM_LEN))
}

fn hash_secret(secret: &str) -> String {
	hasher::hash("k", secret.as_bytes()).into()
}

/// Keep known scopes, first occurrence only. Falls back to the read scope if none remain.
pub fn normalize_scopes<'a>(requested: impl IntoIterator<Item = &'a str>) -> Vec<String> {
	let mut scopes: Vec<String> = Vec::new();
	for scope in requested {
		if SCOPES.contains(&scope) && !scopes.iter().any(|s| s == scope) {
			scopes.push(scope.to_string());
		}
	}
	if scopes.is_empty() {
		scopes.push(DEFAULT_SCOPE.to_string());
	}
	scopes
}

fn normalize_label(label: Option<&str>) -> String {
	let label = truncate_chars(label.unwrap_or_default().trim(), LABEL_MAX).trim();
	if label.is_empty() { DEFAULT_LABEL.to_string() } else { label.to_string() }
}

fn find_mut<'a>(tokens: &'a mut [ApiTokenRecord], id: &str) -> ClResult<&'a mut ApiTokenRecord> {
	tokens.iter_mut().find(|t| t.id == id).ok_or(Error::TokenNotFound)
}

/// Create a token and append it to the list
pub fn create(
	tokens: &mut Vec<ApiTokenRecord>,
	opts: CreateTokenOpts<'_>,
	now: DateTime<Utc>,
) -> ClResult<IssuedToken> {
	if tokens.len() >= MAX_TOKENS {
		return Err(Error::TokenLimitExceeded);
	}

	let secret = new_secret();
	let scopes = normalize_scopes(opts.scopes.unwrap_or_default().iter().map(String::as_str));
	let expires_at = if opts.ttl_days > 0 {
		Duration::try_days(opts.ttl_days)
			.and_then(|ttl| now.checked_add_signed(ttl))
			.map(format_timestamp)
	} else {
		None
	};

	let token = ApiTokenRecord {
		id: uuid::Uuid::new_v4().to_string(),
		label: normalize_label(opts.label),
		secret_hash: hash_secret(&secret),
		last_four: last_chars(&secret, 4),
		created_at: format_timestamp(now),
		rotated_at: None,
		last_used_at: None,
		scopes,
		created_by: opts.created_by.map(str::to_string),
		status: TokenStatus::Active,
		expires_at,
		leak_detected: false,
	};
	debug!("Created API token {} ({} scopes)", token.id, token.scopes.len());

	let view = TokenView::from(&token);
	tokens.push(token);
	Ok(IssuedToken { token: view, secret })
}

/// Replace the secret of a token. Scopes, label, expiry and status stay as they are.
pub fn rotate(tokens: &mut [ApiTokenRecord], id: &str, now: DateTime<Utc>) -> ClResult<IssuedToken> {
	let token = find_mut(tokens, id)?;

	let secret = new_secret();
	token.secret_hash = hash_secret(&secret);
	token.last_four = last_chars(&secret, 4);
	token.rotated_at = Some(format_timestamp(now));

	Ok(IssuedToken { token: TokenView::from(&*token), secret })
}

/// Remove a token from the list, returning it
pub fn delete(tokens: &mut Vec<ApiTokenRecord>, id: &str) -> ClResult<ApiTokenRecord> {
	let idx = tokens.iter().position(|t| t.id == id).ok_or(Error::TokenNotFound)?;
	Ok(tokens.remove(idx))
}

/// Set or clear the expiry. Not checked against the clock; the sweep does that.
pub fn set_expiry(tokens: &mut [ApiTokenRecord], id: &str, expires_at: Option<String>) -> ClResult<()> {
	find_mut(tokens, id)?.expires_at = expires_at;
	Ok(())
}

/// Apply a caller requested transition to one token
pub fn apply(
	tokens: &mut [ApiTokenRecord],
	id: &str,
	action: TokenAction,
	now: DateTime<Utc>,
) -> ClResult<ActionOutcome> {
	let audit = action.audit_action();

	if action == TokenAction::Rotate {
		let issued = rotate(tokens, id, now)?;
		return Ok(ActionOutcome { token: issued.token, audit, secret: Some(issued.secret) });
	}

	let token = find_mut(tokens, id)?;
	match action {
		TokenAction::Disable => token.status = TokenStatus::Disabled,
		TokenAction::Enable => {
			// A leaked token stays disabled until the leak flag is cleared
			if !token.leak_detected {
				token.status = TokenStatus::Active;
			}
		}
		TokenAction::MarkLeak => {
			token.leak_detected = true;
			token.status = TokenStatus::Disabled;
		}
		TokenAction::ClearLeak => token.leak_detected = false,
		TokenAction::SetExpiry(expires_at) => token.expires_at = expires_at,
		TokenAction::Rotate => {}
	}

	Ok(ActionOutcome { token: TokenView::from(&*token), audit, secret: None })
}

/// A token is expired from its `expiresAt` instant on. Unparseable expiries never expire.
fn is_expired(token: &ApiTokenRecord, now: DateTime<Utc>) -> bool {
	token.expires_at.as_deref().and_then(parse_timestamp).is_some_and(|ts| ts <= now)
}

/// Disable active tokens whose expiry has passed. Returns the ids that changed.
pub fn sweep_expired(tokens: &mut [ApiTokenRecord], now: DateTime<Utc>) -> Vec<String> {
	let mut expired = Vec::new();
	for token in tokens.iter_mut().filter(|t| t.is_active()) {
		if is_expired(token, now) {
			token.status = TokenStatus::Disabled;
			expired.push(token.id.clone());
		}
	}
	expired
}

/// Resolve a presented secret to a usable token and stamp its last use
pub fn verify_secret(
	tokens: &mut [ApiTokenRecord],
	secret: &str,
	now: DateTime<Utc>,
) -> Option<TokenView> {
	if !secret.starts_with(SECRET_PREFIX) {
		return None;
	}

	let hash = hash_secret(secret);
	let token = tokens.iter_mut().find(|t| t.secret_hash == hash)?;
	if !token.is_active() || token.leak_detected {
		return None;
	}
	if is_expired(token, now) {
		return None;
	}

	token.last_used_at = Some(format_timestamp(now));
	Some(TokenView::from(&*token))
}

fn opt_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
	obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn sanitize_token(value: &Value) -> Option<ApiTokenRecord> {
	let obj = value.as_object()?;
	let required = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

	let leak_detected = obj.get("leakDetected").and_then(Value::as_bool).unwrap_or(false);
	let disabled = obj.get("status").and_then(Value::as_str) == Some("disabled");
	let scopes = obj
		.get("scopes")
		.and_then(Value::as_array)
		.map(|list| normalize_scopes(list.iter().filter_map(Value::as_str)))
		.unwrap_or_else(|| normalize_scopes(std::iter::empty()));

	Some(ApiTokenRecord {
		id: required("id")?,
		label: required("label")?,
		secret_hash: required("secretHash")?,
		last_four: required("lastFour")?,
		created_at: required("createdAt")?,
		rotated_at: opt_string(obj, "rotatedAt"),
		last_used_at: opt_string(obj, "lastUsedAt"),
		scopes,
		created_by: opt_string(obj, "createdBy"),
		status: if disabled || leak_detected { TokenStatus::Disabled } else { TokenStatus::Active },
		expires_at: opt_string(obj, "expiresAt"),
		leak_detected,
	})
}

/// Rebuild the token list from an untrusted candidate value
pub fn sanitize_tokens(candidate: Option<&Value>) -> Vec<ApiTokenRecord> {
	let Some(entries) = candidate.and_then(Value::as_array) else {
		return Vec::new();
	};

	let mut seen = HashSet::new();
	let tokens: Vec<ApiTokenRecord> = entries
		.iter()
		.filter_map(sanitize_token)
		.filter(|t| seen.insert(t.id.clone()))
		.take(MAX_TOKENS)
		.collect();

	if tokens.len() < entries.len() {
		debug!("Dropped {} API token entries", entries.len() - tokens.len());
	}
	tokens
}


// vim: ts=4
