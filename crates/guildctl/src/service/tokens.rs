//! API token endpoints

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::skip_serializing_none;

use guildctl_core::schema::keys;
use guildctl_core::tokens::{self, CreateTokenOpts, IssuedToken, TokenAction, TokenView, MAX_TOKENS};
use guildctl_types::notify_adapter::AuditAction;

use super::ConfigService;
use crate::prelude::*;

const TTL_MAX_DAYS: i64 = 365;

/// Request to create a token
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenReq {
	pub label: Option<String>,
	pub scopes: Option<Vec<String>>,
	/// Overrides the tenant's configured lifetime
	pub ttl_days: Option<i64>,
}

/// Result of a multiplexed token update
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUpdate {
	pub token: TokenView,
	/// New raw secret, after a rotation only
	pub secret: Option<String>,
}

impl ConfigService {
	/// Masked tokens of a tenant
	pub async fn list_tokens(&self, tn_id: TnId) -> ClResult<Vec<TokenView>> {
		let snapshot = self.read(tn_id).await?;
		Ok(snapshot.settings.api_tokens.iter().map(TokenView::from).collect())
	}

	/// Create a token. The raw secret in the result is not stored anywhere.
	pub async fn create_token(
		&self,
		tn_id: TnId,
		actor: Option<&str>,
		req: &CreateTokenReq,
	) -> ClResult<IssuedToken> {
		let loaded = self.load(tn_id).await?;
		if loaded.record.api_tokens.len() >= MAX_TOKENS {
			warn!("Token limit reached for tn_id={}", tn_id);
			return Err(Error::TokenLimitExceeded);
		}

		// A record TTL of 0 is the option's default and defers to the app-wide one
		let ttl_days = req
			.ttl_days
			.or_else(|| loaded.record.get_int(keys::API_TOKEN_TTL_DAYS).filter(|days| *days > 0))
			.unwrap_or(self.opts.default_token_ttl_days)
			.clamp(0, TTL_MAX_DAYS);

		let opts = CreateTokenOpts {
			label: req.label.as_deref(),
			scopes: req.scopes.as_deref(),
			ttl_days,
			created_by: actor,
		};
		let mut record = loaded.record.clone();
		let issued = tokens::create(&mut record.api_tokens, opts, Self::now())?;

		self.persist(tn_id, actor, &loaded, &record).await?;
		info!("Created API token {} for tn_id={}", issued.token.id, tn_id);

		let meta = json!({ "label": issued.token.label, "scopes": issued.token.scopes });
		self.notifier.audit(tn_id, &issued.token.id, AuditAction::Create, actor, Some(meta)).await;

		Ok(issued)
	}

	/// Replace a token's secret
	pub async fn rotate_token(
		&self,
		tn_id: TnId,
		actor: Option<&str>,
		token_id: &str,
	) -> ClResult<IssuedToken> {
		let loaded = self.load(tn_id).await?;

		let mut record = loaded.record.clone();
		let issued = tokens::rotate(&mut record.api_tokens, token_id, Self::now())?;

		self.persist(tn_id, actor, &loaded, &record).await?;
		info!("Rotated API token {} for tn_id={}", token_id, tn_id);
		self.notifier.audit(tn_id, token_id, AuditAction::Rotate, actor, None).await;

		Ok(issued)
	}

	pub async fn delete_token(&self, tn_id: TnId, actor: Option<&str>, token_id: &str) -> ClResult<()> {
		let loaded = self.load(tn_id).await?;

		let mut record = loaded.record.clone();
		let removed = tokens::delete(&mut record.api_tokens, token_id)?;

		self.persist(tn_id, actor, &loaded, &record).await?;
		info!("Deleted API token {} for tn_id={}", token_id, tn_id);

		let meta = json!({ "label": removed.label });
		self.notifier.audit(tn_id, token_id, AuditAction::Delete, actor, Some(meta)).await;

		Ok(())
	}

	/// Multiplexed lifecycle update: `rotate`, `disable`, `enable`, `mark_leak`,
	/// `clear_leak` or `set_expiry` (with `expires_at`)
	pub async fn update_token(
		&self,
		tn_id: TnId,
		actor: Option<&str>,
		token_id: &str,
		action: &str,
		expires_at: Option<String>,
	) -> ClResult<TokenUpdate> {
		let action = TokenAction::parse(action, expires_at)?;
		let loaded = self.load(tn_id).await?;

		let mut record = loaded.record.clone();
		let outcome = tokens::apply(&mut record.api_tokens, token_id, action, Self::now())?;

		self.persist(tn_id, actor, &loaded, &record).await?;
		info!("Applied {} to API token {} for tn_id={}", outcome.audit.as_str(), token_id, tn_id);

		let meta = json!({
			"status": outcome.token.status,
			"leakDetected": outcome.token.leak_detected,
			"expiresAt": outcome.token.expires_at,
		});
		self.notifier.audit(tn_id, token_id, outcome.audit, actor, Some(meta)).await;

		Ok(TokenUpdate { token: outcome.token, secret: outcome.secret })
	}

	/// Resolve a presented secret to a usable token of the tenant, stamping its last use.
	///
	/// Stamping alone is not a settings change and sends no notification.
	pub async fn verify_token(&self, tn_id: TnId, secret: &str) -> ClResult<Option<TokenView>> {
		let loaded = self.load(tn_id).await?;

		let mut record = loaded.record.clone();
		let Some(token) = tokens::verify_secret(&mut record.api_tokens, secret, Self::now()) else {
			debug!("Rejected API token for tn_id={}", tn_id);
			if !loaded.expired.is_empty() {
				self.persist(tn_id, None, &loaded, &loaded.record).await?;
			}
			return Ok(None);
		};

		if loaded.expired.is_empty() {
			self.store(tn_id, None, &record).await?;
		} else {
			self.persist(tn_id, None, &loaded, &record).await?;
		}
		Ok(Some(token))
	}
}

// vim: ts=4
