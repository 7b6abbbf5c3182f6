//! Configuration service: read-modify-sanitize-write against the collaborators.
//!
//! No locking is done here. Two callers racing on the same tenant may lose one
//! update, but the stored record is always a sanitized one.

mod settings;
mod tokens;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use guildctl_core::schema::FrozenOptionRegistry;
use guildctl_core::tokens::sweep_expired;
use guildctl_core::{sanitize, signature, ConfigRecord};
use guildctl_types::config_adapter::{ConfigAdapter, TierResolver};
use guildctl_types::notify_adapter::AuditAction;

use crate::app::AppBuilderOpts;
use crate::notify::Notifier;
use crate::prelude::*;

pub use tokens::{CreateTokenReq, TokenUpdate};

/// What callers get back from reads and writes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
	pub tn_id: TnId,
	pub tier: Tier,
	pub settings: ConfigRecord,
	pub signature: Box<str>,
}

pub struct ConfigService {
	registry: Arc<FrozenOptionRegistry>,
	config: Arc<dyn ConfigAdapter>,
	tiers: Arc<dyn TierResolver>,
	notifier: Notifier,
	opts: AppBuilderOpts,
}

/// A sanitized record as loaded, before the caller changes it
struct Loaded {
	tier: Tier,
	record: ConfigRecord,
	/// Tokens the sweep disabled while loading
	expired: Vec<String>,
}

fn unavailable(what: &'static str) -> impl FnOnce(Error) -> Error {
	move |err| match err {
		Error::DependencyUnavailable(_) => err,
		other => Error::DependencyUnavailable(format!("{}: {}", what, other)),
	}
}

impl ConfigService {
	pub fn new(
		registry: Arc<FrozenOptionRegistry>,
		config: Arc<dyn ConfigAdapter>,
		tiers: Arc<dyn TierResolver>,
		notifier: Notifier,
		opts: AppBuilderOpts,
	) -> Self {
		Self { registry, config, tiers, notifier, opts }
	}

	pub fn registry(&self) -> &FrozenOptionRegistry {
		&self.registry
	}

	fn now() -> DateTime<Utc> {
		Utc::now()
	}

	async fn load(&self, tn_id: TnId) -> ClResult<Loaded> {
		let tier = self.tiers.resolve_tier(tn_id).await.map_err(unavailable("tier resolver"))?;
		let stored = self.config.load_config(tn_id).await.map_err(unavailable("config store"))?;

		let mut record = sanitize(&stored, tier, &self.registry);
		let expired = if self.opts.sweep_on_read {
			sweep_expired(&mut record.api_tokens, Self::now())
		} else {
			Vec::new()
		};
		if !expired.is_empty() {
			info!("Expired {} API tokens for tn_id={}", expired.len(), tn_id);
		}

		Ok(Loaded { tier, record, expired })
	}

	/// Store a record without any side channel
	async fn store(&self, tn_id: TnId, actor: Option<&str>, record: &ConfigRecord) -> ClResult<()> {
		let value = record.to_value()?;
		self.config
			.store_config(tn_id, actor, &value)
			.await
			.map_err(unavailable("config store"))?;
		debug!("Stored config for tn_id={}", tn_id);
		Ok(())
	}

	/// Store a record, then audit expirations found while loading and notify the bot
	async fn persist(
		&self,
		tn_id: TnId,
		actor: Option<&str>,
		loaded: &Loaded,
		record: &ConfigRecord,
	) -> ClResult<Box<str>> {
		self.store(tn_id, actor, record).await?;

		for token_id in &loaded.expired {
			self.notifier.audit(tn_id, token_id, AuditAction::Expire, None, None).await;
		}

		let signature = signature(record)?;
		self.notifier.settings_changed(tn_id, &signature);
		Ok(signature)
	}

	fn snapshot(tn_id: TnId, tier: Tier, record: ConfigRecord, signature: Box<str>) -> ConfigSnapshot {
		ConfigSnapshot { tn_id, tier, settings: record, signature }
	}
}

// vim: ts=4
