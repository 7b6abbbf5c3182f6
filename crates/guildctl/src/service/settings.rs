//! Settings read, write and verify

use serde_json::Value;

use guildctl_core::schema::keys;
use guildctl_core::{sanitize, signature};

use super::{ConfigService, ConfigSnapshot};
use crate::prelude::*;

impl ConfigService {
	/// Current sanitized settings of a tenant.
	///
	/// Nothing is written unless the expiry sweep disabled a token.
	pub async fn read(&self, tn_id: TnId) -> ClResult<ConfigSnapshot> {
		let loaded = self.load(tn_id).await?;

		let signature = if loaded.expired.is_empty() {
			signature(&loaded.record)?
		} else {
			self.persist(tn_id, None, &loaded, &loaded.record).await?
		};

		Ok(Self::snapshot(tn_id, loaded.tier, loaded.record, signature))
	}

	/// Merge `partial` over the stored record, sanitize and store it.
	///
	/// Top-level keys of `partial` replace the stored ones. `apiTokens` is ignored;
	/// tokens only change through the token operations.
	pub async fn write(
		&self,
		tn_id: TnId,
		actor: Option<&str>,
		partial: &Value,
	) -> ClResult<ConfigSnapshot> {
		let loaded = self.load(tn_id).await?;

		let mut merged = match loaded.record.to_value()? {
			Value::Object(map) => map,
			_ => return Err(Error::Internal("record did not serialize to an object".into())),
		};
		if let Some(changes) = partial.as_object() {
			for (key, value) in changes {
				if key == keys::API_TOKENS {
					debug!("Ignoring apiTokens in settings write for tn_id={}", tn_id);
					continue;
				}
				merged.insert(key.clone(), value.clone());
			}
		}

		let record = sanitize(&Value::Object(merged), loaded.tier, self.registry());
		let signature = self.persist(tn_id, actor, &loaded, &record).await?;
		info!("Settings updated for tn_id={} by {:?}", tn_id, actor);

		let region = record.get_str(keys::ROUTING_REGION);
		if region != loaded.record.get_str(keys::ROUTING_REGION) {
			if let Some(region) = region {
				info!("Routing region of tn_id={} changed to {}", tn_id, region);
				self.notifier.routing_rebalance(tn_id, region);
			}
		}

		Ok(Self::snapshot(tn_id, loaded.tier, record, signature))
	}

	/// True if `signature` still matches the tenant's current settings
	pub async fn verify(&self, tn_id: TnId, signature: &str) -> ClResult<bool> {
		let current = self.read(tn_id).await?;
		Ok(&*current.signature == signature)
	}
}

// vim: ts=4
