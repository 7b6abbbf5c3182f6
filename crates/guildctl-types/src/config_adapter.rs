//! Persistence and subscription collaborators.
//!
//! The engine never knows where a record lives. It reads a raw candidate, reconciles it
//! and hands a full record back for a whole-record replace.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait ConfigAdapter: Debug + Send + Sync {
	/// Load the stored record for a tenant. Tenants without a record yield `Value::Null`.
	async fn load_config(&self, tn_id: TnId) -> ClResult<serde_json::Value>;

	/// Replace the stored record for a tenant, returning what was stored.
	async fn store_config(
		&self,
		tn_id: TnId,
		actor: Option<&str>,
		record: &serde_json::Value,
	) -> ClResult<serde_json::Value>;
}

#[async_trait]
pub trait TierResolver: Debug + Send + Sync {
	async fn resolve_tier(&self, tn_id: TnId) -> ClResult<Tier>;
}

// vim: ts=4
