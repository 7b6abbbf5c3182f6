//! Notification and audit collaborators. Both are best-effort from the engine's side.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait NotifyAdapter: Debug + Send + Sync {
	/// Push the new settings signature to the live bot process
	async fn settings_changed(&self, tn_id: TnId, signature: &str) -> ClResult<()>;

	/// Ask the voice routing layer to move the tenant to `region`
	async fn routing_rebalance(&self, tn_id: TnId, region: &str) -> ClResult<()>;
}

/// Token lifecycle transitions that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
	Create,
	Rotate,
	Disable,
	Enable,
	Leak,
	ClearLeak,
	SetExpiry,
	Delete,
	Expire,
}

impl AuditAction {
	pub fn as_str(self) -> &'static str {
		match self {
			AuditAction::Create => "create",
			AuditAction::Rotate => "rotate",
			AuditAction::Disable => "disable",
			AuditAction::Enable => "enable",
			AuditAction::Leak => "leak",
			AuditAction::ClearLeak => "clear_leak",
			AuditAction::SetExpiry => "set_expiry",
			AuditAction::Delete => "delete",
			AuditAction::Expire => "expire",
		}
	}
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
	pub tn_id: TnId,
	pub token_id: Box<str>,
	pub action: AuditAction,
	/// `None` for transitions the engine makes on its own (expiry)
	pub actor: Option<Box<str>>,
	pub meta: Option<serde_json::Value>,
}

#[async_trait]
pub trait AuditAdapter: Debug + Send + Sync {
	async fn record(&self, event: &AuditEvent) -> ClResult<()>;
}

// vim: ts=4
