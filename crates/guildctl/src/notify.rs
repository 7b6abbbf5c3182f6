//! Best-effort side channels: bot notifications and token audit.
//!
//! Notifications run on their own task and never hold up the caller. Audit events
//! are awaited so they keep their order, but a failing audit sink only logs.

use std::sync::Arc;

use guildctl_types::notify_adapter::{AuditAction, AuditAdapter, AuditEvent, NotifyAdapter};

use crate::prelude::*;

#[derive(Clone, Default)]
pub struct Notifier {
	notify: Option<Arc<dyn NotifyAdapter>>,
	audit: Option<Arc<dyn AuditAdapter>>,
}

impl Notifier {
	pub fn new(notify: Option<Arc<dyn NotifyAdapter>>, audit: Option<Arc<dyn AuditAdapter>>) -> Self {
		Self { notify, audit }
	}

	pub fn settings_changed(&self, tn_id: TnId, signature: &str) {
		let Some(adapter) = self.notify.clone() else {
			return;
		};
		let signature: Box<str> = signature.into();
		tokio::spawn(async move {
			if let Err(err) = adapter.settings_changed(tn_id, &signature).await {
				warn!("settings_changed notification failed for tn_id={}: {}", tn_id, err);
			}
		});
	}

	pub fn routing_rebalance(&self, tn_id: TnId, region: &str) {
		let Some(adapter) = self.notify.clone() else {
			return;
		};
		let region: Box<str> = region.into();
		tokio::spawn(async move {
			if let Err(err) = adapter.routing_rebalance(tn_id, &region).await {
				warn!("routing_rebalance notification failed for tn_id={}: {}", tn_id, err);
			}
		});
	}

	pub async fn audit(
		&self,
		tn_id: TnId,
		token_id: &str,
		action: AuditAction,
		actor: Option<&str>,
		meta: Option<serde_json::Value>,
	) {
		let Some(adapter) = &self.audit else {
			return;
		};
		let event = AuditEvent {
			tn_id,
			token_id: token_id.into(),
			action,
			actor: actor.map(Into::into),
			meta,
		};
		if let Err(err) = adapter.record(&event).await {
			warn!(
				"Audit of {} on token {} failed for tn_id={}: {}",
				action.as_str(),
				token_id,
				tn_id,
				err
			);
		}
	}
}

// vim: ts=4
