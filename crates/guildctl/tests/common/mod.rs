//! Shared harness for the service integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use guildctl::types::notify_adapter::{AuditAdapter, AuditEvent, NotifyAdapter};
use guildctl::{AppBuilder, AppBuilderOpts};
use guildctl::prelude::*;
use guildctl_config_adapter_memory::{ConfigAdapterMemory, TierResolverMemory};

pub const TN: TnId = TnId(1_234_567_890_123_456_789);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
	SettingsChanged(Box<str>),
	RoutingRebalance(Box<str>),
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
	pub sent: Mutex<Vec<Notification>>,
	pub fail: bool,
}

#[async_trait]
impl NotifyAdapter for RecordingNotifier {
	async fn settings_changed(&self, _tn_id: TnId, signature: &str) -> ClResult<()> {
		self.sent.lock().push(Notification::SettingsChanged(signature.into()));
		if self.fail {
			return Err(Error::DependencyUnavailable("bot gateway down".into()));
		}
		Ok(())
	}

	async fn routing_rebalance(&self, _tn_id: TnId, region: &str) -> ClResult<()> {
		self.sent.lock().push(Notification::RoutingRebalance(region.into()));
		if self.fail {
			return Err(Error::DependencyUnavailable("router down".into()));
		}
		Ok(())
	}
}

impl RecordingNotifier {
	pub fn rebalances(&self) -> Vec<Box<str>> {
		self.sent
			.lock()
			.iter()
			.filter_map(|n| match n {
				Notification::RoutingRebalance(region) => Some(region.clone()),
				Notification::SettingsChanged(_) => None,
			})
			.collect()
	}

	pub fn signatures(&self) -> Vec<Box<str>> {
		self.sent
			.lock()
			.iter()
			.filter_map(|n| match n {
				Notification::SettingsChanged(signature) => Some(signature.clone()),
				Notification::RoutingRebalance(_) => None,
			})
			.collect()
	}
}

#[derive(Debug, Default)]
pub struct RecordingAudit {
	pub events: Mutex<Vec<AuditEvent>>,
	pub fail: bool,
}

#[async_trait]
impl AuditAdapter for RecordingAudit {
	async fn record(&self, event: &AuditEvent) -> ClResult<()> {
		self.events.lock().push(event.clone());
		if self.fail {
			return Err(Error::DependencyUnavailable("audit log unreachable".into()));
		}
		Ok(())
	}
}

impl RecordingAudit {
	pub fn actions(&self) -> Vec<&'static str> {
		self.events.lock().iter().map(|e| e.action.as_str()).collect()
	}
}

pub struct Harness {
	pub app: App,
	pub store: Arc<ConfigAdapterMemory>,
	pub tiers: Arc<TierResolverMemory>,
	pub notifier: Arc<RecordingNotifier>,
	pub audit: Arc<RecordingAudit>,
}

pub struct HarnessOpts {
	pub tier: Tier,
	pub notify_fails: bool,
	pub audit_fails: bool,
	pub sweep_on_read: bool,
	pub token_ttl_days: i64,
}

impl Default for HarnessOpts {
	fn default() -> Self {
		Self {
			tier: Tier::Free,
			notify_fails: false,
			audit_fails: false,
			sweep_on_read: true,
			token_ttl_days: 0,
		}
	}
}

pub fn harness(tier: Tier) -> Harness {
	harness_with(HarnessOpts { tier, ..HarnessOpts::default() })
}

pub fn harness_with(opts: HarnessOpts) -> Harness {
	let store = Arc::new(ConfigAdapterMemory::new());
	let tiers = Arc::new(TierResolverMemory::new(opts.tier));
	let notifier = Arc::new(RecordingNotifier { fail: opts.notify_fails, ..Default::default() });
	let audit = Arc::new(RecordingAudit { fail: opts.audit_fails, ..Default::default() });

	let mut builder = AppBuilder::new();
	builder
		.opts(AppBuilderOpts {
			sweep_on_read: opts.sweep_on_read,
			default_token_ttl_days: opts.token_ttl_days,
			..AppBuilderOpts::default()
		})
		.config_adapter(store.clone())
		.tier_resolver(tiers.clone())
		.notify_adapter(notifier.clone())
		.audit_adapter(audit.clone());
	let app = builder.build().unwrap();

	Harness { app, store, tiers, notifier, audit }
}

/// Let spawned notification tasks run
pub async fn settle() {
	for _ in 0..16 {
		tokio::task::yield_now().await;
	}
}

// vim: ts=4
