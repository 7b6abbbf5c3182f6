//! App builder - wires the engine to its collaborators

use std::sync::Arc;

use guildctl_core::schema::{default_registry, FrozenOptionRegistry};
use guildctl_core::sanitize::fields::coerce_bool;
use guildctl_types::config_adapter::{ConfigAdapter, TierResolver};
use guildctl_types::notify_adapter::{AuditAdapter, NotifyAdapter};

use crate::notify::Notifier;
use crate::prelude::*;
use crate::service::ConfigService;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct AppBuilderOpts {
	/// Disable expired tokens while loading a record
	pub sweep_on_read: bool,
	/// Fire "settings changed" and "routing rebalance" hooks
	pub notify: bool,
	/// Token lifetime used when a record carries no TTL option
	pub default_token_ttl_days: i64,
}

impl Default for AppBuilderOpts {
	fn default() -> Self {
		Self { sweep_on_read: true, notify: true, default_token_ttl_days: 0 }
	}
}

impl AppBuilderOpts {
	/// Defaults, overridden by `GUILDCTL_SWEEP_ON_READ`, `GUILDCTL_NOTIFY` and
	/// `GUILDCTL_TOKEN_TTL_DAYS` where set
	pub fn from_env() -> Self {
		let flag = |name: &str| {
			std::env::var(name)
				.ok()
				.and_then(|v| coerce_bool(&serde_json::Value::String(v)))
		};

		let mut opts = Self::default();
		if let Some(sweep) = flag("GUILDCTL_SWEEP_ON_READ") {
			opts.sweep_on_read = sweep;
		}
		if let Some(notify) = flag("GUILDCTL_NOTIFY") {
			opts.notify = notify;
		}
		if let Some(ttl) =
			std::env::var("GUILDCTL_TOKEN_TTL_DAYS").ok().and_then(|v| v.trim().parse::<i64>().ok())
		{
			opts.default_token_ttl_days = ttl.clamp(0, 365);
		}
		opts
	}
}

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub registry: Arc<FrozenOptionRegistry>,
	pub config: Arc<ConfigService>,
}

pub type App = Arc<AppState>;

#[derive(Default)]
pub struct Adapters {
	pub config_adapter: Option<Arc<dyn ConfigAdapter>>,
	pub tier_resolver: Option<Arc<dyn TierResolver>>,
	pub notify_adapter: Option<Arc<dyn NotifyAdapter>>,
	pub audit_adapter: Option<Arc<dyn AuditAdapter>>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	registry: Option<FrozenOptionRegistry>,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		// A subscriber may already be installed by the embedding program
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder { opts: AppBuilderOpts::from_env(), registry: None, adapters: Adapters::default() }
	}

	// Opts
	pub fn opts(&mut self, opts: AppBuilderOpts) -> &mut Self {
		self.opts = opts;
		self
	}
	pub fn sweep_on_read(&mut self, sweep: bool) -> &mut Self {
		self.opts.sweep_on_read = sweep;
		self
	}
	pub fn notify(&mut self, notify: bool) -> &mut Self {
		self.opts.notify = notify;
		self
	}
	pub fn default_token_ttl_days(&mut self, days: i64) -> &mut Self {
		self.opts.default_token_ttl_days = days.clamp(0, 365);
		self
	}

	/// Replace the built-in option schema
	pub fn registry(&mut self, registry: FrozenOptionRegistry) -> &mut Self {
		self.registry = Some(registry);
		self
	}

	// Adapters
	pub fn config_adapter(&mut self, config_adapter: Arc<dyn ConfigAdapter>) -> &mut Self {
		self.adapters.config_adapter = Some(config_adapter);
		self
	}
	pub fn tier_resolver(&mut self, tier_resolver: Arc<dyn TierResolver>) -> &mut Self {
		self.adapters.tier_resolver = Some(tier_resolver);
		self
	}
	pub fn notify_adapter(&mut self, notify_adapter: Arc<dyn NotifyAdapter>) -> &mut Self {
		self.adapters.notify_adapter = Some(notify_adapter);
		self
	}
	pub fn audit_adapter(&mut self, audit_adapter: Arc<dyn AuditAdapter>) -> &mut Self {
		self.adapters.audit_adapter = Some(audit_adapter);
		self
	}

	pub fn build(self) -> ClResult<App> {
		info!("guildctl V{}", VERSION);

		let Some(config_adapter) = self.adapters.config_adapter else {
			error!("FATAL: No config adapter configured");
			return Err(Error::ConfigError("No config adapter configured".into()));
		};
		let Some(tier_resolver) = self.adapters.tier_resolver else {
			error!("FATAL: No tier resolver configured");
			return Err(Error::ConfigError("No tier resolver configured".into()));
		};

		let registry = match self.registry {
			Some(registry) => registry,
			None => default_registry()?,
		};
		let registry = Arc::new(registry);
		info!("Option registry ready with {} options", registry.len());

		let notify_adapter = if self.opts.notify { self.adapters.notify_adapter } else { None };
		let notifier = Notifier::new(notify_adapter, self.adapters.audit_adapter);

		let config = Arc::new(ConfigService::new(
			registry.clone(),
			config_adapter,
			tier_resolver,
			notifier,
			self.opts.clone(),
		));

		Ok(Arc::new(AppState { opts: self.opts, registry, config }))
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
