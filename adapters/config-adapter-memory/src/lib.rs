//! In-process configuration store and tier resolver.
//!
//! Records are kept as raw JSON exactly as they were stored, so tests can seed a
//! tenant with arbitrary (even hostile) content and watch the engine repair it.
//! Both collaborators can be switched offline to exercise dependency failures.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use guildctl::config_adapter::{ConfigAdapter, TierResolver};
use guildctl::prelude::*;

#[derive(Debug, Default)]
pub struct ConfigAdapterMemory {
	records: RwLock<HashMap<TnId, Value>>,
	actors: RwLock<HashMap<TnId, Option<Box<str>>>>,
	writes: AtomicUsize,
	offline: AtomicBool,
}

impl ConfigAdapterMemory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Put a raw record in place without going through the engine
	pub fn seed(&self, tn_id: TnId, record: Value) {
		self.records.write().insert(tn_id, record);
	}

	/// Raw stored record, if any
	pub fn raw(&self, tn_id: TnId) -> Option<Value> {
		self.records.read().get(&tn_id).cloned()
	}

	/// Actor of the most recent store for a tenant
	pub fn last_actor(&self, tn_id: TnId) -> Option<Box<str>> {
		self.actors.read().get(&tn_id).cloned().flatten()
	}

	/// Number of successful stores since creation
	pub fn write_count(&self) -> usize {
		self.writes.load(Ordering::Relaxed)
	}

	pub fn set_offline(&self, offline: bool) {
		self.offline.store(offline, Ordering::Relaxed);
	}

	fn check_online(&self) -> ClResult<()> {
		if self.offline.load(Ordering::Relaxed) {
			Err(Error::DependencyUnavailable("config store offline".into()))
		} else {
			Ok(())
		}
	}
}

#[async_trait]
impl ConfigAdapter for ConfigAdapterMemory {
	async fn load_config(&self, tn_id: TnId) -> ClResult<Value> {
		self.check_online()?;
		Ok(self.records.read().get(&tn_id).cloned().unwrap_or(Value::Null))
	}

	async fn store_config(
		&self,
		tn_id: TnId,
		actor: Option<&str>,
		record: &Value,
	) -> ClResult<Value> {
		self.check_online()?;
		debug!("Storing config for tn_id={} actor={:?}", tn_id, actor);

		self.records.write().insert(tn_id, record.clone());
		self.actors.write().insert(tn_id, actor.map(Into::into));
		self.writes.fetch_add(1, Ordering::Relaxed);
		Ok(record.clone())
	}
}

/// Tier lookup from a fixed table. Unlisted tenants get the fallback tier.
#[derive(Debug, Default)]
pub struct TierResolverMemory {
	tiers: RwLock<HashMap<TnId, Tier>>,
	fallback: Tier,
	offline: AtomicBool,
}

impl TierResolverMemory {
	pub fn new(fallback: Tier) -> Self {
		Self { fallback, ..Self::default() }
	}

	pub fn set_tier(&self, tn_id: TnId, tier: Tier) {
		self.tiers.write().insert(tn_id, tier);
	}

	pub fn set_offline(&self, offline: bool) {
		self.offline.store(offline, Ordering::Relaxed);
	}
}

#[async_trait]
impl TierResolver for TierResolverMemory {
	async fn resolve_tier(&self, tn_id: TnId) -> ClResult<Tier> {
		if self.offline.load(Ordering::Relaxed) {
			return Err(Error::DependencyUnavailable("billing offline".into()));
		}
		Ok(self.tiers.read().get(&tn_id).copied().unwrap_or(self.fallback))
	}
}


// vim: ts=4
