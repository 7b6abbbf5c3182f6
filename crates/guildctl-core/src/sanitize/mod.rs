//! Settings sanitizer.
//!
//! [`sanitize`] never rejects. Whatever the candidate holds, the result has every
//! registered option with a value of the right type, within the schema's bounds and
//! the plan's ceilings. Feeding the result back in returns it unchanged.
//!
//! Order of work:
//! 1. per option, dispatched on its kind ([`fields`])
//! 2. cross-field normalizations ([`cross`])
//! 3. fields shaped as records: API tokens, custom domain (plans with the
//!    custom domain flag only), branding

pub mod branding;
pub mod cross;
pub mod fields;

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::{derive_domain, DomainState};
use crate::plan::{capabilities, PlanCapabilities, PlanFlag};
use crate::prelude::*;
use crate::record::{ConfigRecord, OptionValue};
use crate::schema::{keys, FrozenOptionRegistry, OptionDescriptor, OptionKind, PlanLimit};
use crate::tokens::sanitize_tokens;

use branding::Branding;

fn plan_cap(limit: PlanLimit, caps: &PlanCapabilities) -> Option<i64> {
	match limit {
		PlanLimit::QueueSize => caps.queue_limit,
	}
}

fn default_value(kind: &OptionKind) -> OptionValue {
	match kind {
		OptionKind::Boolean { default, .. } => OptionValue::Bool(*default),
		OptionKind::Select { default, .. } => OptionValue::String(default.clone()),
		OptionKind::Range { default, .. } => OptionValue::Int(*default),
		OptionKind::Multiselect { default, .. } => OptionValue::List(default.clone()),
		OptionKind::Text { default, placeholder, .. } => {
			OptionValue::String(default.as_ref().unwrap_or(placeholder).clone())
		}
		OptionKind::Color { default } => OptionValue::String(default.clone()),
	}
}

fn sanitize_option(
	def: &OptionDescriptor,
	candidate: Option<&Value>,
	tier: Tier,
	caps: &PlanCapabilities,
) -> OptionValue {
	if !tier.at_least(def.min_tier) {
		return default_value(&def.kind);
	}

	match &def.kind {
		OptionKind::Boolean { default, plan_flag } => {
			let value = fields::sanitize_boolean(candidate, *default);
			OptionValue::Bool(value && plan_flag.is_none_or(|flag| caps.has_flag(flag)))
		}
		OptionKind::Select { choices, default } => {
			OptionValue::String(fields::sanitize_select(candidate, choices, default, tier))
		}
		OptionKind::Range { min, max, default, plan_limit } => {
			let value = fields::sanitize_range(candidate, *min, *max, *default);
			match plan_limit.and_then(|limit| plan_cap(limit, caps)) {
				Some(cap) => OptionValue::Int(value.min(cap)),
				None => OptionValue::Int(value),
			}
		}
		OptionKind::Multiselect { vocabulary, default } => {
			OptionValue::List(fields::sanitize_multiselect(candidate, vocabulary, default))
		}
		OptionKind::Text { max_len, default, placeholder } => OptionValue::String(
			fields::sanitize_text(candidate, *max_len, default.as_deref(), placeholder),
		),
		OptionKind::Color { default } => {
			OptionValue::String(fields::sanitize_color(candidate, default))
		}
	}
}

/// Reconcile an arbitrary candidate with the schema and the tier's plan
pub fn sanitize(candidate: &Value, tier: Tier, registry: &FrozenOptionRegistry) -> ConfigRecord {
	let empty = Map::new();
	let fields = candidate.as_object().unwrap_or(&empty);
	let caps = capabilities(tier);

	let options: BTreeMap<String, OptionValue> = registry
		.list()
		.map(|def| (def.key.clone(), sanitize_option(def, fields.get(&def.key), tier, caps)))
		.collect();

	let mut record = ConfigRecord {
		options,
		automation_window: cross::automation_window(fields.get(keys::AUTOMATION_WINDOW), caps),
		domain: if caps.has_flag(PlanFlag::CustomDomain) {
			derive_domain(fields)
		} else {
			DomainState::unconfigured()
		},
		branding: Branding::from_fields(fields),
		api_tokens: sanitize_tokens(fields.get(keys::API_TOKENS)),
	};

	cross::clamp_queue_limit(&mut record, caps);
	cross::clamp_ladders(&mut record, caps);
	cross::restrict_region(&mut record, caps);

	record
}


// vim: ts=4
