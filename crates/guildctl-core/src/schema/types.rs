//! Option descriptor types
//!
//! Every configurable key is described once, at startup, by an [`OptionDescriptor`].
//! The descriptor's [`OptionKind`] carries the constraints for its value type so the
//! sanitizer can dispatch with an exhaustive match.

use std::collections::HashMap;
use std::fmt::Debug;

use crate::plan::PlanFlag;
use crate::prelude::*;
use crate::sanitize::fields::normalize_color;

/// One choice of a select option, reachable from `min_tier` upwards
#[derive(Debug, Clone, PartialEq)]
pub struct SelectChoice {
	pub value: String,
	pub min_tier: Tier,
}

impl SelectChoice {
	pub fn new(value: impl Into<String>, min_tier: Tier) -> Self {
		Self { value: value.into(), min_tier }
	}
}

/// Plan-level numeric caps a range option is additionally bound by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanLimit {
	QueueSize,
}

/// Type of an option together with its type-specific constraints
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind {
	Boolean {
		default: bool,
		/// Only true when the plan grants this flag as well
		plan_flag: Option<PlanFlag>,
	},
	Select {
		/// In ascending order; "highest reachable" means last reachable
		choices: Vec<SelectChoice>,
		default: String,
	},
	Range {
		min: i64,
		max: i64,
		default: i64,
		plan_limit: Option<PlanLimit>,
	},
	Multiselect {
		vocabulary: Vec<String>,
		default: Vec<String>,
	},
	Text {
		max_len: usize,
		default: Option<String>,
		/// Used when no default is declared, must not be blank
		placeholder: String,
	},
	Color {
		default: String,
	},
}

impl OptionKind {
	/// Get the type name for log messages
	pub fn type_name(&self) -> &'static str {
		match self {
			OptionKind::Boolean { .. } => "boolean",
			OptionKind::Select { .. } => "select",
			OptionKind::Range { .. } => "range",
			OptionKind::Multiselect { .. } => "multiselect",
			OptionKind::Text { .. } => "text",
			OptionKind::Color { .. } => "color",
		}
	}
}

/// Option descriptor - defines metadata and constraints for each key
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
	/// camelCase record key (e.g., "queueLimit")
	pub key: String,

	/// Human-readable description
	pub description: String,

	/// Tenants below this tier always get the default
	pub min_tier: Tier,

	pub kind: OptionKind,
}

impl OptionDescriptor {
	/// Create a builder for constructing an OptionDescriptor
	pub fn builder(key: impl Into<String>) -> OptionDescriptorBuilder {
		OptionDescriptorBuilder::new(key)
	}
}

/// Builder for OptionDescriptor with fluent API
pub struct OptionDescriptorBuilder {
	key: String,
	description: Option<String>,
	min_tier: Tier,
	kind: Option<OptionKind>,
}

impl OptionDescriptorBuilder {
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into(), description: None, min_tier: Tier::Free, kind: None }
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the minimum tier (defaults to Free)
	pub fn min_tier(mut self, tier: Tier) -> Self {
		self.min_tier = tier;
		self
	}

	/// Set the option kind (required)
	pub fn kind(mut self, kind: OptionKind) -> Self {
		self.kind = Some(kind);
		self
	}

	/// Build the OptionDescriptor, rejecting constraints the sanitizer could not honor
	pub fn build(self) -> ClResult<OptionDescriptor> {
		let key = self.key;
		let err = |msg: &str| Error::ConfigError(format!("Option '{}': {}", key, msg));

		if key.is_empty() {
			return Err(Error::ConfigError("Option key must not be empty".into()));
		}
		let description = self.description.ok_or_else(|| err("description is required"))?;
		let kind = self.kind.ok_or_else(|| err("kind is required"))?;

		match &kind {
			OptionKind::Boolean { .. } => {}
			OptionKind::Select { choices, default } => {
				if choices.is_empty() {
					return Err(err("select needs at least one choice"));
				}
				if !choices.iter().any(|c| &c.value == default) {
					return Err(err("select default is not a declared choice"));
				}
				if !choices.iter().any(|c| c.min_tier <= self.min_tier) {
					return Err(err("no choice is reachable at the option's minimum tier"));
				}
			}
			OptionKind::Range { min, max, default, .. } => {
				if min > max {
					return Err(err("range min exceeds max"));
				}
				if default < min || default > max {
					return Err(err("range default is out of bounds"));
				}
			}
			OptionKind::Multiselect { vocabulary, default } => {
				if let Some(bad) = default.iter().find(|d| !vocabulary.contains(d)) {
					return Err(err(&format!("multiselect default '{}' not in vocabulary", bad)));
				}
			}
			OptionKind::Text { max_len, default, placeholder } => {
				let fits = |s: &str| !s.trim().is_empty() && s.trim() == s && s.chars().count() <= *max_len;
				if !fits(placeholder) {
					return Err(err("text placeholder must be non-blank, trimmed and within max_len"));
				}
				if let Some(default) = default {
					if !fits(default) {
						return Err(err("text default must be non-blank, trimmed and within max_len"));
					}
				}
			}
			OptionKind::Color { default } => {
				if normalize_color(default).as_deref() != Some(default.as_str()) {
					return Err(err("color default must be an uppercase #RRGGBB string"));
				}
			}
		}

		Ok(OptionDescriptor { key, description, min_tier: self.min_tier, kind })
	}
}

/// Mutable registry used during initialization
pub struct OptionRegistry {
	definitions: HashMap<String, OptionDescriptor>,
}

impl OptionRegistry {
	pub fn new() -> Self {
		Self { definitions: HashMap::new() }
	}

	/// Register a new option descriptor
	pub fn register(&mut self, def: OptionDescriptor) -> ClResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!("Option '{}' is already registered", def.key)));
		}

		debug!("Registering option: {} ({})", def.key, def.kind.type_name());
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenOptionRegistry {
		info!("Freezing option registry with {} definitions", self.definitions.len());
		let mut definitions: Vec<OptionDescriptor> = self.definitions.into_values().collect();
		definitions.sort_by(|a, b| a.key.cmp(&b.key));
		FrozenOptionRegistry { definitions }
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl Default for OptionRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry shared by every sanitize call. Sorted by key.
#[derive(Debug)]
pub struct FrozenOptionRegistry {
	definitions: Vec<OptionDescriptor>,
}

impl FrozenOptionRegistry {
	pub fn get(&self, key: &str) -> Option<&OptionDescriptor> {
		self.definitions
			.binary_search_by(|def| def.key.as_str().cmp(key))
			.ok()
			.and_then(|idx| self.definitions.get(idx))
	}

	pub fn list(&self) -> impl Iterator<Item = &OptionDescriptor> {
		self.definitions.iter()
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}


// vim: ts=4
