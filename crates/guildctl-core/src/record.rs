//! Sanitized configuration record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::DomainState;
use crate::prelude::*;
use crate::sanitize::branding::Branding;
use crate::tokens::ApiTokenRecord;

/// Option value types. The descriptor decides which variant a key carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
	Bool(bool),
	Int(i64),
	String(String),
	List(Vec<String>),
}

impl OptionValue {
	pub fn type_name(&self) -> &'static str {
		match self {
			OptionValue::Bool(_) => "bool",
			OptionValue::Int(_) => "int",
			OptionValue::String(_) => "string",
			OptionValue::List(_) => "list",
		}
	}
}

/// Fully populated, constraint-satisfying configuration of one tenant.
///
/// Serializes to one flat JSON object: option keys, `automationWindow`, the
/// `customDomain*` fields, the branding fields and `apiTokens`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigRecord {
	#[serde(flatten)]
	pub options: BTreeMap<String, OptionValue>,

	#[serde(rename = "automationWindow")]
	pub automation_window: String,

	#[serde(flatten)]
	pub domain: DomainState,

	#[serde(flatten)]
	pub branding: Branding,

	#[serde(rename = "apiTokens")]
	pub api_tokens: Vec<ApiTokenRecord>,
}

impl ConfigRecord {
	pub fn get(&self, key: &str) -> Option<&OptionValue> {
		self.options.get(key)
	}

	pub fn get_bool(&self, key: &str) -> Option<bool> {
		match self.options.get(key) {
			Some(OptionValue::Bool(b)) => Some(*b),
			_ => None,
		}
	}

	pub fn get_int(&self, key: &str) -> Option<i64> {
		match self.options.get(key) {
			Some(OptionValue::Int(n)) => Some(*n),
			_ => None,
		}
	}

	pub fn get_str(&self, key: &str) -> Option<&str> {
		match self.options.get(key) {
			Some(OptionValue::String(s)) => Some(s),
			_ => None,
		}
	}

	pub fn get_list(&self, key: &str) -> Option<&[String]> {
		match self.options.get(key) {
			Some(OptionValue::List(l)) => Some(l),
			_ => None,
		}
	}

	pub fn set(&mut self, key: &str, value: OptionValue) {
		self.options.insert(key.to_string(), value);
	}

	/// JSON form, as stored and as fed back into the sanitizer
	pub fn to_value(&self) -> ClResult<serde_json::Value> {
		Ok(serde_json::to_value(self)?)
	}
}

// vim: ts=4
