//! Common types used throughout guildctl.

use serde::{Deserialize, Serialize};

// TnId //
//******//
/// Tenant (guild) identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TnId(pub u64);

impl std::fmt::Display for TnId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for TnId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		// Guild snowflakes exceed 2^53, keep them exact for JS callers
		serializer.serialize_str(&self.0.to_string())
	}
}

impl<'de> Deserialize<'de> for TnId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Num(u64),
			Str(String),
		}

		match Raw::deserialize(deserializer)? {
			Raw::Num(n) => Ok(TnId(n)),
			Raw::Str(s) => s.parse().map(TnId).map_err(serde::de::Error::custom),
		}
	}
}

// Tier //
//******//
/// Subscription tier. Declaration order is the tier order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
	#[default]
	Free,
	Starter,
	Pro,
	Growth,
	Scale,
	Enterprise,
}

impl Tier {
	pub const ALL: [Tier; 6] =
		[Tier::Free, Tier::Starter, Tier::Pro, Tier::Growth, Tier::Scale, Tier::Enterprise];

	pub fn as_str(self) -> &'static str {
		match self {
			Tier::Free => "free",
			Tier::Starter => "starter",
			Tier::Pro => "pro",
			Tier::Growth => "growth",
			Tier::Scale => "scale",
			Tier::Enterprise => "enterprise",
		}
	}

	/// Parse a tier name. Unknown or corrupt values resolve to the lowest tier.
	pub fn parse_lossy(s: &str) -> Tier {
		let s = s.trim();
		Tier::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s)).unwrap_or_default()
	}

	/// True if this tier unlocks something that requires `min`
	pub fn at_least(self, min: Tier) -> bool {
		self >= min
	}
}

impl std::fmt::Display for Tier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for Tier {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Tier {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		// Anything that is not a known tier name is the lowest tier
		let raw = serde_json::Value::deserialize(deserializer)?;
		Ok(raw.as_str().map(Tier::parse_lossy).unwrap_or_default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tier_order() {
		assert!(Tier::Free < Tier::Starter);
		assert!(Tier::Scale < Tier::Enterprise);
		assert!(Tier::Growth.at_least(Tier::Pro));
		assert!(!Tier::Starter.at_least(Tier::Pro));
	}

	#[test]
	fn test_parse_lossy() {
		assert_eq!(Tier::parse_lossy("pro"), Tier::Pro);
		assert_eq!(Tier::parse_lossy(" Enterprise "), Tier::Enterprise);
		assert_eq!(Tier::parse_lossy("platinum"), Tier::Free);
		assert_eq!(Tier::parse_lossy(""), Tier::Free);
	}

	#[test]
	fn test_tier_deserialize_fail_safe() {
		let tier: Tier = serde_json::from_str(r#""growth""#).unwrap();
		assert_eq!(tier, Tier::Growth);
		let tier: Tier = serde_json::from_str("42").unwrap();
		assert_eq!(tier, Tier::Free);
		let tier: Tier = serde_json::from_str("null").unwrap();
		assert_eq!(tier, Tier::Free);
	}

	#[test]
	fn test_tn_id_serde() {
		let id = TnId(1_234_567_890_123_456_789);
		let json = serde_json::to_string(&id).unwrap();
		assert_eq!(json, r#""1234567890123456789""#);
		let back: TnId = serde_json::from_str(&json).unwrap();
		assert_eq!(back, id);
		let from_num: TnId = serde_json::from_str("17").unwrap();
		assert_eq!(from_num, TnId(17));
	}
}

// vim: ts=4
