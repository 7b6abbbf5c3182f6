//! Plan capability resolver: tier to capability table.
//!
//! Every tier maps to exactly one static table. There is no failure mode; tiers that
//! could not be parsed upstream already resolve to [`Tier::Free`].

use crate::order::{AnalyticsMode, AutomationLevel, PlaybackQuality, SourceAccess};
use crate::prelude::*;

/// Voice routing region used when a plan declares no explicit regions
pub const AUTO_REGION: &str = "auto";

/// Every region the product knows about
pub const REGIONS: &[&str] = &[
	"auto",
	"us-east",
	"eu-west",
	"us-west",
	"eu-central",
	"ap-southeast",
	"ap-northeast",
	"sa-east",
	"me-central",
];

/// Plan flags that gate options independently of the tier order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanFlag {
	MultiSource,
	CustomBranding,
	CustomDomain,
	ApiAccess,
	PriorityRouting,
	WhiteLabel,
}

#[derive(Debug)]
pub struct PlanCapabilities {
	pub tier: Tier,
	/// Maximum queue length, `None` when uncapped
	pub queue_limit: Option<i64>,
	pub source_access: SourceAccess,
	pub playback_quality: PlaybackQuality,
	pub analytics_mode: AnalyticsMode,
	pub automation_level: AutomationLevel,
	/// Scheduled automation windows (`HH:MM-HH:MM`)
	pub automation_windows: bool,
	/// Allowed routing regions, first entry is the fallback
	pub regions: &'static [&'static str],
	pub flags: &'static [PlanFlag],
}

impl PlanCapabilities {
	pub fn has_flag(&self, flag: PlanFlag) -> bool {
		self.flags.contains(&flag)
	}

	pub fn allows_region(&self, region: &str) -> bool {
		if self.regions.is_empty() {
			region == AUTO_REGION
		} else {
			self.regions.contains(&region)
		}
	}

	/// Region to fall back to when the selected one is not allowed
	pub fn fallback_region(&self) -> &'static str {
		self.regions.first().copied().unwrap_or(AUTO_REGION)
	}
}

static FREE: PlanCapabilities = PlanCapabilities {
	tier: Tier::Free,
	queue_limit: Some(100),
	source_access: SourceAccess::Basic,
	playback_quality: PlaybackQuality::Standard,
	analytics_mode: AnalyticsMode::Off,
	automation_level: AutomationLevel::Off,
	automation_windows: false,
	regions: &[],
	flags: &[],
};

static STARTER: PlanCapabilities = PlanCapabilities {
	tier: Tier::Starter,
	queue_limit: Some(5000),
	source_access: SourceAccess::Extended,
	playback_quality: PlaybackQuality::High,
	analytics_mode: AnalyticsMode::Basic,
	automation_level: AutomationLevel::Basic,
	automation_windows: false,
	regions: &["auto", "us-east", "eu-west"],
	flags: &[PlanFlag::CustomBranding],
};

static PRO: PlanCapabilities = PlanCapabilities {
	tier: Tier::Pro,
	queue_limit: Some(20_000),
	source_access: SourceAccess::Premium,
	playback_quality: PlaybackQuality::High,
	analytics_mode: AnalyticsMode::Advanced,
	automation_level: AutomationLevel::Smart,
	automation_windows: false,
	regions: &["auto", "us-east", "eu-west", "us-west", "eu-central"],
	flags: &[
		PlanFlag::CustomBranding,
		PlanFlag::MultiSource,
		PlanFlag::CustomDomain,
		PlanFlag::ApiAccess,
	],
};

static GROWTH: PlanCapabilities = PlanCapabilities {
	tier: Tier::Growth,
	queue_limit: Some(50_000),
	source_access: SourceAccess::Premium,
	playback_quality: PlaybackQuality::Lossless,
	analytics_mode: AnalyticsMode::Advanced,
	automation_level: AutomationLevel::Smart,
	automation_windows: true,
	regions: &["auto", "us-east", "eu-west", "us-west", "eu-central", "ap-southeast"],
	flags: &[
		PlanFlag::CustomBranding,
		PlanFlag::MultiSource,
		PlanFlag::CustomDomain,
		PlanFlag::ApiAccess,
		PlanFlag::PriorityRouting,
	],
};

static SCALE: PlanCapabilities = PlanCapabilities {
	tier: Tier::Scale,
	queue_limit: Some(100_000),
	source_access: SourceAccess::All,
	playback_quality: PlaybackQuality::Lossless,
	analytics_mode: AnalyticsMode::Realtime,
	automation_level: AutomationLevel::Full,
	automation_windows: true,
	regions: &[
		"auto",
		"us-east",
		"eu-west",
		"us-west",
		"eu-central",
		"ap-southeast",
		"ap-northeast",
		"sa-east",
	],
	flags: &[
		PlanFlag::CustomBranding,
		PlanFlag::MultiSource,
		PlanFlag::CustomDomain,
		PlanFlag::ApiAccess,
		PlanFlag::PriorityRouting,
		PlanFlag::WhiteLabel,
	],
};

static ENTERPRISE: PlanCapabilities = PlanCapabilities {
	tier: Tier::Enterprise,
	queue_limit: None,
	source_access: SourceAccess::All,
	playback_quality: PlaybackQuality::Studio,
	analytics_mode: AnalyticsMode::Realtime,
	automation_level: AutomationLevel::Full,
	automation_windows: true,
	regions: REGIONS,
	flags: &[
		PlanFlag::CustomBranding,
		PlanFlag::MultiSource,
		PlanFlag::CustomDomain,
		PlanFlag::ApiAccess,
		PlanFlag::PriorityRouting,
		PlanFlag::WhiteLabel,
	],
};

/// Capability table for a tier
pub fn capabilities(tier: Tier) -> &'static PlanCapabilities {
	match tier {
		Tier::Free => &FREE,
		Tier::Starter => &STARTER,
		Tier::Pro => &PRO,
		Tier::Growth => &GROWTH,
		Tier::Scale => &SCALE,
		Tier::Enterprise => &ENTERPRISE,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_every_tier_has_matching_table() {
		for tier in Tier::ALL {
			assert_eq!(capabilities(tier).tier, tier);
		}
	}

	#[test]
	fn test_ceilings_are_monotone() {
		for pair in Tier::ALL.windows(2) {
			let (lo, hi) = (capabilities(pair[0]), capabilities(pair[1]));
			assert!(lo.source_access <= hi.source_access);
			assert!(lo.playback_quality <= hi.playback_quality);
			assert!(lo.analytics_mode <= hi.analytics_mode);
			assert!(lo.automation_level <= hi.automation_level);
			match (lo.queue_limit, hi.queue_limit) {
				(Some(a), Some(b)) => assert!(a <= b),
				(Some(_), None) | (None, None) => {}
				(None, Some(_)) => panic!("uncapped tier below a capped one"),
			}
		}
	}

	#[test]
	fn test_unknown_tier_resolves_to_free_table() {
		let caps = capabilities(Tier::parse_lossy("diamond"));
		assert_eq!(caps.tier, Tier::Free);
		assert_eq!(caps.queue_limit, Some(100));
	}

	#[test]
	fn test_regions() {
		let free = capabilities(Tier::Free);
		assert!(free.allows_region("auto"));
		assert!(!free.allows_region("us-east"));
		assert_eq!(free.fallback_region(), AUTO_REGION);

		let starter = capabilities(Tier::Starter);
		assert!(starter.allows_region("eu-west"));
		assert!(!starter.allows_region("ap-southeast"));
		assert_eq!(starter.fallback_region(), "auto");
	}

	#[test]
	fn test_flags() {
		assert!(!capabilities(Tier::Starter).has_flag(PlanFlag::MultiSource));
		assert!(capabilities(Tier::Pro).has_flag(PlanFlag::MultiSource));
		assert!(capabilities(Tier::Enterprise).has_flag(PlanFlag::WhiteLabel));
	}
}

// vim: ts=4
