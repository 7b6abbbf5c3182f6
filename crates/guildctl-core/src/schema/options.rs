//! Option registration, grouped by product area

use crate::order::{AnalyticsMode, AutomationLevel, Ladder, PlaybackQuality, SourceAccess};
use crate::plan::{PlanFlag, REGIONS};
use crate::prelude::*;

use super::types::{
	FrozenOptionRegistry, OptionDescriptor, OptionKind, OptionRegistry, PlanLimit, SelectChoice,
};

/// Record keys the engine refers to by name
pub mod keys {
	pub const QUEUE_LIMIT: &str = "queueLimit";
	pub const SOURCE_ACCESS: &str = "sourceAccess";
	pub const PLAYBACK_QUALITY: &str = "playbackQuality";
	pub const ANALYTICS_MODE: &str = "analyticsMode";
	pub const AUTOMATION_LEVEL: &str = "automationLevel";
	pub const ROUTING_REGION: &str = "routingRegion";
	pub const MULTI_SOURCE_STREAMING: &str = "multiSourceStreaming";
	pub const EMBED_ACCENT_COLOR: &str = "embedAccentColor";
	pub const API_TOKEN_TTL_DAYS: &str = "apiTokenTtlDays";
	pub const ALLOWED_SOURCES: &str = "allowedSources";

	// Fields outside the option schema
	pub const AUTOMATION_WINDOW: &str = "automationWindow";
	pub const API_TOKENS: &str = "apiTokens";
}

fn ladder_choices<L: Ladder>(min_tiers: &[Tier]) -> Vec<SelectChoice> {
	L::STEPS
		.iter()
		.zip(min_tiers)
		.map(|(step, tier)| SelectChoice::new(step.as_str(), *tier))
		.collect()
}

fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|s| (*s).to_string()).collect()
}

fn toggle(key: &str, description: &str, default: bool) -> OptionDescriptor {
	OptionDescriptor {
		key: key.into(),
		description: description.into(),
		min_tier: Tier::Free,
		kind: OptionKind::Boolean { default, plan_flag: None },
	}
}

fn register_queue(registry: &mut OptionRegistry) -> ClResult<()> {
	registry.register(
		OptionDescriptor::builder(keys::QUEUE_LIMIT)
			.description("Maximum number of tracks in the queue")
			.kind(OptionKind::Range {
				min: 1,
				max: 100_000,
				default: 500,
				plan_limit: Some(PlanLimit::QueueSize),
			})
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder("maxTrackMinutes")
			.description("Longest track accepted into the queue, in minutes")
			.kind(OptionKind::Range { min: 1, max: 720, default: 30, plan_limit: None })
			.build()?,
	)?;

	registry.register(toggle("allowDuplicates", "Allow the same track twice in the queue", false))?;

	registry.register(
		OptionDescriptor::builder("autoplay")
			.description("Keep playing related tracks when the queue runs out")
			.min_tier(Tier::Starter)
			.kind(OptionKind::Boolean { default: false, plan_flag: None })
			.build()?,
	)?;

	registry.register(toggle("voteSkipEnabled", "Let listeners vote to skip", true))?;

	registry.register(
		OptionDescriptor::builder("voteSkipThreshold")
			.description("Percent of listeners needed to skip")
			.kind(OptionKind::Range { min: 10, max: 100, default: 50, plan_limit: None })
			.build()?,
	)?;

	Ok(())
}

fn register_sources(registry: &mut OptionRegistry) -> ClResult<()> {
	registry.register(
		OptionDescriptor::builder(keys::SOURCE_ACCESS)
			.description("Which catalog of audio sources may be queued")
			.kind(OptionKind::Select {
				choices: ladder_choices::<SourceAccess>(&[
					Tier::Free,
					Tier::Starter,
					Tier::Pro,
					Tier::Scale,
				]),
				default: SourceAccess::Basic.as_str().into(),
			})
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder(keys::ALLOWED_SOURCES)
			.description("Source platforms enabled for this guild")
			.kind(OptionKind::Multiselect {
				vocabulary: strings(&[
					"youtube",
					"soundcloud",
					"spotify",
					"bandcamp",
					"twitch",
					"vimeo",
					"http",
				]),
				default: strings(&["youtube", "soundcloud"]),
			})
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder(keys::MULTI_SOURCE_STREAMING)
			.description("Mix tracks from several sources into one stream")
			.min_tier(Tier::Pro)
			.kind(OptionKind::Boolean { default: false, plan_flag: Some(PlanFlag::MultiSource) })
			.build()?,
	)?;

	Ok(())
}

fn register_playback(registry: &mut OptionRegistry) -> ClResult<()> {
	registry.register(
		OptionDescriptor::builder(keys::PLAYBACK_QUALITY)
			.description("Audio bitrate profile")
			.kind(OptionKind::Select {
				choices: ladder_choices::<PlaybackQuality>(&[
					Tier::Free,
					Tier::Starter,
					Tier::Growth,
					Tier::Enterprise,
				]),
				default: PlaybackQuality::High.as_str().into(),
			})
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder("defaultVolume")
			.description("Volume applied when the bot joins, in percent")
			.kind(OptionKind::Range { min: 0, max: 200, default: 80, plan_limit: None })
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder("crossfadeSeconds")
			.description("Crossfade between tracks")
			.min_tier(Tier::Starter)
			.kind(OptionKind::Range { min: 0, max: 12, default: 0, plan_limit: None })
			.build()?,
	)?;

	registry.register(toggle("normalizeVolume", "Normalize loudness across tracks", true))?;

	registry.register(
		OptionDescriptor::builder("audioFilters")
			.description("Filters listeners may toggle")
			.min_tier(Tier::Starter)
			.kind(OptionKind::Multiselect {
				vocabulary: strings(&[
					"bassboost",
					"nightcore",
					"vaporwave",
					"karaoke",
					"8d",
					"tremolo",
				]),
				default: Vec::new(),
			})
			.build()?,
	)?;

	Ok(())
}

fn register_automation(registry: &mut OptionRegistry) -> ClResult<()> {
	registry.register(
		OptionDescriptor::builder(keys::AUTOMATION_LEVEL)
			.description("How much queue curation runs unattended")
			.kind(OptionKind::Select {
				choices: ladder_choices::<AutomationLevel>(&[
					Tier::Free,
					Tier::Starter,
					Tier::Pro,
					Tier::Scale,
				]),
				default: AutomationLevel::Off.as_str().into(),
			})
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder(keys::ANALYTICS_MODE)
			.description("Listening analytics collection")
			.kind(OptionKind::Select {
				choices: ladder_choices::<AnalyticsMode>(&[
					Tier::Free,
					Tier::Starter,
					Tier::Pro,
					Tier::Scale,
				]),
				default: AnalyticsMode::Off.as_str().into(),
			})
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder("analyticsRetentionDays")
			.description("Days of listening history kept")
			.min_tier(Tier::Pro)
			.kind(OptionKind::Range { min: 1, max: 365, default: 30, plan_limit: None })
			.build()?,
	)?;

	Ok(())
}

fn register_routing(registry: &mut OptionRegistry) -> ClResult<()> {
	// Every region is selectable here; the plan's region set is applied afterwards
	registry.register(
		OptionDescriptor::builder(keys::ROUTING_REGION)
			.description("Voice server region")
			.kind(OptionKind::Select {
				choices: REGIONS.iter().map(|r| SelectChoice::new(*r, Tier::Free)).collect(),
				default: "auto".into(),
			})
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder("priorityRouting")
			.description("Prefer dedicated voice nodes")
			.min_tier(Tier::Growth)
			.kind(OptionKind::Boolean {
				default: false,
				plan_flag: Some(PlanFlag::PriorityRouting),
			})
			.build()?,
	)?;

	Ok(())
}

fn register_moderation(registry: &mut OptionRegistry) -> ClResult<()> {
	registry.register(toggle("djRoleOnly", "Only the DJ role may control playback", false))?;
	registry.register(toggle("blockExplicit", "Refuse tracks flagged explicit", false))?;
	registry.register(toggle("announceTracks", "Post a message when a track starts", true))?;

	registry.register(
		OptionDescriptor::builder("commandPrefix")
			.description("Prefix for text commands")
			.kind(OptionKind::Text { max_len: 5, default: Some("!".into()), placeholder: "!".into() })
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder("language")
			.description("Bot response language")
			.kind(OptionKind::Select {
				choices: ["en", "de", "fr", "es", "pt", "ja"]
					.iter()
					.map(|l| SelectChoice::new(*l, Tier::Free))
					.collect(),
				default: "en".into(),
			})
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder("welcomeMessage")
			.description("Message posted when the bot joins a guild")
			.kind(OptionKind::Text {
				max_len: 200,
				default: Some("Thanks for adding me! Use !play to get started.".into()),
				placeholder: "Welcome!".into(),
			})
			.build()?,
	)?;

	Ok(())
}

fn register_embed(registry: &mut OptionRegistry) -> ClResult<()> {
	registry.register(
		OptionDescriptor::builder("embedEnabled")
			.description("Enable the web player embed")
			.min_tier(Tier::Starter)
			.kind(OptionKind::Boolean { default: false, plan_flag: None })
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder("embedTitle")
			.description("Title shown on the web player embed")
			.kind(OptionKind::Text { max_len: 80, default: None, placeholder: "Now playing".into() })
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder(keys::EMBED_ACCENT_COLOR)
			.description("Accent color of the embed")
			.kind(OptionKind::Color { default: "#5865F2".into() })
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder("embedTheme")
			.description("Embed theme")
			.kind(OptionKind::Select {
				choices: vec![
					SelectChoice::new("dark", Tier::Free),
					SelectChoice::new("light", Tier::Free),
					SelectChoice::new("glass", Tier::Pro),
				],
				default: "dark".into(),
			})
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder("customBrandingEnabled")
			.description("Use the guild's own branding assets")
			.min_tier(Tier::Starter)
			.kind(OptionKind::Boolean {
				default: false,
				plan_flag: Some(PlanFlag::CustomBranding),
			})
			.build()?,
	)?;

	registry.register(
		OptionDescriptor::builder("hideBranding")
			.description("Remove product branding from the embed")
			.min_tier(Tier::Scale)
			.kind(OptionKind::Boolean { default: false, plan_flag: Some(PlanFlag::WhiteLabel) })
			.build()?,
	)?;

	Ok(())
}

fn register_api(registry: &mut OptionRegistry) -> ClResult<()> {
	registry.register(
		OptionDescriptor::builder("apiAccessEnabled")
			.description("Accept requests authenticated with API tokens")
			.min_tier(Tier::Pro)
			.kind(OptionKind::Boolean { default: false, plan_flag: Some(PlanFlag::ApiAccess) })
			.build()?,
	)?;

	// 0 means tokens never expire
	registry.register(
		OptionDescriptor::builder(keys::API_TOKEN_TTL_DAYS)
			.description("Lifetime of newly created API tokens in days")
			.kind(OptionKind::Range { min: 0, max: 365, default: 0, plan_limit: None })
			.build()?,
	)?;

	Ok(())
}

/// Register every option
pub fn register_options(registry: &mut OptionRegistry) -> ClResult<()> {
	register_queue(registry)?;
	register_sources(registry)?;
	register_playback(registry)?;
	register_automation(registry)?;
	register_routing(registry)?;
	register_moderation(registry)?;
	register_embed(registry)?;
	register_api(registry)?;
	Ok(())
}

/// Build and freeze the product's option registry
pub fn default_registry() -> ClResult<FrozenOptionRegistry> {
	let mut registry = OptionRegistry::new();
	register_options(&mut registry)?;
	Ok(registry.freeze())
}


// vim: ts=4
