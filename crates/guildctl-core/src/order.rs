//! Finite totally ordered option values and the clamp shared by all of them.

/// A closed enumeration whose declaration order is its total order.
pub trait Ladder: Copy + Ord + 'static {
	/// Every step, lowest first
	const STEPS: &'static [Self];

	fn as_str(self) -> &'static str;

	fn parse(s: &str) -> Option<Self> {
		Self::STEPS.iter().copied().find(|step| step.as_str() == s)
	}
}

/// Keep `candidate` if it does not exceed `ceiling`, otherwise return `ceiling`.
/// A missing (unrecognized) candidate counts as above the ceiling.
pub fn order_clamp<L: Ladder>(candidate: Option<L>, ceiling: L) -> L {
	match candidate {
		Some(value) if value <= ceiling => value,
		_ => ceiling,
	}
}

/// [`order_clamp`] on a raw string value
pub fn clamp_str<L: Ladder>(raw: &str, ceiling: L) -> L {
	order_clamp(L::parse(raw), ceiling)
}

macro_rules! ladder {
	($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub enum $name {
			$($variant),+
		}

		impl Ladder for $name {
			const STEPS: &'static [Self] = &[$($name::$variant),+];

			fn as_str(self) -> &'static str {
				match self {
					$($name::$variant => $text),+
				}
			}
		}
	};
}

ladder!(
	/// Which audio sources a guild may queue from
	SourceAccess { Basic => "basic", Extended => "extended", Premium => "premium", All => "all" }
);

ladder!(
	PlaybackQuality {
		Standard => "standard",
		High => "high",
		Lossless => "lossless",
		Studio => "studio",
	}
);

ladder!(
	AnalyticsMode { Off => "off", Basic => "basic", Advanced => "advanced", Realtime => "realtime" }
);

ladder!(
	/// How much of queue curation the bot does unattended
	AutomationLevel { Off => "off", Basic => "basic", Smart => "smart", Full => "full" }
);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_order_clamp_keeps_lower() {
		assert_eq!(order_clamp(Some(AutomationLevel::Basic), AutomationLevel::Smart), AutomationLevel::Basic);
		assert_eq!(order_clamp(Some(AutomationLevel::Smart), AutomationLevel::Smart), AutomationLevel::Smart);
	}

	#[test]
	fn test_order_clamp_forces_down() {
		assert_eq!(order_clamp(Some(AutomationLevel::Full), AutomationLevel::Smart), AutomationLevel::Smart);
		assert_eq!(order_clamp(None, PlaybackQuality::High), PlaybackQuality::High);
	}

	#[test]
	fn test_clamp_str_unknown_is_ceiling() {
		assert_eq!(clamp_str("ultra", SourceAccess::Extended), SourceAccess::Extended);
		assert_eq!(clamp_str("FULL", AutomationLevel::Basic), AutomationLevel::Basic);
		assert_eq!(clamp_str("off", AnalyticsMode::Realtime), AnalyticsMode::Off);
	}

	#[test]
	fn test_steps_are_sorted() {
		fn check<L: Ladder + std::fmt::Debug>() {
			assert!(L::STEPS.windows(2).all(|w| w[0] < w[1]));
			for step in L::STEPS {
				assert_eq!(L::parse(step.as_str()), Some(*step));
			}
		}
		check::<SourceAccess>();
		check::<PlaybackQuality>();
		check::<AnalyticsMode>();
		check::<AutomationLevel>();
	}
}

// vim: ts=4
