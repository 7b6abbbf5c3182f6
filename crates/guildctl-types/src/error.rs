//! Error taxonomy.
//!
//! Malformed option values and requests for capabilities above the tenant's plan are
//! never errors: the sanitizer coerces them silently. Only token lifecycle operations
//! and collaborator failures surface here.

use std::fmt;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// The tenant already holds the maximum number of API tokens
	TokenLimitExceeded,
	/// No API token with the requested id
	TokenNotFound,
	/// Token action name not recognized
	UnsupportedTokenAction(String),
	/// Persistence, tier resolution or another collaborator failed
	DependencyUnavailable(String),
	/// Static configuration (option schema, builder) is inconsistent
	ConfigError(String),
	Internal(String),
}

impl Error {
	/// Stable machine-readable code for callers
	pub fn code(&self) -> &'static str {
		match self {
			Error::TokenLimitExceeded => "E-TOKEN-LIMIT",
			Error::TokenNotFound => "E-TOKEN-NOTFOUND",
			Error::UnsupportedTokenAction(_) => "E-TOKEN-ACTION",
			Error::DependencyUnavailable(_) => "E-DEP-UNAVAILABLE",
			Error::ConfigError(_) => "E-CONFIG",
			Error::Internal(_) => "E-INTERNAL",
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::TokenLimitExceeded => write!(f, "token limit exceeded"),
			Error::TokenNotFound => write!(f, "token not found"),
			Error::UnsupportedTokenAction(action) => {
				write!(f, "unsupported token action: {}", action)
			}
			Error::DependencyUnavailable(msg) => write!(f, "dependency unavailable: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Internal(format!("json: {}", err))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_codes_are_distinct() {
		let errors = [
			Error::TokenLimitExceeded,
			Error::TokenNotFound,
			Error::UnsupportedTokenAction("x".into()),
			Error::DependencyUnavailable("db".into()),
			Error::ConfigError("c".into()),
			Error::Internal("i".into()),
		];
		let mut codes: Vec<&str> = errors.iter().map(Error::code).collect();
		codes.sort_unstable();
		codes.dedup();
		assert_eq!(codes.len(), errors.len());
	}

	#[test]
	fn test_display() {
		assert_eq!(
			Error::UnsupportedTokenAction("explode".into()).to_string(),
			"unsupported token action: explode"
		);
		assert_eq!(Error::TokenLimitExceeded.to_string(), "token limit exceeded");
	}
}

// vim: ts=4
