//! Versioned digest format. Used for record signatures and token secret hashes.

use base64::Engine;
use sha2::{Digest, Sha256};

pub enum Hasher {
	V1(Sha256),
}

impl Hasher {
	pub fn new() -> Self {
		Self::V1(Sha256::new())
	}

	pub fn update(&mut self, data: &[u8]) {
		match self {
			Self::V1(hasher) => hasher.update(data),
		}
	}

	/// Finalize into `<prefix>1~<base64url digest>`
	pub fn finalize(self, prefix: &str) -> String {
		match self {
			Self::V1(hasher) => {
				let digest = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize());
				prefix.to_string() + "1~" + &digest
			}
		}
	}
}

impl Default for Hasher {
	fn default() -> Self {
		Self::new()
	}
}

pub fn hash(prefix: &str, data: &[u8]) -> Box<str> {
	let mut hasher = Hasher::new();
	hasher.update(data);
	hasher.finalize(prefix).into()
}


// vim: ts=4
