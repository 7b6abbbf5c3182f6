//! Utility functions

use rand::RngExt;

pub const SAFE: [char; 62] = [
	'0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
	'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
	'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
	'V', 'W', 'X', 'Y', 'Z',
];

/// Random alphanumeric string of `len` characters
pub fn random_string(len: usize) -> String {
	let mut rng = rand::rng();
	let mut result = String::with_capacity(len);

	for _ in 0..len {
		result.push(SAFE[rng.random_range(0..SAFE.len())]);
	}
	result
}

/// Last `n` characters of `s` (all of it if shorter)
pub fn last_chars(s: &str, n: usize) -> String {
	let count = s.chars().count();
	s.chars().skip(count.saturating_sub(n)).collect()
}

/// Truncate to at most `max` characters, respecting char boundaries
pub fn truncate_chars(s: &str, max: usize) -> &str {
	match s.char_indices().nth(max) {
		Some((idx, _)) => &s[..idx],
		None => s,
	}
}


// vim: ts=4
