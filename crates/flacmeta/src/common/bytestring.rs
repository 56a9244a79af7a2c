//! Text fields that are stored verbatim

use serde_with::SerializeDisplay;
use std::fmt::{Debug, Display};

/// A string exactly as it appears in a file.
///
/// This is usually UTF-8, but nothing guarantees it.
/// [`Display`] (and serialization) replace invalid sequences
/// with U+FFFD, the raw bytes are always available.
#[derive(Clone, PartialEq, Eq, Hash, Default, SerializeDisplay)]
pub struct ByteString(Vec<u8>);

impl ByteString {
	/// The raw bytes of this string
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Take the raw bytes of this string
	pub fn into_bytes(self) -> Vec<u8> {
		self.0
	}

	/// This string as `&str`, if it is valid UTF-8
	pub fn to_str(&self) -> Option<&str> {
		std::str::from_utf8(&self.0).ok()
	}

	/// The length of this string, in bytes
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// If true, this string has no bytes
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for ByteString {
	fn from(value: Vec<u8>) -> Self {
		Self(value)
	}
}

impl From<&[u8]> for ByteString {
	fn from(value: &[u8]) -> Self {
		Self(value.to_vec())
	}
}

impl From<&str> for ByteString {
	fn from(value: &str) -> Self {
		Self(value.as_bytes().to_vec())
	}
}

impl Display for ByteString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", String::from_utf8_lossy(&self.0))
	}
}

impl Debug for ByteString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.to_str() {
			Some(s) => Debug::fmt(s, f),
			None => f.debug_tuple("ByteString").field(&self.0).finish(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn utf8() {
		let s = ByteString::from("image/png");
		assert_eq!(s.to_str(), Some("image/png"));
		assert_eq!(s.to_string(), "image/png");
		assert_eq!(s.len(), 9);
		assert_eq!(format!("{s:?}"), "\"image/png\"");
	}

	#[test]
	fn latin1_is_kept() {
		let s = ByteString::from(&b"Caf\xe9"[..]);
		assert_eq!(s.to_str(), None);
		assert_eq!(s.as_bytes(), b"Caf\xe9");
		assert_eq!(s.to_string(), "Caf\u{fffd}");
		assert_eq!(
			serde_json::to_string(&s).unwrap(),
			"\"Caf\u{fffd}\""
		);
		assert_eq!(s.into_bytes(), b"Caf\xe9".to_vec());
	}
}
