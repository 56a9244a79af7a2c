//! Reader configuration

use serde::Deserialize;

/// Options that control how strictly a [`super::reader::FlacMetaReader`]
/// checks the stream it reads.
///
/// Every option defaults to the permissive behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FlacReaderConfig {
	/// If true, the first metablock must be STREAMINFO.
	#[serde(default = "FlacReaderConfig::default_require_streaminfo_first")]
	pub require_streaminfo_first: bool,

	/// If true, padding blocks must contain only zeros.
	#[serde(default = "FlacReaderConfig::default_require_zero_padding")]
	pub require_zero_padding: bool,
}

impl FlacReaderConfig {
	fn default_require_streaminfo_first() -> bool {
		false
	}

	fn default_require_zero_padding() -> bool {
		false
	}

	/// The strictest possible config
	pub fn strict() -> Self {
		Self {
			require_streaminfo_first: true,
			require_zero_padding: true,
		}
	}
}

impl Default for FlacReaderConfig {
	fn default() -> Self {
		Self {
			require_streaminfo_first: Self::default_require_streaminfo_first(),
			require_zero_padding: Self::default_require_zero_padding(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_toml_is_default() {
		let c: FlacReaderConfig = toml::from_str("").unwrap();
		assert_eq!(c, FlacReaderConfig::default());
		assert!(!c.require_streaminfo_first);
		assert!(!c.require_zero_padding);
	}

	#[test]
	fn partial_toml() {
		let c: FlacReaderConfig = toml::from_str("require_zero_padding = true").unwrap();
		assert!(!c.require_streaminfo_first);
		assert!(c.require_zero_padding);
	}

	#[test]
	fn full_toml() {
		let c: FlacReaderConfig = toml::from_str(
			"require_streaminfo_first = true\n\
			 require_zero_padding = true\n",
		)
		.unwrap();
		assert_eq!(c, FlacReaderConfig::strict());
	}
}
