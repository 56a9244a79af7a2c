use serde::Serialize;

use super::FlacMetablockDecode;
use crate::flac::errors::FlacDecodeError;

/// A padding block in a FLAC file.
/// We only keep the size of the padding, never its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlacPaddingBlock {
	/// The length of this padding, in bytes.
	pub size: u32,

	/// If false, this padding contained nonzero bytes.
	pub is_zeroed: bool,
}

impl FlacMetablockDecode for FlacPaddingBlock {
	fn decode(data: &[u8]) -> Result<Self, FlacDecodeError> {
		Ok(Self {
			// Block lengths are 24 bits
			size: data.len() as u32,
			is_zeroed: data.iter().all(|x| *x == 0u8),
		})
	}
}
