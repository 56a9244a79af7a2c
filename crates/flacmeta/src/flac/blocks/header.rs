//! FLAC metablock headers
use serde::Serialize;
use serde_with::SerializeDisplay;
use std::fmt::Display;

use super::seektable::SEEKPOINT_LEN;
use crate::flac::errors::FlacDecodeError;

/// A type of flac metadata block
#[expect(missing_docs)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, SerializeDisplay)]
pub enum FlacMetablockType {
	Streaminfo,
	Padding,
	Application,
	Seektable,
	VorbisComment,
	Cuesheet,
	Picture,
}

impl FlacMetablockType {
	/// Map a 7-bit block type code to a block type.
	/// Code 127 and 7 through 126 are not valid blocks.
	pub fn from_id(id: u8) -> Result<Self, FlacDecodeError> {
		return Ok(match id & 0b01111111 {
			0 => FlacMetablockType::Streaminfo,
			1 => FlacMetablockType::Padding,
			2 => FlacMetablockType::Application,
			3 => FlacMetablockType::Seektable,
			4 => FlacMetablockType::VorbisComment,
			5 => FlacMetablockType::Cuesheet,
			6 => FlacMetablockType::Picture,
			x => return Err(FlacDecodeError::BadMetablockType(x)),
		});
	}

	/// The code this block type is stored as
	pub fn to_id(&self) -> u8 {
		match self {
			FlacMetablockType::Streaminfo => 0,
			FlacMetablockType::Padding => 1,
			FlacMetablockType::Application => 2,
			FlacMetablockType::Seektable => 3,
			FlacMetablockType::VorbisComment => 4,
			FlacMetablockType::Cuesheet => 5,
			FlacMetablockType::Picture => 6,
		}
	}

	/// The canonical name of this block type
	pub fn name(&self) -> &'static str {
		match self {
			FlacMetablockType::Streaminfo => "STREAMINFO",
			FlacMetablockType::Padding => "PADDING",
			FlacMetablockType::Application => "APPLICATION",
			FlacMetablockType::Seektable => "SEEKTABLE",
			FlacMetablockType::VorbisComment => "VORBIS_COMMENT",
			FlacMetablockType::Cuesheet => "CUESHEET",
			FlacMetablockType::Picture => "PICTURE",
		}
	}

	/// If true, a stream may contain at most one block of this type
	pub fn is_singleton(&self) -> bool {
		!matches!(self, FlacMetablockType::Picture)
	}
}

impl Display for FlacMetablockType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}

/// The header of a flac metadata block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlacMetablockHeader {
	/// The type of block this is
	pub block_type: FlacMetablockType,

	/// The length of this block, in bytes
	/// (not including this header)
	pub length: u32,

	/// If true, this is the last metadata block
	pub is_last: bool,
}

impl FlacMetablockHeader {
	/// The length of an encoded header, in bytes
	pub const LEN: usize = 4;

	/// Try to decode the given bytes as a flac metablock header
	pub fn decode(header: [u8; Self::LEN]) -> Result<Self, FlacDecodeError> {
		let bits = u32::from_be_bytes(header);

		// Last-metadata-block flag:
		// '1' if this block is the last metadata block before the audio blocks,
		// '0' otherwise.
		let is_last = bits & 0x8000_0000 != 0;

		// Masked to 7 bits, so this always fits in a u8
		let block_type = FlacMetablockType::from_id(((bits & 0x7F00_0000) >> 24) as u8)?;

		let length = bits & 0x00FF_FFFF;

		return Ok(Self {
			block_type,
			length,
			is_last,
		});
	}

	/// Check constraints on this block's length that we can
	/// verify before reading its body.
	pub fn check_length(&self) -> Result<(), FlacDecodeError> {
		if self.block_type == FlacMetablockType::Seektable
			&& self.length % SEEKPOINT_LEN as u32 != 0
		{
			return Err(FlacDecodeError::BadSeektableLength(self.length));
		}

		return Ok(());
	}

	/// The number of seek points in this block.
	/// Returns `None` if this isn't a seektable header.
	#[expect(clippy::integer_division)]
	pub fn seekpoint_count(&self) -> Option<u32> {
		match self.block_type {
			FlacMetablockType::Seektable => Some(self.length / SEEKPOINT_LEN as u32),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decode_streaminfo_header() {
		let h = FlacMetablockHeader::decode([0x00, 0x00, 0x00, 0x22]).unwrap();
		assert_eq!(h.block_type, FlacMetablockType::Streaminfo);
		assert_eq!(h.length, 34);
		assert!(!h.is_last);
	}

	#[test]
	fn decode_last_flag_and_long_length() {
		let h = FlacMetablockHeader::decode([0x81, 0x00, 0x1F, 0xEF]).unwrap();
		assert_eq!(h.block_type, FlacMetablockType::Padding);
		assert_eq!(h.length, 8175);
		assert!(h.is_last);

		let h = FlacMetablockHeader::decode([0x86, 0xFF, 0xFF, 0xFF]).unwrap();
		assert_eq!(h.block_type, FlacMetablockType::Picture);
		assert_eq!(h.length, 0x00FF_FFFF);
		assert!(h.is_last);
	}

	#[test]
	fn reject_unknown_types() {
		for id in [7u8, 8, 100, 126, 127] {
			match FlacMetablockHeader::decode([id, 0, 0, 0]) {
				Err(FlacDecodeError::BadMetablockType(x)) => assert_eq!(x, id),
				x => panic!("Unexpected result {x:?}"),
			}

			// The last-block flag does not change the type
			match FlacMetablockHeader::decode([id | 0x80, 0, 0, 0]) {
				Err(FlacDecodeError::BadMetablockType(x)) => assert_eq!(x, id),
				x => panic!("Unexpected result {x:?}"),
			}
		}
	}

	#[test]
	fn seektable_length() {
		let h = FlacMetablockHeader::decode([0x03, 0x00, 0x00, 54]).unwrap();
		assert!(h.check_length().is_ok());
		assert_eq!(h.seekpoint_count(), Some(3));

		let h = FlacMetablockHeader::decode([0x03, 0x00, 0x00, 55]).unwrap();
		assert!(matches!(
			h.check_length(),
			Err(FlacDecodeError::BadSeektableLength(55))
		));

		let h = FlacMetablockHeader::decode([0x00, 0x00, 0x00, 34]).unwrap();
		assert_eq!(h.seekpoint_count(), None);
	}

	#[test]
	fn names() {
		for id in 0..=6 {
			let t = FlacMetablockType::from_id(id).unwrap();
			assert_eq!(t.to_id(), id);
		}
		assert_eq!(FlacMetablockType::VorbisComment.to_string(), "VORBIS_COMMENT");
		assert!(!FlacMetablockType::Picture.is_singleton());
		assert!(FlacMetablockType::Padding.is_singleton());
	}
}
