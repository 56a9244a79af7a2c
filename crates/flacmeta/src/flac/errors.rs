//! FLAC errors
use std::string::FromUtf8Error;
use thiserror::Error;

use super::blocks::FlacMetablockType;

/// Broad categories of [`FlacDecodeError`]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FlacErrorKind {
	/// The stream violates the FLAC format
	Format,

	/// A block type that may only appear once appeared twice
	DuplicateBlock,

	/// A declared length asked for more bytes than were available
	ShortRead,

	/// The underlying reader failed
	Io,
}

#[expect(missing_docs)]
#[derive(Debug, Error)]
pub enum FlacDecodeError {
	/// FLAC does not start with 0x66 0x4C 0x61 0x43
	#[error("flac signature is missing or malformed")]
	BadMagicBytes,

	/// The first metablock isn't StreamInfo
	#[error("first metablock isn't streaminfo")]
	BadFirstBlock,

	/// We got an invalid metadata block type
	#[error("invalid flac metablock type {0}")]
	BadMetablockType(u8),

	/// We found a second copy of a block that may only appear once
	#[error("encountered a second {0} block")]
	DuplicateBlock(FlacMetablockType),

	/// A length field asked for more bytes than we have
	#[error("short read of {field}: expected {expected} bytes, got {got}")]
	ShortRead {
		field: &'static str,
		expected: u64,
		got: u64,
	},

	/// A streaminfo field is outside its valid range
	#[error("streaminfo {field} is out of range: {value}")]
	BadStreaminfo { field: &'static str, value: u32 },

	/// Seektable length must be a multiple of 18 bytes
	#[error("seektable length {0} is not a multiple of 18")]
	BadSeektableLength(u32),

	/// Application data must be a multiple of 8 bytes
	#[error("application data length {0} is not a multiple of 8")]
	BadApplicationLength(usize),

	/// A cuesheet must have at least one track
	#[error("cuesheet has no tracks")]
	NoCuesheetTracks,

	/// Cuesheet track numbers may not be zero.
	/// `track` is the position of the track in the cuesheet.
	#[error("cuesheet track at position {track} has track number 0")]
	ZeroTrackNumber { track: usize },

	/// Cuesheet index offsets must be a multiple of 588 samples
	#[error("index point {point} of cuesheet track {track} has offset {offset}, which is not a multiple of 588")]
	BadIndexOffset { track: u8, point: u8, offset: u64 },

	/// A padding block contains something other than zeros
	#[error("padding block contains nonzero bytes")]
	NonzeroPadding,

	/// We encountered an i/o error while processing
	#[error("io error while reading flac")]
	IoError(#[from] std::io::Error),

	/// We tried to decode a string, but found invalid UTF-8
	#[error("error while decoding string")]
	FailedStringDecode(#[from] FromUtf8Error),

	/// A base64-encoded picture in a vorbis comment was malformed
	#[error("error while decoding base64 picture")]
	FailedBase64Decode(#[from] base64::DecodeError),
}

impl FlacDecodeError {
	/// Get the category of this error
	pub fn kind(&self) -> FlacErrorKind {
		match self {
			Self::DuplicateBlock(_) => FlacErrorKind::DuplicateBlock,
			Self::ShortRead { .. } => FlacErrorKind::ShortRead,
			Self::IoError(_) => FlacErrorKind::Io,
			_ => FlacErrorKind::Format,
		}
	}
}

/// An error produced by a [`super::reader::FlacMetaReader`]
#[derive(Debug, Error)]
pub enum FlacReaderError {
	/// Could not decode flac data
	#[error("error while decoding flac metadata at byte {offset}")]
	DecodeError {
		/// The position of the signature, header or block that failed
		offset: u64,

		/// The type of the block we were decoding, if we got that far
		block_type: Option<FlacMetablockType>,

		/// What went wrong
		#[source]
		error: FlacDecodeError,
	},

	/// Tried to read from a reader that has finished or failed
	#[error("flac metadata reader is already finished")]
	AlreadyFinished,
}

impl FlacReaderError {
	/// The decode error behind this error, if any
	pub fn decode_error(&self) -> Option<&FlacDecodeError> {
		match self {
			Self::DecodeError { error, .. } => Some(error),
			Self::AlreadyFinished => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::error::Error;

	use super::*;

	#[test]
	fn kinds() {
		assert_eq!(FlacDecodeError::BadMagicBytes.kind(), FlacErrorKind::Format);
		assert_eq!(
			FlacDecodeError::BadIndexOffset {
				track: 1,
				point: 1,
				offset: 589
			}
			.kind(),
			FlacErrorKind::Format
		);
		assert_eq!(
			FlacDecodeError::DuplicateBlock(FlacMetablockType::Seektable).kind(),
			FlacErrorKind::DuplicateBlock
		);
		assert_eq!(
			FlacDecodeError::ShortRead {
				field: "x",
				expected: 4,
				got: 0
			}
			.kind(),
			FlacErrorKind::ShortRead
		);
		assert_eq!(
			FlacDecodeError::from(std::io::Error::other("device")).kind(),
			FlacErrorKind::Io
		);
	}

	#[test]
	fn messages() {
		assert_eq!(
			FlacDecodeError::DuplicateBlock(FlacMetablockType::VorbisComment).to_string(),
			"encountered a second VORBIS_COMMENT block"
		);
		assert_eq!(
			FlacDecodeError::ShortRead {
				field: "picture data",
				expected: 64,
				got: 63
			}
			.to_string(),
			"short read of picture data: expected 64 bytes, got 63"
		);

		let e = FlacReaderError::DecodeError {
			offset: 42,
			block_type: Some(FlacMetablockType::Streaminfo),
			error: FlacDecodeError::BadFirstBlock,
		};
		assert_eq!(e.to_string(), "error while decoding flac metadata at byte 42");
		assert!(e.source().is_some());
		assert!(FlacReaderError::AlreadyFinished.source().is_none());
	}
}
