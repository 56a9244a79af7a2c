//! Decode implementations for all flac block types

// Not metadata blocks
mod cursor;
pub(crate) use cursor::MetablockCursor;

mod header;
pub use header::{FlacMetablockHeader, FlacMetablockType};

// Metadata blocks

mod streaminfo;
pub use streaminfo::FlacStreaminfoBlock;

mod picture;
pub use picture::FlacPictureBlock;

mod padding;
pub use padding::FlacPaddingBlock;

mod application;
pub use application::FlacApplicationBlock;

mod seektable;
pub use seektable::{FlacSeekpoint, FlacSeektableBlock};

mod cuesheet;
pub use cuesheet::{FlacCuesheetBlock, FlacCuesheetIndex, FlacCuesheetTrack};

mod comment;
pub use comment::FlacCommentBlock;

use serde::Serialize;

use super::errors::FlacDecodeError;

/// A decode implementation for a
/// flac metadata block
pub trait FlacMetablockDecode: Sized {
	/// Try to decode this block from bytes.
	/// `data` should NOT include the metablock header.
	fn decode(data: &[u8]) -> Result<Self, FlacDecodeError>;
}

/// Any decoded metadata block
#[derive(Debug)]
#[expect(missing_docs)]
pub enum FlacBlock {
	Streaminfo(FlacStreaminfoBlock),
	Picture(FlacPictureBlock),
	Padding(FlacPaddingBlock),
	Application(FlacApplicationBlock),
	SeekTable(FlacSeektableBlock),
	VorbisComment(FlacCommentBlock),
	CueSheet(FlacCuesheetBlock),
}

impl FlacBlock {
	/// Try to decode the given data as a block
	pub fn decode(block_type: FlacMetablockType, data: &[u8]) -> Result<Self, FlacDecodeError> {
		Ok(match block_type {
			FlacMetablockType::Streaminfo => {
				FlacBlock::Streaminfo(FlacStreaminfoBlock::decode(data)?)
			}
			FlacMetablockType::Application => {
				FlacBlock::Application(FlacApplicationBlock::decode(data)?)
			}
			FlacMetablockType::Cuesheet => FlacBlock::CueSheet(FlacCuesheetBlock::decode(data)?),
			FlacMetablockType::Padding => FlacBlock::Padding(FlacPaddingBlock::decode(data)?),
			FlacMetablockType::Picture => FlacBlock::Picture(FlacPictureBlock::decode(data)?),
			FlacMetablockType::Seektable => FlacBlock::SeekTable(FlacSeektableBlock::decode(data)?),
			FlacMetablockType::VorbisComment => {
				FlacBlock::VorbisComment(FlacCommentBlock::decode(data)?)
			}
		})
	}

	/// The type of this block
	pub fn block_type(&self) -> FlacMetablockType {
		match self {
			Self::Streaminfo(_) => FlacMetablockType::Streaminfo,
			Self::Picture(_) => FlacMetablockType::Picture,
			Self::Padding(_) => FlacMetablockType::Padding,
			Self::Application(_) => FlacMetablockType::Application,
			Self::SeekTable(_) => FlacMetablockType::Seektable,
			Self::VorbisComment(_) => FlacMetablockType::VorbisComment,
			Self::CueSheet(_) => FlacMetablockType::Cuesheet,
		}
	}
}

/// A decoded block along with the header it was read with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlacMetablock<T> {
	/// This block's header
	pub header: FlacMetablockHeader,

	/// This block's content
	pub block: T,
}
