use serde::Serialize;

use super::FlacMetablockDecode;
use crate::{common::vorbiscomment::VorbisComment, flac::errors::FlacDecodeError};

/// A vorbis comment metablock in a flac file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlacCommentBlock {
	/// The vorbis comment stored inside this block
	pub comment: VorbisComment,
}

impl FlacMetablockDecode for FlacCommentBlock {
	fn decode(data: &[u8]) -> Result<Self, FlacDecodeError> {
		let comment = VorbisComment::decode(data)?;
		Ok(Self { comment })
	}
}
