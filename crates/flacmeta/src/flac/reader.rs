//! Read every metadata block at the start of a flac stream.

use serde::Serialize;
use std::{collections::HashSet, io::Read};
use tracing::{debug, trace};

use super::{
	blocks::{
		FlacApplicationBlock, FlacBlock, FlacCommentBlock, FlacCuesheetBlock, FlacMetablock,
		FlacMetablockHeader, FlacMetablockType, FlacPaddingBlock, FlacPictureBlock,
		FlacSeektableBlock, FlacStreaminfoBlock,
	},
	config::FlacReaderConfig,
	errors::{FlacDecodeError, FlacReaderError},
};

/// Every flac stream starts with these bytes
pub const FLAC_SIGNATURE: [u8; 4] = *b"fLaC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
	/// We haven't read the signature yet
	AwaitingSignature,

	/// The next thing in the stream is a metablock header
	ReadingBlocks { is_first: bool },

	/// We've read the last metablock.
	/// The underlying reader is positioned at the first audio frame.
	Done,

	/// We've encountered an error, and can't continue.
	Failed,
}

/// A reader that decodes flac metablocks one at a time.
///
/// This never reads past the block marked "last",
/// so [`FlacMetaReader::into_inner`] may be used to get
/// the audio frames that follow.
pub struct FlacMetaReader<R: Read> {
	read: R,
	config: FlacReaderConfig,
	state: ReaderState,

	// The number of bytes we've consumed from `read`
	position: u64,

	// Singleton block types we've already seen
	seen: HashSet<FlacMetablockType>,
}

impl<R: Read> FlacMetaReader<R> {
	/// Make a new [`FlacMetaReader`].
	/// `read` should be positioned at the first byte of a flac stream.
	pub fn new(read: R, config: FlacReaderConfig) -> Self {
		Self {
			read,
			config,
			state: ReaderState::AwaitingSignature,
			position: 0,
			seen: HashSet::new(),
		}
	}

	/// The number of bytes this reader has consumed
	pub fn position(&self) -> u64 {
		self.position
	}

	/// If true, we've read the last metablock in this stream.
	pub fn is_done(&self) -> bool {
		self.state == ReaderState::Done
	}

	/// If true, this reader hit an error and can't continue.
	pub fn is_failed(&self) -> bool {
		self.state == ReaderState::Failed
	}

	/// Get the underlying reader back
	pub fn into_inner(self) -> R {
		self.read
	}

	/// Read exactly `n` bytes, tracking our position.
	/// EOF before `n` bytes is a short read.
	fn read_exact_field(&mut self, field: &'static str, n: u64) -> Result<Vec<u8>, FlacDecodeError> {
		let mut buf = Vec::new();
		let got = self.read.by_ref().take(n).read_to_end(&mut buf)? as u64;
		self.position += got;

		if got != n {
			return Err(FlacDecodeError::ShortRead {
				field,
				expected: n,
				got,
			});
		}

		return Ok(buf);
	}

	fn read_signature(&mut self) -> Result<(), FlacDecodeError> {
		let data = self.read_exact_field("flac signature", FLAC_SIGNATURE.len() as u64)?;
		if data != FLAC_SIGNATURE {
			return Err(FlacDecodeError::BadMagicBytes);
		}

		trace!(message = "Found flac signature");
		return Ok(());
	}

	fn read_header(&mut self, is_first: bool) -> Result<FlacMetablockHeader, FlacDecodeError> {
		let data = self.read_exact_field("metablock header", FlacMetablockHeader::LEN as u64)?;
		let mut bytes = [0u8; FlacMetablockHeader::LEN];
		bytes.copy_from_slice(&data);

		let header = FlacMetablockHeader::decode(bytes)?;
		trace!(
			message = "Read metablock header",
			block_type = %header.block_type,
			length = header.length,
			is_last = header.is_last,
		);

		if is_first
			&& self.config.require_streaminfo_first
			&& header.block_type != FlacMetablockType::Streaminfo
		{
			return Err(FlacDecodeError::BadFirstBlock);
		}

		if header.block_type.is_singleton() && !self.seen.insert(header.block_type) {
			return Err(FlacDecodeError::DuplicateBlock(header.block_type));
		}

		header.check_length()?;
		return Ok(header);
	}

	fn read_body(&mut self, header: &FlacMetablockHeader) -> Result<FlacBlock, FlacDecodeError> {
		let data = self.read_exact_field("metablock body", u64::from(header.length))?;
		let block = FlacBlock::decode(header.block_type, &data)?;

		if let FlacBlock::Padding(p) = &block {
			if self.config.require_zero_padding && !p.is_zeroed {
				return Err(FlacDecodeError::NonzeroPadding);
			}
		}

		return Ok(block);
	}

	/// Read the next metablock in this stream.
	///
	/// Returns [`FlacReaderError::AlreadyFinished`] if the last block
	/// has already been read, or if this reader has failed.
	pub fn next_block(&mut self) -> Result<FlacMetablock<FlacBlock>, FlacReaderError> {
		let is_first = match self.state {
			ReaderState::AwaitingSignature => {
				if let Err(error) = self.read_signature() {
					return Err(self.fail(0, None, error));
				}
				true
			}
			ReaderState::ReadingBlocks { is_first } => is_first,
			ReaderState::Done | ReaderState::Failed => {
				return Err(FlacReaderError::AlreadyFinished)
			}
		};

		let header_offset = self.position;
		let header = match self.read_header(is_first) {
			Ok(x) => x,
			Err(error) => {
				// Keep the block type if we got far enough to decode it
				let block_type = match &error {
					FlacDecodeError::DuplicateBlock(t) => Some(*t),
					FlacDecodeError::BadSeektableLength(_) => Some(FlacMetablockType::Seektable),
					_ => None,
				};
				return Err(self.fail(header_offset, block_type, error));
			}
		};

		let body_offset = self.position;
		let block = match self.read_body(&header) {
			Ok(x) => x,
			Err(error) => return Err(self.fail(body_offset, Some(header.block_type), error)),
		};

		debug!(
			message = "Decoded metablock",
			block_type = %header.block_type,
			length = header.length,
			is_last = header.is_last,
			offset = header_offset,
		);

		self.state = if header.is_last {
			ReaderState::Done
		} else {
			ReaderState::ReadingBlocks { is_first: false }
		};

		return Ok(FlacMetablock { header, block });
	}

	fn fail(
		&mut self,
		offset: u64,
		block_type: Option<FlacMetablockType>,
		error: FlacDecodeError,
	) -> FlacReaderError {
		self.state = ReaderState::Failed;
		FlacReaderError::DecodeError {
			offset,
			block_type,
			error,
		}
	}
}

/// All metadata blocks in a flac stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct FlacMetadata {
	/// The STREAMINFO block, if there was one
	pub streaminfo: Option<FlacMetablock<FlacStreaminfoBlock>>,

	/// The PADDING block, if there was one
	pub padding: Option<FlacMetablock<FlacPaddingBlock>>,

	/// The APPLICATION block, if there was one
	pub application: Option<FlacMetablock<FlacApplicationBlock>>,

	/// The SEEKTABLE block, if there was one
	pub seektable: Option<FlacMetablock<FlacSeektableBlock>>,

	/// The VORBIS_COMMENT block, if there was one
	pub vorbis_comment: Option<FlacMetablock<FlacCommentBlock>>,

	/// The CUESHEET block, if there was one
	pub cuesheet: Option<FlacMetablock<FlacCuesheetBlock>>,

	/// All PICTURE blocks, in file order
	pub pictures: Vec<FlacMetablock<FlacPictureBlock>>,

	/// The type of every block we read, in file order
	pub block_order: Vec<FlacMetablockType>,
}

impl FlacMetadata {
	/// Read all metadata blocks from `read`.
	///
	/// On success, `read` is positioned at the first audio frame.
	/// Pass `&mut read` to keep using it afterwards.
	pub fn read<R: Read>(read: R, config: &FlacReaderConfig) -> Result<Self, FlacReaderError> {
		let mut reader = FlacMetaReader::new(read, *config);
		let mut out = Self::default();

		while !reader.is_done() {
			out.push(reader.next_block()?);
		}

		debug!(
			message = "Read flac metadata",
			total_blocks = out.total_blocks(),
			pictures = out.pictures.len(),
			bytes = reader.position(),
		);

		return Ok(out);
	}

	/// Store a decoded block.
	/// Singletons are deduplicated by [`FlacMetaReader`], so this always overwrites.
	fn push(&mut self, metablock: FlacMetablock<FlacBlock>) {
		let FlacMetablock { header, block } = metablock;
		self.block_order.push(header.block_type);

		match block {
			FlacBlock::Streaminfo(block) => self.streaminfo = Some(FlacMetablock { header, block }),
			FlacBlock::Padding(block) => self.padding = Some(FlacMetablock { header, block }),
			FlacBlock::Application(block) => {
				self.application = Some(FlacMetablock { header, block })
			}
			FlacBlock::SeekTable(block) => self.seektable = Some(FlacMetablock { header, block }),
			FlacBlock::VorbisComment(block) => {
				self.vorbis_comment = Some(FlacMetablock { header, block })
			}
			FlacBlock::CueSheet(block) => self.cuesheet = Some(FlacMetablock { header, block }),
			FlacBlock::Picture(block) => self.pictures.push(FlacMetablock { header, block }),
		}
	}

	/// The number of blocks we read
	pub fn total_blocks(&self) -> usize {
		self.block_order.len()
	}

	/// The type of every block we read, in file order
	pub fn block_types(&self) -> &[FlacMetablockType] {
		&self.block_order
	}
}
