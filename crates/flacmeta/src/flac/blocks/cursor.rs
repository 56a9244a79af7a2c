//! A bounds-checked reader over the body of one metablock

use tracing::warn;

use super::FlacMetablockType;
use crate::{common::bytestring::ByteString, flac::errors::FlacDecodeError};

/// Reads fixed-width fields from a block body.
///
/// Every read names the field it is reading, so that a
/// truncated block produces a useful [`FlacDecodeError::ShortRead`].
pub(crate) struct MetablockCursor<'a> {
	block_type: FlacMetablockType,
	data: &'a [u8],
	position: usize,
}

impl<'a> MetablockCursor<'a> {
	pub(crate) fn new(block_type: FlacMetablockType, data: &'a [u8]) -> Self {
		Self {
			block_type,
			data,
			position: 0,
		}
	}

	/// The number of bytes we haven't read yet
	pub(crate) fn remaining(&self) -> usize {
		self.data.len() - self.position
	}

	/// Take the next `n` bytes
	pub(crate) fn bytes(&mut self, field: &'static str, n: usize) -> Result<&'a [u8], FlacDecodeError> {
		if n > self.remaining() {
			return Err(FlacDecodeError::ShortRead {
				field,
				expected: n as u64,
				got: self.remaining() as u64,
			});
		}

		let out = &self.data[self.position..self.position + n];
		self.position += n;
		return Ok(out);
	}

	/// Take a fixed number of bytes
	pub(crate) fn array<const N: usize>(
		&mut self,
		field: &'static str,
	) -> Result<[u8; N], FlacDecodeError> {
		let mut block = [0u8; N];
		block.copy_from_slice(self.bytes(field, N)?);
		return Ok(block);
	}

	/// Take everything that is left
	pub(crate) fn rest(&mut self) -> &'a [u8] {
		let out = &self.data[self.position..];
		self.position = self.data.len();
		return out;
	}

	pub(crate) fn u8(&mut self, field: &'static str) -> Result<u8, FlacDecodeError> {
		Ok(self.array::<1>(field)?[0])
	}

	pub(crate) fn u16_be(&mut self, field: &'static str) -> Result<u16, FlacDecodeError> {
		Ok(u16::from_be_bytes(self.array(field)?))
	}

	pub(crate) fn u32_be(&mut self, field: &'static str) -> Result<u32, FlacDecodeError> {
		Ok(u32::from_be_bytes(self.array(field)?))
	}

	pub(crate) fn u64_be(&mut self, field: &'static str) -> Result<u64, FlacDecodeError> {
		Ok(u64::from_be_bytes(self.array(field)?))
	}

	// Vorbis comments are the only little-endian structure in a flac file
	pub(crate) fn u32_le(&mut self, field: &'static str) -> Result<u32, FlacDecodeError> {
		Ok(u32::from_le_bytes(self.array(field)?))
	}

	/// Take `length` bytes, where `length` was read from the block itself
	fn sized_bytes(&mut self, field: &'static str, length: u32) -> Result<&'a [u8], FlacDecodeError> {
		let length = usize::try_from(length).map_err(|_e| FlacDecodeError::ShortRead {
			field,
			expected: u64::from(length),
			got: self.remaining() as u64,
		})?;

		self.bytes(field, length)
	}

	/// Read `length` bytes as a UTF-8 string
	pub(crate) fn string(
		&mut self,
		field: &'static str,
		length: u32,
	) -> Result<String, FlacDecodeError> {
		Ok(String::from_utf8(self.sized_bytes(field, length)?.to_vec())?)
	}

	/// Read `length` bytes as text, without checking their encoding
	pub(crate) fn byte_string(
		&mut self,
		field: &'static str,
		length: u32,
	) -> Result<ByteString, FlacDecodeError> {
		Ok(self.sized_bytes(field, length)?.into())
	}

	/// Read a fixed-size, NUL-padded string.
	/// Everything after the first NUL is dropped.
	pub(crate) fn padded_string<const N: usize>(
		&mut self,
		field: &'static str,
	) -> Result<String, FlacDecodeError> {
		let block = self.array::<N>(field)?;
		let end = block.iter().position(|x| *x == 0).unwrap_or(N);
		Ok(String::from_utf8(block[..end].to_vec())?)
	}

	/// Finish reading this block.
	/// Leftover bytes are logged and ignored.
	pub(crate) fn finish(self) {
		if self.remaining() != 0 {
			warn!(
				message = "Ignoring trailing bytes in metablock",
				block_type = %self.block_type,
				trailing = self.remaining(),
			);
		}
	}
}
