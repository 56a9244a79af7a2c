use itertools::Itertools;
use serde::Serialize;

use super::{FlacMetablockDecode, FlacMetablockType, MetablockCursor};
use crate::flac::errors::FlacDecodeError;

/// A streaminfo block in a flac file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlacStreaminfoBlock {
	/// The minimum block size (in samples) used in the stream.
	pub min_block_size: u16,

	/// The maximum block size (in samples) used in the stream.
	/// (Minimum blocksize == maximum blocksize) implies a fixed-blocksize stream.
	pub max_block_size: u16,

	/// The minimum frame size (in bytes) used in the stream.
	/// May be 0 to imply the value is not known.
	pub min_frame_size: u32,

	/// The maximum frame size (in bytes) used in the stream.
	/// May be 0 to imply the value is not known.
	pub max_frame_size: u32,

	/// Sample rate in Hz. Though 20 bits are available,
	/// the maximum sample rate is limited by the structure of frame headers to 655350Hz.
	/// Also, a value of 0 is invalid.
	pub sample_rate: u32,

	/// Number of channels. FLAC supports from 1 to 8 channels
	pub channels: u8,

	/// Bits per sample. FLAC supports from 4 to 32 bits per sample.
	pub bits_per_sample: u8,

	/// Total samples in stream. 'Samples' means inter-channel sample, i.e. one second of 44.1Khz audio will have 44100 samples regardless of the number of channels. A value of zero here means the number of total samples is unknown.
	pub total_samples: u64,

	/// MD5 signature of the unencoded audio data. This allows the decoder to determine if an error exists in the audio data even when the error does not result in an invalid bitstream.
	pub md5_signature: [u8; 16],
}

impl FlacStreaminfoBlock {
	/// The length of a streaminfo block, in bytes
	pub const LEN: usize = 34;

	/// The MD5 signature as a lowercase hex string
	pub fn md5_hex(&self) -> String {
		self.md5_signature
			.iter()
			.map(|x| format!("{x:02x}"))
			.join("")
	}
}

impl FlacMetablockDecode for FlacStreaminfoBlock {
	fn decode(data: &[u8]) -> Result<Self, FlacDecodeError> {
		let mut d = MetablockCursor::new(FlacMetablockType::Streaminfo, data);

		// Fields are read as big-endian groups of
		// 16, 64, 64, and 128 bits.
		let min_block_size = d.u16_be("streaminfo min block size")?;

		// <16> max block size, <24> min frame size, <24> max frame size
		let (max_block_size, min_frame_size, max_frame_size) = {
			let bits = d.u64_be("streaminfo block and frame sizes")?;
			(
				(bits >> 48) as u16,
				((bits >> 24) & 0xFF_FFFF) as u32,
				(bits & 0xFF_FFFF) as u32,
			)
		};

		// <20> sample rate, <3> channels - 1, <5> bits per sample - 1, <36> total samples
		let (sample_rate, channels, bits_per_sample, total_samples) = {
			let bits = d.u64_be("streaminfo sample format")?;
			(
				(bits >> 44) as u32,
				((bits >> 41) & 0b111) as u8 + 1,
				((bits >> 36) & 0b1_1111) as u8 + 1,
				bits & 0xF_FFFF_FFFF,
			)
		};

		let md5_signature = d.array::<16>("streaminfo md5 signature")?;
		d.finish();

		if min_block_size != 0 && min_block_size < 16 {
			return Err(FlacDecodeError::BadStreaminfo {
				field: "min block size",
				value: min_block_size.into(),
			});
		}

		if max_block_size < 16 {
			return Err(FlacDecodeError::BadStreaminfo {
				field: "max block size",
				value: max_block_size.into(),
			});
		}

		if sample_rate == 0 || sample_rate >= 655350 {
			return Err(FlacDecodeError::BadStreaminfo {
				field: "sample rate",
				value: sample_rate,
			});
		}

		Ok(Self {
			min_block_size,
			max_block_size,
			min_frame_size,
			max_frame_size,
			sample_rate,
			channels,
			bits_per_sample,
			total_samples,
			md5_signature,
		})
	}
}
