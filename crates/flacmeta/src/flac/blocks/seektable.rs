use serde::Serialize;

use super::{FlacMetablockDecode, FlacMetablockType, MetablockCursor};
use crate::flac::errors::FlacDecodeError;

/// The length of one encoded seek point, in bytes
pub(crate) const SEEKPOINT_LEN: usize = 18;

/// One entry in a seektable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlacSeekpoint {
	/// Sample number of the first sample in the target frame,
	/// or `0xFFFFFFFFFFFFFFFF` for a placeholder point.
	pub sample_number: u64,

	/// Offset (in bytes) from the first byte of the first frame header
	/// to the first byte of the target frame's header.
	pub byte_offset: u64,

	/// Number of samples in the target frame.
	pub frame_samples: u16,
}

impl FlacSeekpoint {
	/// The sample number of a placeholder point
	pub const PLACEHOLDER: u64 = u64::MAX;

	/// If true, this is a placeholder point
	pub fn is_placeholder(&self) -> bool {
		self.sample_number == Self::PLACEHOLDER
	}
}

/// A seektable block in a flac file.
/// Points are kept in file order, placeholders included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlacSeektableBlock {
	/// The seek points in this table
	pub points: Vec<FlacSeekpoint>,
}

impl FlacSeektableBlock {
	/// The number of points in this table
	pub fn total_points(&self) -> usize {
		self.points.len()
	}
}

impl FlacMetablockDecode for FlacSeektableBlock {
	#[expect(clippy::integer_division)]
	fn decode(data: &[u8]) -> Result<Self, FlacDecodeError> {
		if data.len() % SEEKPOINT_LEN != 0 {
			return Err(FlacDecodeError::BadSeektableLength(data.len() as u32));
		}

		let mut d = MetablockCursor::new(FlacMetablockType::Seektable, data);
		let mut points = Vec::with_capacity(data.len() / SEEKPOINT_LEN);
		while d.remaining() != 0 {
			points.push(FlacSeekpoint {
				sample_number: d.u64_be("seekpoint sample number")?,
				byte_offset: d.u64_be("seekpoint offset")?,
				frame_samples: d.u16_be("seekpoint frame samples")?,
			});
		}
		d.finish();

		Ok(Self { points })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::flac::tests::SEEKTABLE_MONO;

	#[test]
	fn decode_mono() {
		let t = FlacSeektableBlock::decode(&SEEKTABLE_MONO).unwrap();
		assert_eq!(t.total_points(), 3);
		assert_eq!(
			t.points,
			vec![
				FlacSeekpoint {
					sample_number: 0,
					byte_offset: 0,
					frame_samples: 4096
				},
				FlacSeekpoint {
					sample_number: 438272,
					byte_offset: 1177,
					frame_samples: 4096
				},
				FlacSeekpoint {
					sample_number: 880640,
					byte_offset: 2452,
					frame_samples: 4096
				},
			]
		);
		assert!(t.points.iter().all(|x| !x.is_placeholder()));
	}

	#[test]
	fn keep_placeholders() {
		let mut data = Vec::from(&SEEKTABLE_MONO[..18]);
		data.extend([0xFF; 8]);
		data.extend([0x00; 10]);

		let t = FlacSeektableBlock::decode(&data).unwrap();
		assert_eq!(t.total_points(), 2);
		assert!(!t.points[0].is_placeholder());
		assert!(t.points[1].is_placeholder());
		assert_eq!(t.points[1].byte_offset, 0);
		assert_eq!(t.points[1].frame_samples, 0);
	}

	#[test]
	fn empty_table() {
		let t = FlacSeektableBlock::decode(&[]).unwrap();
		assert_eq!(t.total_points(), 0);
	}

	#[test]
	fn reject_bad_length() {
		assert!(matches!(
			FlacSeektableBlock::decode(&SEEKTABLE_MONO[..53]),
			Err(FlacDecodeError::BadSeektableLength(53))
		));
	}
}
