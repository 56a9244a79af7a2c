//! Decode cuesheet blocks.
//!
//! A cuesheet is three nested record layouts:
//!
//! ```notrust
//! cuesheet   <128*8> catalog number      (NUL-padded ASCII)
//!            <64>    lead-in samples
//!            <1>     is compact disc
//!            <7+258*8> reserved
//!            <8>     number of tracks    (at least 1)
//!            ...     tracks
//!
//! track      <64>    offset in samples
//!            <8>     track number        (nonzero)
//!            <12*8>  ISRC
//!            <1>     track type          (0 = audio)
//!            <1>     pre-emphasis
//!            <6+13*8> reserved
//!            <8>     number of index points
//!            ...     index points
//!
//! index      <64>    offset in samples   (multiple of 588)
//!            <8>     index point number
//!            <3*8>   reserved
//! ```

use serde::Serialize;

use super::{FlacMetablockDecode, FlacMetablockType, MetablockCursor};
use crate::flac::errors::FlacDecodeError;

/// The number of samples in one CD-DA sector
const CD_SECTOR_SAMPLES: u64 = 588;

/// One index point in a cuesheet track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlacCuesheetIndex {
	/// Offset in samples, relative to the track offset
	pub offset: u64,

	/// The index point number
	pub point: u8,
}

/// One track in a cuesheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlacCuesheetTrack {
	/// Track offset in samples, relative to the beginning of the audio stream
	pub offset: u64,

	/// Track number. Never zero; 170 (or 255 for non-CD cuesheets)
	/// is the lead-out track.
	pub number: u8,

	/// Track ISRC, empty if there is none
	pub isrc: String,

	/// If false, this is a non-audio track
	pub is_audio: bool,

	/// If true, this track has pre-emphasis
	pub pre_emphasis: bool,

	/// This track's index points, in file order
	pub indices: Vec<FlacCuesheetIndex>,
}

/// A cuesheet metablock in a flac file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlacCuesheetBlock {
	/// Media catalog number, empty if there is none
	pub catalog_number: String,

	/// The number of lead-in samples
	pub lead_in_samples: u64,

	/// If true, this cuesheet corresponds to a compact disc
	pub is_cd: bool,

	/// This cuesheet's tracks, in file order
	pub tracks: Vec<FlacCuesheetTrack>,
}

impl FlacCuesheetTrack {
	/// Decode one track and all its index points.
	/// `position` is the index of this track in the cuesheet.
	fn decode(d: &mut MetablockCursor<'_>, position: usize) -> Result<Self, FlacDecodeError> {
		let offset = d.u64_be("cuesheet track offset")?;

		let number = d.u8("cuesheet track number")?;
		if number == 0 {
			return Err(FlacDecodeError::ZeroTrackNumber { track: position });
		}

		let isrc = d.padded_string::<12>("cuesheet track isrc")?;

		let flags = d.u8("cuesheet track flags")?;
		let is_audio = flags & 0b1000_0000 == 0;
		let pre_emphasis = flags & 0b0100_0000 != 0;
		d.bytes("cuesheet track reserved", 13)?;

		let n_indices = d.u8("cuesheet track index count")?;
		let mut indices = Vec::with_capacity(n_indices.into());
		for _ in 0..n_indices {
			let index_offset = d.u64_be("cuesheet index offset")?;
			let point = d.u8("cuesheet index number")?;
			d.bytes("cuesheet index reserved", 3)?;

			if index_offset % CD_SECTOR_SAMPLES != 0 {
				return Err(FlacDecodeError::BadIndexOffset {
					track: number,
					point,
					offset: index_offset,
				});
			}

			indices.push(FlacCuesheetIndex {
				offset: index_offset,
				point,
			});
		}

		Ok(Self {
			offset,
			number,
			isrc,
			is_audio,
			pre_emphasis,
			indices,
		})
	}
}

impl FlacMetablockDecode for FlacCuesheetBlock {
	fn decode(data: &[u8]) -> Result<Self, FlacDecodeError> {
		let mut d = MetablockCursor::new(FlacMetablockType::Cuesheet, data);

		let catalog_number = d.padded_string::<128>("cuesheet catalog number")?;
		let lead_in_samples = d.u64_be("cuesheet lead-in samples")?;

		// The cd flag is the top bit of a 259-byte reserved field
		let reserved = d.bytes("cuesheet reserved", 259)?;
		let is_cd = reserved[0] & 0b1000_0000 != 0;

		let n_tracks = d.u8("cuesheet track count")?;
		if n_tracks == 0 {
			return Err(FlacDecodeError::NoCuesheetTracks);
		}

		let mut tracks = Vec::with_capacity(n_tracks.into());
		for i in 0..usize::from(n_tracks) {
			tracks.push(FlacCuesheetTrack::decode(&mut d, i)?);
		}
		d.finish();

		Ok(Self {
			catalog_number,
			lead_in_samples,
			is_cd,
			tracks,
		})
	}
}
