//! An audio picture type, according to the ID3v2 APIC frame

use serde_with::SerializeDisplay;
use std::fmt::Display;

/// A picture type according to the ID3v2 APIC frame.
///
/// Codes outside the table decode to [`PictureType::Unknown`],
/// which keeps the raw code.
#[expect(missing_docs)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, SerializeDisplay)]
pub enum PictureType {
	Other,
	PngFileIcon,
	OtherFileIcon,
	FrontCover,
	BackCover,
	LeafletPage,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	BandOrchestra,
	Composer,
	Lyricist,
	RecLocation,
	DuringRecording,
	DuringPerformance,
	VideoScreenCapture,
	ABrightColoredFish,
	Illustration,
	ArtistLogotype,
	PublisherLogotype,
	Unknown(u32),
}

impl PictureType {
	/// Map a picture type code to a [`PictureType`].
	/// This never fails.
	pub fn from_idx(idx: u32) -> Self {
		match idx {
			0 => PictureType::Other,
			1 => PictureType::PngFileIcon,
			2 => PictureType::OtherFileIcon,
			3 => PictureType::FrontCover,
			4 => PictureType::BackCover,
			5 => PictureType::LeafletPage,
			6 => PictureType::Media,
			7 => PictureType::LeadArtist,
			8 => PictureType::Artist,
			9 => PictureType::Conductor,
			10 => PictureType::BandOrchestra,
			11 => PictureType::Composer,
			12 => PictureType::Lyricist,
			13 => PictureType::RecLocation,
			14 => PictureType::DuringRecording,
			15 => PictureType::DuringPerformance,
			16 => PictureType::VideoScreenCapture,
			17 => PictureType::ABrightColoredFish,
			18 => PictureType::Illustration,
			19 => PictureType::ArtistLogotype,
			20 => PictureType::PublisherLogotype,
			x => PictureType::Unknown(x),
		}
	}

	/// The code this picture type is stored as
	pub fn to_idx(&self) -> u32 {
		match self {
			PictureType::Other => 0,
			PictureType::PngFileIcon => 1,
			PictureType::OtherFileIcon => 2,
			PictureType::FrontCover => 3,
			PictureType::BackCover => 4,
			PictureType::LeafletPage => 5,
			PictureType::Media => 6,
			PictureType::LeadArtist => 7,
			PictureType::Artist => 8,
			PictureType::Conductor => 9,
			PictureType::BandOrchestra => 10,
			PictureType::Composer => 11,
			PictureType::Lyricist => 12,
			PictureType::RecLocation => 13,
			PictureType::DuringRecording => 14,
			PictureType::DuringPerformance => 15,
			PictureType::VideoScreenCapture => 16,
			PictureType::ABrightColoredFish => 17,
			PictureType::Illustration => 18,
			PictureType::ArtistLogotype => 19,
			PictureType::PublisherLogotype => 20,
			PictureType::Unknown(x) => *x,
		}
	}

	/// The human-readable name of this picture type
	pub fn name(&self) -> &'static str {
		match self {
			PictureType::Other => "Other",
			PictureType::PngFileIcon => "File Icon",
			PictureType::OtherFileIcon => "Other File Icon",
			PictureType::FrontCover => "Cover (front)",
			PictureType::BackCover => "Cover (back)",
			PictureType::LeafletPage => "Leaflet Page",
			PictureType::Media => "Media",
			PictureType::LeadArtist => "Lead Artist/Lead Performer/Soloist",
			PictureType::Artist => "Artist/Performer",
			PictureType::Conductor => "Conductor",
			PictureType::BandOrchestra => "Band/Orchestra",
			PictureType::Composer => "Composer",
			PictureType::Lyricist => "Lyricist/Text Writer",
			PictureType::RecLocation => "Recording Location",
			PictureType::DuringRecording => "During Recording",
			PictureType::DuringPerformance => "During Performance",
			PictureType::VideoScreenCapture => "Movie/Video Screen Capture",
			PictureType::ABrightColoredFish => "A Bright Coloured Fish",
			PictureType::Illustration => "Illustration",
			PictureType::ArtistLogotype => "Band/Artist Logotype",
			PictureType::PublisherLogotype => "Publisher/Studio Logotype",
			PictureType::Unknown(_) => "UNKNOWN",
		}
	}
}

impl Display for PictureType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}
