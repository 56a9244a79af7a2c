use serde::Serialize;
use std::fmt::Debug;

use super::{FlacMetablockDecode, FlacMetablockType, MetablockCursor};
use crate::{
	common::{bytestring::ByteString, picturetype::PictureType},
	flac::errors::FlacDecodeError,
};

/// A picture metablock in a flac file
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct FlacPictureBlock {
	/// The type of this picture
	pub picture_type: PictureType,

	/// The format of this picture, exactly as stored.
	/// This may also be `-->`, in which case `img_data` is a URL.
	pub mime: ByteString,

	/// The description of this picture
	pub description: String,

	/// The width of this picture, in px
	pub width: u32,

	/// The height of this picture, in px
	pub height: u32,

	/// The bit depth of this picture
	pub bit_depth: u32,

	/// The color count of this picture (if indexed)
	pub color_count: u32,

	/// The image data, exactly as stored
	pub img_data: Vec<u8>,
}

impl Debug for FlacPictureBlock {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FlacPicture")
			.field("type", &self.picture_type)
			.field("mime", &self.mime)
			.field("width", &self.width)
			.field("height", &self.height)
			.field("img_data_len", &self.img_data.len())
			.finish()
	}
}

impl FlacMetablockDecode for FlacPictureBlock {
	fn decode(data: &[u8]) -> Result<Self, FlacDecodeError> {
		let mut d = MetablockCursor::new(FlacMetablockType::Picture, data);

		let picture_type = PictureType::from_idx(d.u32_be("picture type")?);

		// Image format
		let mime = {
			let mime_length = d.u32_be("picture mime type length")?;
			d.byte_string("picture mime type", mime_length)?
		};

		// Image description
		let description = {
			let desc_length = d.u32_be("picture description length")?;
			if desc_length == 0 {
				String::new()
			} else {
				d.string("picture description", desc_length)?
			}
		};

		let width = d.u32_be("picture width")?;
		let height = d.u32_be("picture height")?;
		let bit_depth = d.u32_be("picture bit depth")?;

		// Color count for indexed images
		let color_count = d.u32_be("picture color count")?;

		// Image data
		let img_data = {
			let data_length = d.u32_be("picture data length")?;
			d.bytes("picture data", data_length as usize)?.to_vec()
		};

		d.finish();

		Ok(Self {
			picture_type,
			mime,
			description,
			width,
			height,
			bit_depth,
			color_count,
			img_data,
		})
	}
}

#[cfg(test)]
mod tests {
	use sha2::{Digest, Sha256};

	use super::*;
	use crate::flac::tests::make_picture;

	#[test]
	fn decode_picture() {
		let img = [0x89, b'P', b'N', b'G', 0x00, 0x01, 0x02];
		let data = make_picture(3, "image/png", "front", 500, 400, 24, 0, &img);

		let p = FlacPictureBlock::decode(&data).unwrap();
		assert_eq!(p.picture_type, PictureType::FrontCover);
		assert_eq!(p.picture_type.to_string(), "Cover (front)");
		assert_eq!(p.mime.to_str(), Some("image/png"));
		assert_eq!(p.description, "front");
		assert_eq!(p.width, 500);
		assert_eq!(p.height, 400);
		assert_eq!(p.bit_depth, 24);
		assert_eq!(p.color_count, 0);
		assert_eq!(
			format!("{:x}", Sha256::digest(&p.img_data)),
			format!("{:x}", Sha256::digest(img))
		);
	}

	#[test]
	fn empty_description_and_unknown_type() {
		let data = make_picture(99, "-->", "", 0, 0, 0, 0, b"http://example.com/cover.jpg");

		let p = FlacPictureBlock::decode(&data).unwrap();
		assert_eq!(p.picture_type, PictureType::Unknown(99));
		assert_eq!(p.picture_type.to_string(), "UNKNOWN");
		assert_eq!(p.mime.to_str(), Some("-->"));
		assert_eq!(p.description, "");
		assert_eq!(p.img_data, b"http://example.com/cover.jpg");
	}

	#[test]
	fn utf8_description() {
		let data = make_picture(0, "image/jpeg", "Pochette \u{e9}t\u{e9}", 1, 1, 8, 0, &[0]);
		let p = FlacPictureBlock::decode(&data).unwrap();
		assert_eq!(p.description, "Pochette \u{e9}t\u{e9}");
	}

	#[test]
	fn mime_is_not_validated() {
		let mut data = make_picture(3, "image/png", "", 1, 1, 8, 0, &[0]);
		// First byte of the mime type
		data[8] = 0xE9;

		let p = FlacPictureBlock::decode(&data).unwrap();
		assert_eq!(p.mime.as_bytes(), b"\xE9mage/png");
		assert_eq!(p.mime.to_str(), None);
	}

	#[test]
	fn reject_bad_utf8_description() {
		let mut data = make_picture(3, "image/png", "front", 1, 1, 8, 0, &[0]);
		// First byte of the description, after type, mime and description length
		data[4 + 4 + 9 + 4] = 0xFF;
		assert!(matches!(
			FlacPictureBlock::decode(&data),
			Err(FlacDecodeError::FailedStringDecode(_))
		));
	}

	#[test]
	fn truncated_image() {
		let data = make_picture(3, "image/png", "", 1, 1, 8, 0, &[0u8; 64]);

		match FlacPictureBlock::decode(&data[..data.len() - 1]) {
			Err(FlacDecodeError::ShortRead {
				field,
				expected,
				got,
			}) => {
				assert_eq!(field, "picture data");
				assert_eq!(expected, 64);
				assert_eq!(got, 63);
			}
			x => panic!("Unexpected result {x:?}"),
		}
	}

	#[test]
	fn oversized_mime_length() {
		let mut data = make_picture(3, "image/png", "", 1, 1, 8, 0, &[]);
		data[4..8].copy_from_slice(&u32::MAX.to_be_bytes());
		assert!(matches!(
			FlacPictureBlock::decode(&data),
			Err(FlacDecodeError::ShortRead {
				field: "picture mime type",
				..
			})
		));
	}
}
