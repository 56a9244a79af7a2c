//! Decode Vorbis comment blocks

use base64::Engine;
use serde::Serialize;

use crate::{
	common::bytestring::ByteString,
	flac::{
		blocks::{FlacMetablockDecode, FlacMetablockType, FlacPictureBlock, MetablockCursor},
		errors::FlacDecodeError,
	},
};

/// A decoded vorbis comment block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VorbisComment {
	/// This comment's vendor string
	pub vendor: ByteString,

	/// Raw comment strings, in file order.
	/// These are usually `KEY=VALUE` in UTF-8, but neither is enforced.
	/// Repeated keys are allowed!
	pub comments: Vec<ByteString>,
}

impl VorbisComment {
	/// Try to decode the given data as a vorbis comment block.
	/// Unlike everything else in a flac file, lengths here are little-endian.
	pub fn decode(data: &[u8]) -> Result<Self, FlacDecodeError> {
		let mut d = MetablockCursor::new(FlacMetablockType::VorbisComment, data);

		let vendor = {
			let length = d.u32_le("vorbis vendor length")?;
			d.byte_string("vorbis vendor string", length)?
		};

		let n_comments = d.u32_le("vorbis comment count")?;

		// Every comment takes at least four bytes,
		// don't trust the count for allocation.
		#[expect(clippy::integer_division)]
		let mut comments = Vec::with_capacity((n_comments as usize).min(d.remaining() / 4));
		for _ in 0..n_comments {
			let length = d.u32_le("vorbis comment length")?;
			comments.push(d.byte_string("vorbis comment", length)?);
		}

		d.finish();

		Ok(Self { vendor, comments })
	}

	/// Iterate over `(key, value)` pairs in this comment.
	/// Comments are split on the first `=`.
	/// Comments without one, and comments that aren't UTF-8, are skipped.
	pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
		self.comments
			.iter()
			.filter_map(|c| c.to_str()?.split_once('='))
	}

	/// Get every value with the given key, in file order.
	/// Keys are case-insensitive.
	pub fn get<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
		self.entries()
			.filter(move |(k, _)| k.eq_ignore_ascii_case(key))
			.map(|(_, v)| v)
	}

	/// Decode all pictures stored in `METADATA_BLOCK_PICTURE` comments
	pub fn embedded_pictures(&self) -> Result<Vec<FlacPictureBlock>, FlacDecodeError> {
		let mut out = Vec::new();
		for val in self.get("METADATA_BLOCK_PICTURE") {
			if val.is_empty() {
				continue;
			}

			let data = base64::prelude::BASE64_STANDARD.decode(val)?;
			out.push(FlacPictureBlock::decode(&data)?);
		}
		return Ok(out);
	}
}

#[cfg(test)]
mod tests {
	use base64::Engine;

	use super::*;
	use crate::{
		common::picturetype::PictureType,
		flac::tests::{make_comment, make_comment_bytes, make_picture, VORBIS_MONO},
	};

	#[test]
	fn decode_libflac() {
		let c = VorbisComment::decode(&VORBIS_MONO).unwrap();
		assert_eq!(c.vendor.to_str(), Some("reference libFLAC 1.2.1 20070917"));
		assert_eq!(c.comments, vec![ByteString::from("ARTIST=GoGoGo")]);
		assert_eq!(c.entries().collect::<Vec<_>>(), vec![("ARTIST", "GoGoGo")]);
	}

	#[test]
	fn big_endian_lengths_fail() {
		// Re-encode the vendor length as big-endian
		let mut data = VORBIS_MONO.to_vec();
		let len = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
		data[0..4].copy_from_slice(&len.to_be_bytes());

		assert!(matches!(
			VorbisComment::decode(&data),
			Err(FlacDecodeError::ShortRead {
				field: "vorbis vendor string",
				..
			})
		));
	}

	#[test]
	fn keep_malformed_comments() {
		let data = make_comment(
			"vendor",
			&["TITLE=One", "no equals sign", "title=Two", "EMPTY=", "A=b=c"],
		);
		let c = VorbisComment::decode(&data).unwrap();

		assert_eq!(c.comments.len(), 5);
		assert_eq!(c.comments[1].to_str(), Some("no equals sign"));
		assert_eq!(
			c.entries().collect::<Vec<_>>(),
			vec![("TITLE", "One"), ("title", "Two"), ("EMPTY", ""), ("A", "b=c")]
		);
		assert_eq!(c.get("Title").collect::<Vec<_>>(), vec!["One", "Two"]);
		assert_eq!(c.get("EMPTY").collect::<Vec<_>>(), vec![""]);
		assert_eq!(c.get("missing").count(), 0);
	}

	#[test]
	fn short_comment_count() {
		// Claims two comments, has one
		let mut data = make_comment("v", &["A=1"]);
		data[5] = 2;

		assert!(matches!(
			VorbisComment::decode(&data),
			Err(FlacDecodeError::ShortRead {
				field: "vorbis comment length",
				..
			})
		));
	}

	#[test]
	fn latin1_bytes_are_kept() {
		let data = make_comment_bytes(
			b"vend\xf6r",
			&[&b"TITLE=Caf\xe9"[..], &b"ARTIST=x"[..]],
		);
		let c = VorbisComment::decode(&data).unwrap();

		assert_eq!(c.vendor.as_bytes(), b"vend\xf6r");
		assert_eq!(c.vendor.to_str(), None);
		assert_eq!(c.comments.len(), 2);
		assert_eq!(c.comments[0].as_bytes(), b"TITLE=Caf\xe9");
		assert_eq!(c.comments[1].as_bytes(), b"ARTIST=x");

		// Only decodable entries are visible as text
		assert_eq!(c.entries().collect::<Vec<_>>(), vec![("ARTIST", "x")]);
		assert_eq!(c.get("title").count(), 0);
		assert_eq!(c.get("artist").collect::<Vec<_>>(), vec!["x"]);
	}

	#[test]
	fn embedded_picture() {
		let pic = make_picture(3, "image/jpeg", "", 10, 10, 24, 0, &[1, 2, 3, 4]);
		let comment = format!(
			"METADATA_BLOCK_PICTURE={}",
			base64::prelude::BASE64_STANDARD.encode(&pic)
		);
		let data = make_comment("v", &["ARTIST=x", &comment]);
		let c = VorbisComment::decode(&data).unwrap();

		let pictures = c.embedded_pictures().unwrap();
		assert_eq!(pictures.len(), 1);
		assert_eq!(pictures[0].picture_type, PictureType::FrontCover);
		assert_eq!(pictures[0].img_data, vec![1, 2, 3, 4]);
	}

	#[test]
	fn bad_embedded_picture() {
		let data = make_comment("v", &["METADATA_BLOCK_PICTURE=!!!"]);
		let c = VorbisComment::decode(&data).unwrap();
		assert!(matches!(
			c.embedded_pictures(),
			Err(FlacDecodeError::FailedBase64Decode(_))
		));
	}
}
