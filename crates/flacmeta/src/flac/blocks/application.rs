use serde::Serialize;
use std::fmt::Debug;

use super::{FlacMetablockDecode, FlacMetablockType, MetablockCursor};
use crate::flac::errors::FlacDecodeError;

/// An application block in a flac file
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct FlacApplicationBlock {
	/// Registered application ID
	pub application_id: u32,

	/// The application data
	pub data: Vec<u8>,
}

impl Debug for FlacApplicationBlock {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FlacApplicationBlock")
			.field("application_id", &self.application_id)
			.field("data_len", &self.data.len())
			.finish()
	}
}

impl FlacMetablockDecode for FlacApplicationBlock {
	fn decode(data: &[u8]) -> Result<Self, FlacDecodeError> {
		let mut d = MetablockCursor::new(FlacMetablockType::Application, data);

		let application_id = d.u32_be("application id")?;

		let data = d.rest();
		if data.len() % 8 != 0 {
			return Err(FlacDecodeError::BadApplicationLength(data.len()));
		}

		Ok(Self {
			application_id,
			data: data.to_vec(),
		})
	}
}
